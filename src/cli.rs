//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and their validation
//! using the [clap](https://docs.rs/clap/) library. It provides structured access
//! to user input and handles defaults.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use glob::MatchOptions;

use dirsize::config::file::{FileConfig, expand_tilde};
use dirsize::config::{ListingErrorPolicy, ScanOptions, SortDirection, SortProperty, SortRequest};
use dirsize::entry::Entry;

/// Pattern used when no entries are given anywhere: the current directory's children.
const DEFAULT_PATTERN: &str = "*";

/// Command-line arguments for ordering the results.
#[derive(Parser)]
struct SortingArgs {
    /// Property to sort the results by (name or size)
    ///
    /// `size` compares exact byte counts, `name` compares entry names
    /// case-insensitively. Defaults to `size`.
    #[arg(short = 's', long, value_enum, ignore_case = true)]
    sort_by: Option<SortProperty>,

    /// Sort in ascending order (the default)
    #[arg(long)]
    ascending: bool,

    /// Sort in descending order
    ///
    /// Cannot be combined with --ascending.
    #[arg(long)]
    descending: bool,
}

/// Command-line arguments for controlling how entries are measured.
#[derive(Parser)]
struct ScanningArgs {
    /// Fail an entry when part of it cannot be read
    ///
    /// By default unreadable subdirectories are counted as 0 bytes and a
    /// warning is shown. With --strict the entry is reported as an error
    /// instead.
    #[arg(long)]
    strict: bool,

    /// Show every warning and debug logging
    ///
    /// Prints each unreadable path as it is skipped instead of a summary
    /// count at the end.
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
///
/// Helper methods accept a [`FileConfig`] reference so that config-file values act as
/// defaults when the corresponding CLI argument is not provided.
#[derive(Parser)]
#[command(name = "dirsize")]
#[command(about = "Report the disk usage of files and directories, sorted by name or size")]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Files or directories to measure
    ///
    /// Wildcards (`*`, `?`, `[...]`) are expanded. Defaults to every entry in
    /// the current directory.
    #[arg(num_args = 0..)]
    paths: Vec<String>,

    /// Output results as a single JSON object for scripting/piping
    #[arg(long)]
    json: bool,

    /// Sorting options
    #[command(flatten)]
    sorting: SortingArgs,

    /// Scanning options
    #[command(flatten)]
    scanning: ScanningArgs,
}

impl Cli {
    /// Whether `--json` output is enabled, on the command line or in the config file.
    #[must_use]
    pub fn json(&self, config: &FileConfig) -> bool {
        self.json || config.output.json.unwrap_or(false)
    }

    /// Resolve the entries to measure.
    ///
    /// Priority: CLI arguments > config file `paths` > `*` in the current directory.
    /// Tilde expansion is applied to paths from the config file. Every argument
    /// containing wildcards becomes a nested list of the paths it matched.
    #[must_use]
    pub fn entries(&self, config: &FileConfig) -> Vec<Entry> {
        if !self.paths.is_empty() {
            return self.paths.iter().map(|p| expand_argument(p)).collect();
        }

        if let Some(ref paths) = config.paths
            && !paths.is_empty()
        {
            return paths
                .iter()
                .map(|p| expand_argument(&expand_tilde(p).to_string_lossy()))
                .collect();
        }

        vec![Entry::List(glob_matches(DEFAULT_PATTERN))]
    }

    /// Extract the sort request from CLI args and config file.
    ///
    /// - **property**: CLI > config > `size`
    /// - **direction**: CLI flags when either is given, otherwise the config
    ///   direction, otherwise ascending. Both CLI flags are passed through so
    ///   the conflict is reported by the collector.
    #[must_use]
    pub fn sort_request(&self, config: &FileConfig) -> SortRequest {
        let property = self
            .sorting
            .sort_by
            .or_else(|| {
                config
                    .sorting
                    .sort_by
                    .as_ref()
                    .and_then(|s| SortProperty::from_str(s, true).ok())
            })
            .unwrap_or_default();

        if self.sorting.ascending || self.sorting.descending {
            return SortRequest {
                property,
                ascending: self.sorting.ascending,
                descending: self.sorting.descending,
            };
        }

        let direction = config
            .sorting
            .direction
            .as_ref()
            .and_then(|s| SortDirection::from_str(s, true).ok())
            .unwrap_or_default();

        SortRequest::new(property, direction)
    }

    /// Extract scanning options from CLI args and config file.
    ///
    /// - **verbose**: CLI flag `||` config value `||` `false`
    /// - **`listing_errors`**: `--strict` > config > `warn`
    #[must_use]
    pub fn scan_options(&self, config: &FileConfig) -> ScanOptions {
        let listing_errors = if self.scanning.strict {
            ListingErrorPolicy::Fail
        } else {
            config
                .scanning
                .listing_errors
                .as_ref()
                .and_then(|s| ListingErrorPolicy::from_str(s, true).ok())
                .unwrap_or_default()
        };

        ScanOptions {
            verbose: self.scanning.verbose || config.scanning.verbose.unwrap_or(false),
            listing_errors,
        }
    }
}

/// Turn one argument into an entry, expanding wildcards.
///
/// Arguments without wildcard characters are taken literally. A pattern that
/// matches nothing (or is not a valid pattern) is also taken literally, so it
/// is reported as not found rather than silently dropped.
fn expand_argument(arg: &str) -> Entry {
    if !arg.contains(['*', '?', '[']) {
        return Entry::Path(PathBuf::from(arg));
    }

    let matches = glob_matches(arg);

    if matches.is_empty() {
        Entry::Path(PathBuf::from(arg))
    } else {
        Entry::List(matches)
    }
}

/// Paths matching a wildcard pattern, in alphabetical order.
///
/// Hidden entries are only matched when the pattern spells out the leading dot.
fn glob_matches(pattern: &str) -> Vec<Entry> {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: true,
    };

    glob::glob_with(pattern, options).map_or_else(
        |_| Vec::new(),
        |paths| paths.filter_map(Result::ok).map(Entry::Path).collect(),
    )
}
