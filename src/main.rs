//! # dirsize
//!
//! A small CLI tool that reports the disk usage of files and directories,
//! sorted by name or size.
//!
//! Every named file is reported with its length and every named directory
//! with the total size of all files below it, scaled to KB, MB or GB.
//!
//! ## Features
//!
//! - Recursive directory sizes
//! - Sorting by name or size, ascending or descending
//! - Wildcard arguments (`dirsize ~/Downloads/*`)
//! - Unreadable subdirectories reported as warnings, or as errors with `--strict`
//! - Colorized table or JSON output
//! - Persistent configuration via `~/.config/dirsize/config.toml`
//!
//! ## Usage
//!
//! ```bash
//! # Everything in the current directory, smallest first
//! dirsize
//!
//! # Largest first
//! dirsize ~/Downloads/* --descending
//!
//! # Sorted by name, as JSON
//! dirsize /var/log /tmp --sort-by name --json
//! ```

mod cli;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use dirsize::{
    aggregator::Aggregator,
    collector::Collector,
    config::FileConfig,
    filesystem::DiskFileSystem,
    output::{JsonOutput, print_collection},
    progress::ProgressReporter,
};
use std::process::exit;

/// Entry point for the dirsize application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code. The exit
/// status is also non-zero when some entries could not be measured.
fn main() {
    match inner_main() {
        Ok(true) => {}
        Ok(false) => exit(1),
        Err(err) => {
            eprintln!("Error: {err}");

            exit(1);
        }
    }
}

/// Main application logic that can return errors.
///
/// Parses arguments, resolves the layered configuration, measures every
/// entry and prints the results. Returns `Ok(false)` when at least one entry
/// could not be measured.
///
/// # Errors
///
/// Returns errors from the config subcommands, an invalid sort request, or
/// JSON serialization.
fn inner_main() -> Result<bool> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        handle_config_command(command)?;
        return Ok(true);
    }

    let file_config = load_config();
    let json_mode = args.json(&file_config);
    let scan_options = args.scan_options(&file_config);

    init_logging(scan_options.verbose);

    let entries = args.entries(&file_config);
    let sort = args.sort_request(&file_config);

    let collector = Collector::new(Aggregator::new(DiskFileSystem, scan_options));
    let mut reporter = ProgressReporter::new(scan_options.verbose, json_mode);
    let collection = collector.collect(&entries, &sort, &mut reporter)?;

    if json_mode {
        let output = JsonOutput::from_collection(&collection);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_collection(&collection);
    }

    Ok(!collection.has_failures())
}

/// Initialize `env_logger`.
///
/// `RUST_LOG` takes precedence; otherwise only warnings are logged, or debug
/// records from this crate with `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "dirsize=debug" } else { "warn" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# dirsize configuration
# All values shown are their defaults. Uncomment and change as needed.

# Entries to measure when none are given on the command line
# (defaults to everything in the current directory)
# paths = ["~/Downloads"]

[sorting]
# Sort results by: name, size
# sort_by = "size"

# Sort direction: ascending, descending
# direction = "ascending"

[scanning]
# What to do with unreadable subdirectories:
#   warn - count them as 0 bytes and show a warning
#   fail - report the containing entry as an error
# listing_errors = "warn"

# Print every warning as it happens
# verbose = false

[output]
# Print a JSON document instead of a table
# json = false
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_str(val: Option<&str>, default: &str) -> String {
        val.map_or_else(
            || format!("\"{default}\"  (default)"),
            |v| format!("\"{v}\""),
        )
    }
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    let paths = match config.paths.as_deref() {
        Some(v) if !v.is_empty() => {
            let items: Vec<String> = v.iter().map(|p| format!("\"{}\"", p.display())).collect();
            format!("[{}]", items.join(", "))
        }
        _ => "[\"*\"]  (default)".to_string(),
    };

    format!(
        "\
paths          = {paths}

[sorting]
sort_by        = {sort_by}
direction      = {direction}

[scanning]
listing_errors = {listing_errors}
verbose        = {verbose}

[output]
json           = {json}",
        sort_by = show_str(config.sorting.sort_by.as_deref(), "size"),
        direction = show_str(config.sorting.direction.as_deref(), "ascending"),
        listing_errors = show_str(config.scanning.listing_errors.as_deref(), "warn"),
        verbose = show_bool(config.scanning.verbose, false),
        json = show_bool(config.output.json, false),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config() -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            FileConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_template_parses_to_defaults() {
        let config: FileConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();

        assert!(config.paths.is_none());
        assert!(config.sorting.sort_by.is_none());
        assert!(config.scanning.listing_errors.is_none());
        assert!(config.output.json.is_none());
    }

    #[test]
    fn test_format_config_shows_defaults() {
        let formatted = format_config(&FileConfig::default());

        assert!(formatted.contains("sort_by        = \"size\"  (default)"));
        assert!(formatted.contains("listing_errors = \"warn\"  (default)"));
        assert!(formatted.contains("json           = false  (default)"));
    }

    #[test]
    fn test_format_config_shows_file_values() {
        let config: FileConfig = toml::from_str(
            "paths = [\"/srv\"]\n[sorting]\nsort_by = \"name\"\n[output]\njson = true\n",
        )
        .unwrap();
        let formatted = format_config(&config);

        assert!(formatted.contains("paths          = [\"/srv\"]"));
        assert!(formatted.contains("sort_by        = \"name\""));
        assert!(formatted.contains("json           = true"));
    }
}
