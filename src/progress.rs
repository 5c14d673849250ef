//! Progress and warning reporting.
//!
//! Measuring large trees can take a while, so the collector reports which
//! entry it is working on and how far through the entry list it is. Partial
//! failures (unreadable subdirectories) are reported through the same
//! channel as warnings. Reporting is advisory: it never changes the results.

use std::{fmt::Display, path::PathBuf, time::Duration};

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

/// A non-fatal problem encountered while measuring an entry.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Warning {
    /// Part of an entry could not be read and contributed zero bytes.
    UnreadablePath {
        /// The entry being measured
        entry: PathBuf,

        /// The path below it that could not be read
        path: PathBuf,

        /// Description of the failure
        reason: String,
    },
}

impl Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnreadablePath {
                entry,
                path,
                reason,
            } => write!(
                f,
                "skipped unreadable '{}' while measuring '{}': {reason}",
                path.display(),
                entry.display()
            ),
        }
    }
}

/// Receiver for progress updates and warnings.
///
/// All methods have empty default implementations.
pub trait Reporter {
    /// Called before an entry is measured, with the share of entries already done.
    fn on_progress(&mut self, _item: &str, _percent: u8) {}

    /// Called for every warning raised while measuring.
    fn on_warning(&mut self, _warning: &Warning) {}

    /// Called once after the last entry has been measured.
    fn on_finish(&mut self) {}
}

/// Reporter that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {}

/// Terminal reporter: draws a progress bar and prints warnings.
///
/// Warnings are printed as they arrive when `verbose` is set. Otherwise they
/// are counted and a single summary line is printed when the run finishes.
#[derive(Debug)]
pub struct ProgressReporter {
    bar: ProgressBar,
    verbose: bool,
    quiet: bool,
    warnings: usize,
}

impl ProgressReporter {
    /// Create a reporter drawing on stderr.
    ///
    /// When `quiet` is set (used by `--json` mode) nothing is drawn or printed.
    #[must_use]
    pub fn new(verbose: bool, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(100);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:30.cyan/blue}] {pos:>3}% {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };

        Self {
            bar,
            verbose,
            quiet,
            warnings: 0,
        }
    }

    /// Number of warnings seen so far.
    #[must_use]
    pub const fn warning_count(&self) -> usize {
        self.warnings
    }
}

impl Reporter for ProgressReporter {
    fn on_progress(&mut self, item: &str, percent: u8) {
        self.bar.set_position(u64::from(percent));
        self.bar.set_message(format!("Measuring {item}"));
    }

    fn on_warning(&mut self, warning: &Warning) {
        self.warnings += 1;

        if self.verbose && !self.quiet {
            self.bar
                .suspend(|| eprintln!("{} {warning}", "Warning:".yellow()));
        }
    }

    fn on_finish(&mut self) {
        self.bar.finish_and_clear();

        if self.quiet || self.verbose || self.warnings == 0 {
            return;
        }

        let noun = if self.warnings == 1 { "path" } else { "paths" };
        eprintln!(
            "{} {} unreadable {noun} counted as 0 bytes (use --verbose for details)",
            "Warning:".yellow(),
            self.warnings
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_warning() -> Warning {
        Warning::UnreadablePath {
            entry: PathBuf::from("/data"),
            path: PathBuf::from("/data/locked"),
            reason: "Permission denied (os error 13)".to_string(),
        }
    }

    #[test]
    fn test_warning_display() {
        assert_eq!(
            sample_warning().to_string(),
            "skipped unreadable '/data/locked' while measuring '/data': Permission denied (os error 13)"
        );
    }

    #[test]
    fn test_silent_reporter_accepts_everything() {
        let mut reporter = SilentReporter;
        reporter.on_progress("a", 50);
        reporter.on_warning(&sample_warning());
        reporter.on_finish();
    }

    #[test]
    fn test_quiet_progress_reporter_counts_warnings() {
        let mut reporter = ProgressReporter::new(false, true);
        reporter.on_progress("a", 0);
        reporter.on_warning(&sample_warning());
        reporter.on_warning(&sample_warning());
        reporter.on_finish();

        assert_eq!(reporter.warning_count(), 2);
    }
}
