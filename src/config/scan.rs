//! Scanning configuration for measuring entries.
//!
//! This module defines the options that control how directories are measured
//! and how unreadable parts of a tree are handled.

use clap::ValueEnum;

/// What to do when part of a directory cannot be listed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum ListingErrorPolicy {
    /// Count the unreadable part as zero bytes and raise a warning
    #[default]
    Warn,

    /// Fail the measurement of the entry that contains the unreadable part
    Fail,
}

/// Configuration for measuring behavior.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanOptions {
    /// Whether to print every warning as it happens
    pub verbose: bool,

    /// How listing failures below a directory are handled
    pub listing_errors: ListingErrorPolicy,
}
