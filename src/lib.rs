//! # dirsize
//!
//! Library behind the `dirsize` command: measures the disk usage of files
//! and directories and returns the results sorted by name or size.
//!
//! ## Overview
//!
//! - [`aggregator::Aggregator`] measures one entry: a file's length, or the
//!   sum of every file below a directory.
//! - [`utils::scale`] converts a byte count into KB, MB or GB with two
//!   decimals.
//! - [`collector::Collector`] flattens nested entry lists, measures every
//!   entry in order, and sorts the results.
//!
//! Filesystem access goes through the [`filesystem::FileSystem`] trait;
//! [`filesystem::DiskFileSystem`] is the real implementation.

pub mod aggregator;
pub mod collector;
pub mod config;
pub mod entry;
pub mod error;
pub mod filesystem;
pub mod output;
pub mod progress;
pub mod utils;

pub use config::{ListingErrorPolicy, ScanOptions, SortDirection, SortProperty, SortRequest};
