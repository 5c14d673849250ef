//! Configuration types and file loading.
//!
//! - [`file`] - persistent settings read from `config.toml`
//! - [`scan`] - how directories are measured
//! - [`sort`] - how results are ordered

pub mod file;
pub mod scan;
pub mod sort;

pub use file::FileConfig;
pub use scan::{ListingErrorPolicy, ScanOptions};
pub use sort::{SortDirection, SortProperty, SortRequest};
