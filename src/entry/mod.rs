//! Entry inputs and measurement results.
//!
//! This module contains the data structures that flow through a collection:
//! the (possibly nested) entries the caller asks about, and the immutable
//! [`SizeResult`] produced for each of them.
//!
//! ## Main Parts
//!
//! - [`Entry`] - A path, or a nested list of entries
//! - [`flatten`] - Expands nested entries into leaf paths, depth first
//! - [`SizeResult`] - Size of one measured file or directory
//! - [`EntryKind`] - Whether a measured entry is a file or a directory

pub mod input;
pub mod result;

pub use input::{Entry, flatten};
pub use result::{EntryKind, SizeResult};
