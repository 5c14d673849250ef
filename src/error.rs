//! Error types for measuring and collecting entries.
//!
//! Errors come in two flavours:
//!
//! - [`CollectError`] is fatal: it is returned before any entry is measured
//!   and no partial result exists.
//! - [`MeasureError`] belongs to a single entry: it is recorded next to the
//!   successfully measured entries and does not stop the collection.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Fatal error returned by [`crate::collector::Collector::collect`].
#[derive(Debug, Error)]
pub enum CollectError {
    /// The request itself is invalid (e.g. both sort directions were asked for).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Error raised while measuring a single entry.
#[derive(Debug, Error)]
pub enum MeasureError {
    /// The entry does not exist or cannot be stat'ed.
    #[error("cannot find '{}': {source}", path.display())]
    NotFound {
        /// The path as it was supplied
        path: PathBuf,

        /// Underlying I/O error from the stat call
        #[source]
        source: io::Error,
    },

    /// A directory below the entry could not be read and partial results were refused.
    #[error("permission denied while reading '{}': {reason}", path.display())]
    PermissionDenied {
        /// The unreadable path below the entry
        path: PathBuf,

        /// Description of the failure
        reason: String,
    },

    /// Listing below the entry failed for a reason other than permissions.
    #[error("failed to list '{}': {reason}", path.display())]
    Listing {
        /// The path that could not be listed
        path: PathBuf,

        /// Description of the failure
        reason: String,
    },
}

impl MeasureError {
    /// Short, stable identifier of the error kind (used in JSON output).
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::PermissionDenied { .. } => "permission_denied",
            Self::Listing { .. } => "listing_failed",
        }
    }
}
