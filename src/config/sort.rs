//! Sorting configuration for collected results.
//!
//! This module defines the property results are sorted by, the direction,
//! and [`SortRequest`], which validates the pair of mutually exclusive
//! direction flags.

use clap::ValueEnum;

use crate::error::CollectError;

/// Property results are ordered by.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum SortProperty {
    /// Entry name, case-insensitive
    Name,

    /// Total size in bytes
    #[default]
    Size,
}

/// Direction results are ordered in.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum SortDirection {
    /// Smallest (or alphabetically first) first
    #[default]
    Ascending,

    /// Largest (or alphabetically last) first
    Descending,
}

/// A sort request as the caller expressed it.
///
/// The direction is given as two independent flags, mirroring the command
/// line. Asking for both is an error reported by [`Self::direction`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SortRequest {
    /// Property to sort by
    pub property: SortProperty,

    /// Whether ascending order was requested
    pub ascending: bool,

    /// Whether descending order was requested
    pub descending: bool,
}

impl SortRequest {
    /// Build a request for a single, known direction.
    #[must_use]
    pub const fn new(property: SortProperty, direction: SortDirection) -> Self {
        Self {
            property,
            ascending: matches!(direction, SortDirection::Ascending),
            descending: matches!(direction, SortDirection::Descending),
        }
    }

    /// Resolve the requested direction, defaulting to ascending.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::InvalidArgument`] if both ascending and
    /// descending were requested.
    pub fn direction(&self) -> Result<SortDirection, CollectError> {
        match (self.ascending, self.descending) {
            (true, true) => Err(CollectError::InvalidArgument(
                "ascending and descending order cannot be requested together".to_string(),
            )),
            (_, true) => Ok(SortDirection::Descending),
            _ => Ok(SortDirection::Ascending),
        }
    }
}
