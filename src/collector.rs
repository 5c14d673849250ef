//! Collection and sorting of measured entries.
//!
//! The [`Collector`] drives an [`Aggregator`] over a (possibly nested) list
//! of entries, one entry at a time and in input order, and sorts the
//! results. Entries that cannot be measured are recorded as
//! [`EntryFailure`]s next to the results instead of aborting the run.

use std::{cmp::Ordering, path::PathBuf};

use log::debug;

use crate::{
    aggregator::Aggregator,
    config::{SortDirection, SortProperty, SortRequest},
    entry::{Entry, SizeResult, flatten},
    error::{CollectError, MeasureError},
    filesystem::FileSystem,
    progress::{Reporter, Warning},
};

/// An entry that could not be measured.
#[derive(Debug)]
pub struct EntryFailure {
    /// The entry as it was supplied
    pub path: PathBuf,

    /// Why it could not be measured
    pub error: MeasureError,
}

/// Outcome of a collection.
///
/// `results` is sorted as requested. `failures` and `warnings` are in the
/// order they occurred.
#[derive(Debug, Default)]
pub struct Collection {
    /// Successfully measured entries
    pub results: Vec<SizeResult>,

    /// Entries that could not be measured
    pub failures: Vec<EntryFailure>,

    /// Non-fatal problems raised while measuring
    pub warnings: Vec<Warning>,
}

impl Collection {
    /// Sum of the byte sizes of all results.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.results
            .iter()
            .fold(0u64, |acc, r| acc.saturating_add(r.byte_size()))
    }

    /// Whether at least one entry could not be measured.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Whether neither results nor failures were produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.failures.is_empty()
    }
}

/// Measures and sorts a list of entries.
#[derive(Clone, Debug)]
pub struct Collector<F> {
    aggregator: Aggregator<F>,
}

impl<F: FileSystem> Collector<F> {
    /// Create a collector that measures with `aggregator`.
    #[must_use]
    pub const fn new(aggregator: Aggregator<F>) -> Self {
        Self { aggregator }
    }

    /// Measure every entry and return the sorted results.
    ///
    /// Nested entry lists are flattened first (depth first, left to right).
    /// Before each leaf is measured, `reporter` receives its name and the
    /// percentage of leaves already done; [`Reporter::on_finish`] is called
    /// once all leaves are done. The percentage is taken over the flattened
    /// leaf count, not the number of top-level entries.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::InvalidArgument`] if `sort` asks for both
    /// ascending and descending order. This check happens before anything is
    /// measured.
    pub fn collect(
        &self,
        entries: &[Entry],
        sort: &SortRequest,
        reporter: &mut dyn Reporter,
    ) -> Result<Collection, CollectError> {
        let direction = sort.direction()?;
        let leaves = flatten(entries);
        let total = leaves.len();

        let mut collection = Collection::default();
        let mut recorder = WarningRecorder {
            inner: reporter,
            warnings: &mut collection.warnings,
        };

        for (index, path) in leaves.into_iter().enumerate() {
            let name = path.display().to_string();
            recorder.on_progress(&name, percent_done(index, total));

            match self.aggregator.measure(path, &mut recorder) {
                Ok(result) => collection.results.push(result),
                Err(error) => {
                    debug!("failed to measure {name}: {error}");
                    collection.failures.push(EntryFailure {
                        path: path.to_path_buf(),
                        error,
                    });
                }
            }
        }

        recorder.on_finish();
        sort_results(&mut collection.results, sort.property, direction);

        Ok(collection)
    }
}

/// Forwards to the caller's reporter while keeping a copy of every warning.
struct WarningRecorder<'r, 'w> {
    inner: &'r mut dyn Reporter,
    warnings: &'w mut Vec<Warning>,
}

impl Reporter for WarningRecorder<'_, '_> {
    fn on_progress(&mut self, item: &str, percent: u8) {
        self.inner.on_progress(item, percent);
    }

    fn on_warning(&mut self, warning: &Warning) {
        self.warnings.push(warning.clone());
        self.inner.on_warning(warning);
    }

    fn on_finish(&mut self) {
        self.inner.on_finish();
    }
}

/// Share of `total` entries completed before entry `index`, in percent.
fn percent_done(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }

    u8::try_from(index.saturating_mul(100) / total).unwrap_or(100)
}

/// Sort results in place by `property` in `direction`.
///
/// - `Name`: case-insensitive comparison of entry names
/// - `Size`: comparison of byte sizes (not of the rounded scaled values)
///
/// The sort is stable in both directions: results with equal keys keep
/// their relative order.
pub fn sort_results(
    results: &mut [SizeResult],
    property: SortProperty,
    direction: SortDirection,
) {
    let compare: fn(&SizeResult, &SizeResult) -> Ordering = match property {
        SortProperty::Name => compare_names,
        SortProperty::Size => compare_sizes,
    };

    match direction {
        SortDirection::Ascending => results.sort_by(compare),
        SortDirection::Descending => results.sort_by(|a, b| compare(b, a)),
    }
}

fn compare_names(a: &SizeResult, b: &SizeResult) -> Ordering {
    a.name().to_lowercase().cmp(&b.name().to_lowercase())
}

fn compare_sizes(a: &SizeResult, b: &SizeResult) -> Ordering {
    a.byte_size().cmp(&b.byte_size())
}
