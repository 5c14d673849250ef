//! Size measurement of a single entry.
//!
//! The [`Aggregator`] resolves one path to a file or directory and computes
//! its size: the file length for files, and the sum of every file below it
//! for directories. Unreadable parts of a directory are handled according
//! to the configured [`ListingErrorPolicy`].

use std::path::Path;

use log::debug;

use crate::{
    config::{ListingErrorPolicy, ScanOptions},
    entry::{EntryKind, SizeResult},
    error::MeasureError,
    filesystem::{FileSystem, ListingFailure},
    progress::{Reporter, Warning},
};

/// Measures entries through a [`FileSystem`].
#[derive(Clone, Debug)]
pub struct Aggregator<F> {
    fs: F,
    scan_options: ScanOptions,
}

impl<F: FileSystem> Aggregator<F> {
    /// Create an aggregator over `fs`.
    #[must_use]
    pub const fn new(fs: F, scan_options: ScanOptions) -> Self {
        Self { fs, scan_options }
    }

    /// Measure a single entry.
    ///
    /// Files report their length. Directories report the sum of the lengths
    /// of all files below them; a directory without files reports 0.
    ///
    /// With [`ListingErrorPolicy::Warn`], every path below a directory that
    /// cannot be read contributes 0 bytes and is passed to
    /// [`Reporter::on_warning`].
    ///
    /// # Errors
    ///
    /// - [`MeasureError::NotFound`] if the entry cannot be stat'ed
    /// - [`MeasureError::PermissionDenied`] or [`MeasureError::Listing`] if
    ///   part of a directory cannot be read and the policy is
    ///   [`ListingErrorPolicy::Fail`]
    pub fn measure(
        &self,
        path: &Path,
        reporter: &mut dyn Reporter,
    ) -> Result<SizeResult, MeasureError> {
        let stat = self
            .fs
            .stat_entry(path)
            .map_err(|source| MeasureError::NotFound {
                path: path.to_path_buf(),
                source,
            })?;

        if !stat.is_dir {
            debug!("measured file {} ({} bytes)", path.display(), stat.len);
            return Ok(SizeResult::new(
                EntryKind::File,
                path.to_path_buf(),
                stat.len,
            ));
        }

        let total = self.sum_directory(path, reporter)?;
        debug!("measured directory {} ({total} bytes)", path.display());

        Ok(SizeResult::new(
            EntryKind::Directory,
            path.to_path_buf(),
            total,
        ))
    }

    /// Sum the sizes of every file below `path`.
    fn sum_directory(
        &self,
        path: &Path,
        reporter: &mut dyn Reporter,
    ) -> Result<u64, MeasureError> {
        let mut total = 0u64;

        for item in self.fs.list_recursive(path) {
            match item {
                Ok(len) => total = total.saturating_add(len),
                Err(failure) => self.handle_failure(path, failure, reporter)?,
            }
        }

        Ok(total)
    }

    /// Apply the listing error policy to one unreadable path.
    fn handle_failure(
        &self,
        entry: &Path,
        failure: ListingFailure,
        reporter: &mut dyn Reporter,
    ) -> Result<(), MeasureError> {
        match self.scan_options.listing_errors {
            ListingErrorPolicy::Warn => {
                debug!(
                    "skipping unreadable {} below {}: {}",
                    failure.path.display(),
                    entry.display(),
                    failure.reason
                );
                reporter.on_warning(&Warning::UnreadablePath {
                    entry: entry.to_path_buf(),
                    path: failure.path,
                    reason: failure.reason,
                });
                Ok(())
            }
            ListingErrorPolicy::Fail if failure.permission_denied => {
                Err(MeasureError::PermissionDenied {
                    path: failure.path,
                    reason: failure.reason,
                })
            }
            ListingErrorPolicy::Fail => Err(MeasureError::Listing {
                path: failure.path,
                reason: failure.reason,
            }),
        }
    }
}
