//! Filesystem access used by the aggregator.
//!
//! The aggregator only needs two capabilities: stat a single entry, and list
//! the sizes of every file below a directory. They are expressed as the
//! [`FileSystem`] trait so the measuring logic can be exercised against an
//! in-memory tree in tests. [`DiskFileSystem`] is the real implementation.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

/// Result of stat'ing a single entry.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EntryStat {
    /// Whether the entry is a directory
    pub is_dir: bool,

    /// Length in bytes (meaningful for files only)
    pub len: u64,
}

/// A path below a directory that could not be read while listing it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ListingFailure {
    /// Path that failed
    pub path: PathBuf,

    /// Human-readable reason
    pub reason: String,

    /// Whether the failure was caused by missing permissions
    pub permission_denied: bool,
}

/// Lazily produced file sizes below a directory.
///
/// Yields one `Ok(len)` per regular file and one `Err` per unreadable path.
pub type Listing<'a> = Box<dyn Iterator<Item = Result<u64, ListingFailure>> + 'a>;

/// Filesystem capability needed to measure entries.
pub trait FileSystem {
    /// Stat a single entry, following a symlink if the entry is one.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the entry does not exist or
    /// cannot be stat'ed.
    fn stat_entry(&self, path: &Path) -> io::Result<EntryStat>;

    /// List the sizes of all regular files strictly below `path`, at any depth.
    fn list_recursive<'a>(&'a self, path: &'a Path) -> Listing<'a>;
}

/// [`FileSystem`] backed by the local disk.
///
/// Symbolic links below a measured directory are not followed, so each file
/// is counted at most once for a tree without hard links.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiskFileSystem;

impl FileSystem for DiskFileSystem {
    fn stat_entry(&self, path: &Path) -> io::Result<EntryStat> {
        let metadata = fs::metadata(path)?;

        Ok(EntryStat {
            is_dir: metadata.is_dir(),
            len: metadata.len(),
        })
    }

    fn list_recursive<'a>(&'a self, path: &'a Path) -> Listing<'a> {
        let entries = WalkDir::new(path)
            .follow_links(false)
            .min_depth(1)
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(
                    entry
                        .metadata()
                        .map(|metadata| metadata.len())
                        .map_err(|err| failure_from_walkdir(path, &err)),
                ),
                Ok(_) => None,
                Err(err) => Some(Err(failure_from_walkdir(path, &err))),
            });

        Box::new(entries)
    }
}

/// Convert a `walkdir` error into a [`ListingFailure`].
///
/// Errors without a path are attributed to `root`.
fn failure_from_walkdir(root: &Path, err: &walkdir::Error) -> ListingFailure {
    let path = err.path().unwrap_or(root).to_path_buf();

    match err.io_error() {
        Some(io_err) => failure_from_io(path, io_err),
        None => ListingFailure {
            path,
            reason: err.to_string(),
            permission_denied: false,
        },
    }
}

/// Classify an I/O error raised while reading `path`.
fn failure_from_io(path: PathBuf, err: &io::Error) -> ListingFailure {
    ListingFailure {
        path,
        reason: err.to_string(),
        permission_denied: err.kind() == io::ErrorKind::PermissionDenied,
    }
}
