//! Measured entry data structures.
//!
//! This module defines [`SizeResult`], the record produced once per measured
//! entry, and [`EntryKind`].

use std::{
    fmt::{Display, Formatter, Result},
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::utils::{ScaledSize, scale};

/// Classification of a measured entry.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A regular file (or a symlink resolving to one)
    File,

    /// A directory whose size is the sum of every file below it
    Directory,
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::File => f.write_str("File"),
            Self::Directory => f.write_str("Directory"),
        }
    }
}

/// Size of one measured file or directory.
///
/// The scaled size is derived from `byte_size` when the result is built and
/// cannot be set independently, so two results with the same byte size
/// always carry the same scaled size.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SizeResult {
    kind: EntryKind,
    name: String,
    path: PathBuf,
    byte_size: u64,
    scaled: ScaledSize,
}

impl SizeResult {
    /// Build a result for the entry at `path`.
    ///
    /// The name is the final component of `path`; paths without one (such as
    /// `.` or `/`) are named after their display form.
    #[must_use]
    pub fn new(kind: EntryKind, path: PathBuf, byte_size: u64) -> Self {
        Self {
            kind,
            name: entry_name(&path),
            path,
            byte_size,
            scaled: scale(byte_size),
        }
    }

    /// Whether the entry is a file or a directory.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// The entry's base name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The path the entry was measured at, as supplied.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total size in bytes (recursive for directories).
    #[must_use]
    pub const fn byte_size(&self) -> u64 {
        self.byte_size
    }

    /// The byte size converted into KB, MB or GB.
    #[must_use]
    pub const fn scaled(&self) -> ScaledSize {
        self.scaled
    }
}

/// Base name of a path, falling back to the whole path when it has none.
fn entry_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
