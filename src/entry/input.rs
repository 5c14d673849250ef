//! Entry lists supplied by the caller.

use std::path::{Path, PathBuf};

/// One item of the input to a collection.
///
/// Inputs may nest arbitrarily: a wildcard argument, for instance, expands
/// into an [`Entry::List`] of the paths it matched. [`flatten`] and dropping
/// an entry work at any depth. The derived `Clone`, `PartialEq` and `Debug`
/// recurse once per level, so compare deep inputs through [`flatten`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Entry {
    /// A single filesystem path
    Path(PathBuf),

    /// A nested list of entries
    List(Vec<Self>),
}

impl Drop for Entry {
    fn drop(&mut self) {
        let Self::List(children) = self else {
            return;
        };

        // Children are detached before they drop, so each drop sees an empty list.
        let mut pending = std::mem::take(children);
        while let Some(mut entry) = pending.pop() {
            if let Self::List(grandchildren) = &mut entry {
                pending.append(grandchildren);
            }
        }
    }
}

impl From<PathBuf> for Entry {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for Entry {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<&str> for Entry {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<Vec<Self>> for Entry {
    fn from(entries: Vec<Self>) -> Self {
        Self::List(entries)
    }
}

/// Expand nested entries into the flat sequence of leaf paths.
///
/// Leaves are returned depth first, left to right, so `[[a, b], [c]]`
/// flattens to the same sequence as `[a, b, c]`. The walk uses an explicit
/// stack and has no depth limit.
///
/// # Examples
///
/// ```
/// # use dirsize::entry::{Entry, flatten};
/// let entries = vec![
///     Entry::List(vec!["a".into(), "b".into()]),
///     Entry::List(vec!["c".into()]),
/// ];
/// assert_eq!(flatten(&entries).len(), 3);
/// ```
#[must_use]
pub fn flatten(entries: &[Entry]) -> Vec<&Path> {
    let mut leaves = Vec::new();
    let mut stack: Vec<&Entry> = entries.iter().rev().collect();

    while let Some(entry) = stack.pop() {
        match entry {
            Entry::Path(path) => leaves.push(path.as_path()),
            Entry::List(children) => stack.extend(children.iter().rev()),
        }
    }

    leaves
}
