//! Library search path composition.
//!
//! This is the functional core of devshell: merging resolved library
//! directories into an existing path-list environment variable value.
//! Everything here is pure; assigning the result into a process
//! environment is the caller's job.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Separator the platform's dynamic linker uses between path-list entries.
#[cfg(windows)]
pub const PATH_LIST_SEPARATOR: char = ';';

/// Separator the platform's dynamic linker uses between path-list entries.
#[cfg(not(windows))]
pub const PATH_LIST_SEPARATOR: char = ':';

/// Default variable the composed value is assigned to.
pub const DEFAULT_LIBRARY_PATH_VAR: &str = "LD_LIBRARY_PATH";

/// Merge `paths` into an existing path-list value.
///
/// - `existing` absent or empty: the result is `paths` joined by
///   [`PATH_LIST_SEPARATOR`], with no leading or trailing separator.
/// - `existing` non-empty: the result is `existing`, the separator, then the
///   joined `paths`.
/// - `paths` empty: the result is `existing` unchanged (or `""`).
///
/// Entries keep their relative order and are never deduplicated. Empty
/// entries in `paths` are skipped so composition never adds a segment the
/// linker could read as the current directory. `existing` is not
/// normalised: a trailing separator there is passed through verbatim.
///
/// # Example
///
/// ```
/// use devshell_core::domain::compose;
///
/// assert_eq!(
///     compose(Some("/usr/local/lib"), &["/opt/libs/lib"]),
///     "/usr/local/lib:/opt/libs/lib"
/// );
/// ```
pub fn compose<S: AsRef<str>>(existing: Option<&str>, paths: &[S]) -> String {
    let mut out = existing.unwrap_or_default().to_string();

    for path in paths.iter().map(AsRef::as_ref).filter(|p| !p.is_empty()) {
        if !out.is_empty() {
            out.push(PATH_LIST_SEPARATOR);
        }
        out.push_str(path);
    }

    out
}

/// Ordered list of library directories, one per resolved dependency.
///
/// Insertion order is declaration order. The list is a plain sequence:
/// duplicates are kept and no directory is checked for existence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LibraryPathList {
    entries: Vec<PathBuf>,
}

impl LibraryPathList {
    /// Create an empty list.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a directory at the end of the list.
    pub fn push(&mut self, dir: impl Into<PathBuf>) {
        self.entries.push(dir.into());
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the directories in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(PathBuf::as_path)
    }

    /// Entries as strings, lossily converted for non-UTF-8 paths.
    pub fn to_strings(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    }

    /// The list joined by the platform separator.
    pub fn joined(&self) -> String {
        compose(None, &self.to_strings())
    }

    /// Compose this list onto an existing variable value. See [`compose`].
    pub fn compose_onto(&self, existing: Option<&str>) -> String {
        compose(existing, &self.to_strings())
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for LibraryPathList {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for LibraryPathList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}
