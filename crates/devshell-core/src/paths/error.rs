//! Path-related error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating devshell files.
#[derive(Debug, Error)]
pub enum PathError {
    /// Could not determine the user's home directory.
    #[error("Cannot determine home directory")]
    NoHomeDir,

    /// An empty path was provided.
    #[error("Path cannot be empty")]
    EmptyPath,

    /// A manifest was named explicitly but does not exist.
    #[error("Manifest {0} does not exist")]
    ManifestNotFound(PathBuf),

    /// Failed to get the current working directory.
    #[error("Cannot determine current directory: {0}")]
    CurrentDirError(String),
}
