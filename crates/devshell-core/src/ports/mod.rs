//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No process or filesystem implementation details in signatures
//! - Intent-based methods (resolve a dependency, launch a session)

pub mod package_resolver;
pub mod session_launcher;

use thiserror::Error;

pub use package_resolver::{MapResolver, PackageResolverPort, ResolveError};
pub use session_launcher::{LaunchError, SessionLauncherPort, SessionOutcome, SessionRequest};

use crate::manifest::ManifestError;
use crate::paths::PathError;

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (CLI exit codes, etc.).
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required dependency could not be resolved.
    #[error("Cannot resolve dependency '{name}': {source}")]
    Resolve {
        name: String,
        #[source]
        source: ResolveError,
    },

    /// Session launch failed.
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// Manifest loading or validation failed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Path resolution failed.
    #[error(transparent)]
    Path(#[from] PathError),
}
