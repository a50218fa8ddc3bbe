//! Package resolver port.
//!
//! A resolver turns a declared dependency into the absolute directory that
//! holds its shared libraries. How that happens (fetch, build, cache hit)
//! is the resolver's business; the core only sees the resulting path.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::DependencySpec;

/// Errors a resolver can report for a single dependency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The package database has no such package.
    #[error("Package '{0}' not found")]
    NotFound(String),

    /// The resolver tool itself could not be run.
    #[error("Resolver '{resolver}' is unavailable: {reason}")]
    Unavailable { resolver: String, reason: String },

    /// The resolver ran but failed for this package.
    #[error("Resolving '{package}' failed: {reason}")]
    ResolverFailed { package: String, reason: String },

    /// The resolver produced something that is not a usable directory.
    #[error("Resolver returned an invalid path for '{package}': {path:?}")]
    InvalidPath { package: String, path: String },
}

/// Port for the external package database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PackageResolverPort: Send + Sync {
    /// Short resolver name for logs and diagnostics.
    fn name(&self) -> &str;

    /// Resolve one dependency to its library directory.
    async fn resolve(&self, spec: &DependencySpec) -> Result<PathBuf, ResolveError>;
}

/// In-memory resolver backed by a name → directory map.
///
/// Useful for tests and for manifests that pin every directory explicitly.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    entries: HashMap<String, PathBuf>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a mapping.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        self.entries.insert(name.into(), dir.into());
        self
    }
}

impl<N: Into<String>, P: Into<PathBuf>> FromIterator<(N, P)> for MapResolver {
    fn from_iter<I: IntoIterator<Item = (N, P)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(n, p)| (n.into(), p.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl PackageResolverPort for MapResolver {
    fn name(&self) -> &str {
        "map"
    }

    async fn resolve(&self, spec: &DependencySpec) -> Result<PathBuf, ResolveError> {
        self.entries
            .get(spec.name.as_str())
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(spec.name.to_string()))
    }
}
