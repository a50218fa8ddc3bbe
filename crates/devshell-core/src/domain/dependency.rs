//! Dependency handles and manifest entries.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a [`DependencyHandle`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandleError {
    /// The name was empty or whitespace.
    #[error("Dependency name cannot be empty")]
    Empty,

    /// The name contains characters that cannot appear in a package name.
    #[error("Dependency name '{0}' contains whitespace or control characters")]
    InvalidCharacters(String),
}

/// Opaque, validated name of a system library package (e.g. `libX11`).
///
/// The handle itself carries no location; a resolver turns it into a
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DependencyHandle(String);

impl DependencyHandle {
    /// Validate and wrap a dependency name.
    pub fn new(name: impl Into<String>) -> Result<Self, HandleError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(HandleError::Empty);
        }
        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(HandleError::InvalidCharacters(name));
        }
        Ok(Self(name))
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DependencyHandle {
    type Error = HandleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DependencyHandle> for String {
    fn from(handle: DependencyHandle) -> Self {
        handle.0
    }
}

impl fmt::Display for DependencyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One manifest entry: a dependency plus hints for each resolver kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySpec {
    /// Package name.
    pub name: DependencyHandle,

    /// Nix attribute path (e.g. `xorg.libX11`). Defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attr: Option<String>,

    /// pkg-config module name (e.g. `x11`). Defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pkg_config: Option<String>,

    /// Fixed package prefix, used by the static resolver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// When set, a resolution failure skips this entry instead of aborting.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

impl DependencySpec {
    /// Create a required dependency with no resolver hints.
    pub const fn new(name: DependencyHandle) -> Self {
        Self {
            name,
            attr: None,
            pkg_config: None,
            path: None,
            optional: false,
        }
    }

    /// Set the Nix attribute path.
    #[must_use]
    pub fn with_attr(mut self, attr: impl Into<String>) -> Self {
        self.attr = Some(attr.into());
        self
    }

    /// Set the pkg-config module name.
    #[must_use]
    pub fn with_pkg_config(mut self, module: impl Into<String>) -> Self {
        self.pkg_config = Some(module.into());
        self
    }

    /// Set a fixed package prefix.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Mark the dependency optional.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Nix attribute to evaluate.
    pub fn nix_attr(&self) -> &str {
        self.attr.as_deref().unwrap_or_else(|| self.name.as_str())
    }

    /// pkg-config module to query.
    pub fn pkg_config_module(&self) -> &str {
        self.pkg_config
            .as_deref()
            .unwrap_or_else(|| self.name.as_str())
    }
}

/// A dependency together with the library directory it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDependency {
    pub name: DependencyHandle,
    pub lib_dir: PathBuf,
}
