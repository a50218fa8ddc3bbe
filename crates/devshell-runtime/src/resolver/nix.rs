//! Nix-backed package resolver.
//!
//! Realises each dependency with `nix-build` and returns the library
//! directory of its store path. `lib.getLib` picks the package's `lib`
//! output when it has one and falls back to `out`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use devshell_core::{DEFAULT_LIB_SUBDIR, DependencySpec, PackageResolverPort, ResolveError};
use tracing::debug;

use super::tool_error;
use crate::command::run_captured;

/// Default `nix-build` executable, looked up in `PATH`.
pub const DEFAULT_NIX_BUILD: &str = "nix-build";

/// Default package set expression.
pub const DEFAULT_NIXPKGS: &str = "<nixpkgs>";

/// Resolver that realises packages from a nixpkgs expression.
#[derive(Debug, Clone)]
pub struct NixResolver {
    nix_build: String,
    nixpkgs: String,
    lib_subdir: String,
}

impl Default for NixResolver {
    fn default() -> Self {
        Self::new(DEFAULT_LIB_SUBDIR)
    }
}

impl NixResolver {
    pub fn new(lib_subdir: impl Into<String>) -> Self {
        Self {
            nix_build: DEFAULT_NIX_BUILD.to_string(),
            nixpkgs: DEFAULT_NIXPKGS.to_string(),
            lib_subdir: lib_subdir.into(),
        }
    }

    /// Use a different `nix-build` binary.
    #[must_use]
    pub fn with_nix_build(mut self, program: impl Into<String>) -> Self {
        self.nix_build = program.into();
        self
    }

    /// Evaluate against a different package set (a path or `<channel>`).
    #[must_use]
    pub fn with_nixpkgs(mut self, nixpkgs: impl Into<String>) -> Self {
        self.nixpkgs = nixpkgs.into();
        self
    }

    /// The Nix expression realised for `attr`.
    pub fn expression(&self, attr: &str) -> String {
        format!("with import {} {{}}; lib.getLib ({attr})", self.nixpkgs)
    }
}

/// Attribute paths are interpolated into an expression, so only plain
/// identifiers joined by dots are accepted.
fn is_valid_attr(attr: &str) -> bool {
    !attr.is_empty()
        && attr.split('.').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '\''))
                && !part.starts_with(|c: char| c.is_ascii_digit())
        })
}

/// `nix-build` prints one store path per output; the last line is the one
/// we asked for.
fn parse_store_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .rfind(|l| !l.is_empty())
        .map(PathBuf::from)
}

#[async_trait]
impl PackageResolverPort for NixResolver {
    fn name(&self) -> &str {
        "nix"
    }

    async fn resolve(&self, spec: &DependencySpec) -> Result<PathBuf, ResolveError> {
        let attr = spec.nix_attr();
        if !is_valid_attr(attr) {
            return Err(ResolveError::ResolverFailed {
                package: spec.name.to_string(),
                reason: format!("invalid Nix attribute path {attr:?}"),
            });
        }

        let expr = self.expression(attr);
        let output = run_captured(&self.nix_build, &["--no-out-link", "-E", &expr])
            .await
            .map_err(|e| tool_error(&self.nix_build, e))?;

        if !output.success {
            return Err(ResolveError::ResolverFailed {
                package: spec.name.to_string(),
                reason: output.stderr_tail(),
            });
        }

        let store_path = parse_store_path(&output.stdout)
            .filter(|p| p.is_absolute())
            .ok_or_else(|| ResolveError::InvalidPath {
                package: spec.name.to_string(),
                path: output.stdout.trim().to_string(),
            })?;

        debug!(dependency = %spec.name, store_path = %store_path.display(), "Realised Nix package");
        Ok(lib_dir(&store_path, &self.lib_subdir))
    }
}

pub(super) fn lib_dir(prefix: &Path, lib_subdir: &str) -> PathBuf {
    if lib_subdir.is_empty() {
        prefix.to_path_buf()
    } else {
        prefix.join(lib_subdir)
    }
}
