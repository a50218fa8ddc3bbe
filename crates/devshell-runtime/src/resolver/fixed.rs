//! Resolver for manifests that pin every package prefix.

use std::path::PathBuf;

use async_trait::async_trait;
use devshell_core::{DEFAULT_LIB_SUBDIR, DependencySpec, PackageResolverPort, ResolveError};

use super::nix::lib_dir;

/// Resolver that reads each entry's `path` field. Runs nothing.
#[derive(Debug, Clone)]
pub struct StaticResolver {
    lib_subdir: String,
}

impl Default for StaticResolver {
    fn default() -> Self {
        Self::new(DEFAULT_LIB_SUBDIR)
    }
}

impl StaticResolver {
    pub fn new(lib_subdir: impl Into<String>) -> Self {
        Self {
            lib_subdir: lib_subdir.into(),
        }
    }
}

#[async_trait]
impl PackageResolverPort for StaticResolver {
    fn name(&self) -> &str {
        "static"
    }

    async fn resolve(&self, spec: &DependencySpec) -> Result<PathBuf, ResolveError> {
        let prefix = spec
            .path
            .as_deref()
            .ok_or_else(|| ResolveError::NotFound(spec.name.to_string()))?;

        if !prefix.is_absolute() {
            return Err(ResolveError::InvalidPath {
                package: spec.name.to_string(),
                path: prefix.display().to_string(),
            });
        }

        Ok(lib_dir(prefix, &self.lib_subdir))
    }
}
