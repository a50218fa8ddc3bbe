//! pkg-config backed package resolver, for hosts without Nix.

use std::path::PathBuf;

use async_trait::async_trait;
use devshell_core::{DependencySpec, PackageResolverPort, ResolveError};

use super::tool_error;
use crate::command::run_captured;

/// Default `pkg-config` executable, looked up in `PATH`.
pub const DEFAULT_PKG_CONFIG: &str = "pkg-config";

/// Resolver that asks pkg-config for each module's `libdir` variable.
#[derive(Debug, Clone)]
pub struct PkgConfigResolver {
    program: String,
}

impl Default for PkgConfigResolver {
    fn default() -> Self {
        Self {
            program: DEFAULT_PKG_CONFIG.to_string(),
        }
    }
}

impl PkgConfigResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different pkg-config binary (e.g. a cross `pkg-config` wrapper).
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

#[async_trait]
impl PackageResolverPort for PkgConfigResolver {
    fn name(&self) -> &str {
        "pkg-config"
    }

    async fn resolve(&self, spec: &DependencySpec) -> Result<PathBuf, ResolveError> {
        let module = spec.pkg_config_module();
        let output = run_captured(&self.program, &["--variable=libdir", module])
            .await
            .map_err(|e| tool_error(&self.program, e))?;

        // pkg-config exits 1 with a "not found" message for unknown modules.
        if !output.success {
            return Err(ResolveError::NotFound(module.to_string()));
        }

        let libdir = output.stdout.lines().next().unwrap_or_default().trim();
        if libdir.is_empty() {
            return Err(ResolveError::NotFound(module.to_string()));
        }

        let path = PathBuf::from(libdir);
        if !path.is_absolute() {
            return Err(ResolveError::InvalidPath {
                package: spec.name.to_string(),
                path: libdir.to_string(),
            });
        }
        Ok(path)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use devshell_core::DependencyHandle;
    use std::os::unix::fs::PermissionsExt;

    fn spec(name: &str) -> DependencySpec {
        DependencySpec::new(DependencyHandle::new(name).unwrap())
    }

    fn fake_pkg_config(dir: &std::path::Path, body: &str) -> String {
        let script = dir.join("pkg-config");
        std::fs::write(&script, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        script.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_libdir_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        // Echo the module name back so the hint mapping is visible.
        let program = fake_pkg_config(dir.path(), "echo \"/usr/lib/$2\"");
        let resolver = PkgConfigResolver::new().with_program(program);

        let path = resolver
            .resolve(&spec("libX11").with_pkg_config("x11"))
            .await
            .unwrap();
        assert_eq!(path, PathBuf::from("/usr/lib/x11"));
    }

    #[tokio::test]
    async fn test_unknown_module_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_pkg_config(dir.path(), "echo 'Package foo was not found' >&2; exit 1");
        let resolver = PkgConfigResolver::new().with_program(program);

        assert_eq!(
            resolver.resolve(&spec("foo")).await,
            Err(ResolveError::NotFound("foo".to_string()))
        );
    }

    #[tokio::test]
    async fn test_empty_or_relative_libdir_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let empty = PkgConfigResolver::new().with_program(fake_pkg_config(dir.path(), "echo"));
        assert!(matches!(
            empty.resolve(&spec("x")).await,
            Err(ResolveError::NotFound(_))
        ));

        let other = tempfile::tempdir().unwrap();
        let relative =
            PkgConfigResolver::new().with_program(fake_pkg_config(other.path(), "echo lib"));
        assert!(matches!(
            relative.resolve(&spec("x")).await,
            Err(ResolveError::InvalidPath { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_program_is_unavailable() {
        let resolver = PkgConfigResolver::new().with_program("devshell-no-such-pkg-config");
        assert!(matches!(
            resolver.resolve(&spec("x11")).await,
            Err(ResolveError::Unavailable { .. })
        ));
    }
}
