//! Environment service: resolve the manifest, then compose.
//!
//! The service owns no environment state. Callers pass in the variable's
//! current value and receive the composed value back.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::{DependencyHandle, LibraryPathList, ResolvedDependency};
use crate::manifest::{Manifest, validate_manifest};
use crate::ports::{CoreError, PackageResolverPort};

/// An optional dependency that failed to resolve and was left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDependency {
    pub name: DependencyHandle,
    pub reason: String,
}

/// Result of composing a manifest onto an existing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedEnvironment {
    /// Variable the value is meant for.
    pub variable: String,
    /// The composed value.
    pub value: String,
    /// Dependencies that contributed a directory, in declaration order.
    pub resolved: Vec<ResolvedDependency>,
    /// Optional dependencies that were left out.
    pub skipped: Vec<SkippedDependency>,
}

impl ComposedEnvironment {
    /// The `(name, value)` pair to hand to a session launcher.
    pub fn assignment(&self) -> (String, String) {
        (self.variable.clone(), self.value.clone())
    }

    /// Directories contributed by this composition.
    pub fn library_paths(&self) -> LibraryPathList {
        self.resolved.iter().map(|r| r.lib_dir.clone()).collect()
    }
}

/// Per-dependency resolution status, as reported by `deps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DependencyStatus {
    Resolved { lib_dir: PathBuf },
    Failed { reason: String },
}

/// Resolution report for one manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    pub name: DependencyHandle,
    pub optional: bool,
    #[serde(flatten)]
    pub status: DependencyStatus,
}

impl DependencyReport {
    pub const fn is_resolved(&self) -> bool {
        matches!(self.status, DependencyStatus::Resolved { .. })
    }
}

/// Orchestrates resolution and composition for a manifest.
#[derive(Clone)]
pub struct EnvironmentService {
    resolver: Arc<dyn PackageResolverPort>,
}

impl EnvironmentService {
    pub fn new(resolver: Arc<dyn PackageResolverPort>) -> Self {
        Self { resolver }
    }

    /// Resolve every dependency in declaration order and compose the
    /// resulting directories onto `existing`.
    ///
    /// The first failing required dependency aborts composition. Failing
    /// optional dependencies are logged and skipped.
    pub async fn compose_environment(
        &self,
        manifest: &Manifest,
        existing: Option<&str>,
    ) -> Result<ComposedEnvironment, CoreError> {
        validate_manifest(manifest)?;

        let mut resolved = Vec::with_capacity(manifest.dependencies.len());
        let mut skipped = Vec::new();

        for spec in &manifest.dependencies {
            match self.resolver.resolve(spec).await {
                Ok(lib_dir) => {
                    debug!(dependency = %spec.name, lib_dir = %lib_dir.display(), "Resolved dependency");
                    resolved.push(ResolvedDependency {
                        name: spec.name.clone(),
                        lib_dir,
                    });
                }
                Err(err) if spec.optional => {
                    warn!(dependency = %spec.name, error = %err, "Skipping optional dependency");
                    skipped.push(SkippedDependency {
                        name: spec.name.clone(),
                        reason: err.to_string(),
                    });
                }
                Err(source) => {
                    return Err(CoreError::Resolve {
                        name: spec.name.to_string(),
                        source,
                    });
                }
            }
        }

        let paths: LibraryPathList = resolved.iter().map(|r| r.lib_dir.clone()).collect();
        let value = paths.compose_onto(existing);

        debug!(
            variable = %manifest.variable,
            entries = paths.len(),
            skipped = skipped.len(),
            "Composed library path"
        );

        Ok(ComposedEnvironment {
            variable: manifest.variable.clone(),
            value,
            resolved,
            skipped,
        })
    }

    /// Resolve every dependency and report each outcome. Never fails.
    pub async fn check_dependencies(&self, manifest: &Manifest) -> Vec<DependencyReport> {
        let mut reports = Vec::with_capacity(manifest.dependencies.len());
        for spec in &manifest.dependencies {
            let status = match self.resolver.resolve(spec).await {
                Ok(lib_dir) => DependencyStatus::Resolved { lib_dir },
                Err(err) => DependencyStatus::Failed {
                    reason: err.to_string(),
                },
            };
            reports.push(DependencyReport {
                name: spec.name.clone(),
                optional: spec.optional,
                status,
            });
        }
        reports
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::domain::DependencySpec;
    use crate::ports::package_resolver::MockPackageResolverPort;
    use crate::ports::{MapResolver, ResolveError};

    fn spec(name: &str) -> DependencySpec {
        DependencySpec::new(DependencyHandle::new(name).unwrap())
    }

    fn manifest(specs: Vec<DependencySpec>) -> Manifest {
        Manifest {
            dependencies: specs,
            ..Manifest::empty()
        }
    }

    fn service(resolver: impl PackageResolverPort + 'static) -> EnvironmentService {
        EnvironmentService::new(Arc::new(resolver))
    }

    #[tokio::test]
    async fn test_compose_in_declaration_order() {
        let svc = service(
            MapResolver::new()
                .with("wayland", "/nix/store/bbb-wayland/lib")
                .with("libX11", "/nix/store/aaa-libX11/lib"),
        );
        let m = manifest(vec![spec("libX11"), spec("wayland")]);

        let env = svc.compose_environment(&m, None).await.unwrap();
        assert_eq!(env.variable, "LD_LIBRARY_PATH");
        assert_eq!(
            env.value,
            "/nix/store/aaa-libX11/lib:/nix/store/bbb-wayland/lib"
        );
        assert_eq!(env.resolved.len(), 2);
        assert!(env.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_compose_keeps_existing_prefix() {
        let svc = service(MapResolver::new().with("libs", "/opt/libs/lib"));
        let env = svc
            .compose_environment(&manifest(vec![spec("libs")]), Some("/usr/local/lib"))
            .await
            .unwrap();
        assert_eq!(env.value, "/usr/local/lib:/opt/libs/lib");
        assert_eq!(
            env.assignment(),
            (
                "LD_LIBRARY_PATH".to_string(),
                "/usr/local/lib:/opt/libs/lib".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_empty_manifest_returns_existing() {
        let svc = service(MapResolver::new());
        let env = svc
            .compose_environment(&Manifest::empty(), Some("/usr/lib"))
            .await
            .unwrap();
        assert_eq!(env.value, "/usr/lib");

        let env = svc
            .compose_environment(&Manifest::empty(), None)
            .await
            .unwrap();
        assert_eq!(env.value, "");
    }

    #[tokio::test]
    async fn test_required_failure_is_fatal() {
        let svc = service(MapResolver::new().with("a", "/a/lib"));
        let err = svc
            .compose_environment(&manifest(vec![spec("a"), spec("missing")]), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Resolve { ref name, source: ResolveError::NotFound(_) } if name == "missing"
        ));
    }

    #[tokio::test]
    async fn test_optional_failure_is_skipped() {
        let svc = service(MapResolver::new().with("a", "/a/lib"));
        let env = svc
            .compose_environment(&manifest(vec![spec("perf").optional(), spec("a")]), None)
            .await
            .unwrap();
        assert_eq!(env.value, "/a/lib");
        assert_eq!(env.skipped.len(), 1);
        assert_eq!(env.skipped[0].name.as_str(), "perf");
    }

    #[tokio::test]
    async fn test_invalid_manifest_is_rejected_before_resolving() {
        let mut resolver = MockPackageResolverPort::new();
        resolver.expect_resolve().never();
        let svc = service(resolver);

        let m = Manifest {
            variable: String::new(),
            ..manifest(vec![spec("a")])
        };
        assert!(matches!(
            svc.compose_environment(&m, None).await,
            Err(CoreError::Manifest(_))
        ));
    }

    #[tokio::test]
    async fn test_resolver_called_once_per_dependency() {
        let mut resolver = MockPackageResolverPort::new();
        resolver
            .expect_resolve()
            .times(3)
            .returning(|s| Ok(PathBuf::from(format!("/store/{}/lib", s.name))));
        let svc = service(resolver);

        let env = svc
            .compose_environment(&manifest(vec![spec("x"), spec("y"), spec("x2")]), None)
            .await
            .unwrap();
        assert_eq!(env.value, "/store/x/lib:/store/y/lib:/store/x2/lib");
        assert_eq!(env.library_paths().len(), 3);
    }

    #[tokio::test]
    async fn test_check_dependencies_reports_every_entry() {
        let svc = service(MapResolver::new().with("a", "/a/lib"));
        let reports = svc
            .check_dependencies(&manifest(vec![spec("a"), spec("b").optional()]))
            .await;
        assert_eq!(reports.len(), 2);
        assert!(reports[0].is_resolved());
        assert!(!reports[1].is_resolved());
        assert!(reports[1].optional);

        let json = serde_json::to_value(&reports[0]).unwrap();
        assert_eq!(json["status"], "resolved");
        assert_eq!(json["lib_dir"], "/a/lib");
    }
}
