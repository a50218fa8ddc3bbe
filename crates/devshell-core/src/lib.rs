#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod manifest;
pub mod paths;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    DEFAULT_LIBRARY_PATH_VAR, DependencyHandle, DependencySpec, HandleError, LibraryPathList,
    PATH_LIST_SEPARATOR, ResolvedDependency, compose,
};
pub use manifest::{
    DEFAULT_LIB_SUBDIR, MANIFEST_FILE_NAME, Manifest, ManifestError, ResolverKind,
    is_valid_variable_name, validate_manifest,
};
pub use paths::{ManifestLocation, ManifestSource, PathError, resolve_manifest_location};
pub use ports::{
    CoreError, LaunchError, MapResolver, PackageResolverPort, ResolveError, SessionLauncherPort,
    SessionOutcome, SessionRequest,
};
pub use services::{
    ComposedEnvironment, DependencyReport, DependencyStatus, EnvironmentService,
    SkippedDependency,
};
