//! Package resolver adapters.
//!
//! Each adapter implements `PackageResolverPort` from devshell-core on top
//! of an external package database.

mod fixed;
mod nix;
mod pkg_config;

use std::io;
use std::sync::Arc;

use devshell_core::{Manifest, PackageResolverPort, ResolveError, ResolverKind};

pub use fixed::StaticResolver;
pub use nix::{DEFAULT_NIX_BUILD, DEFAULT_NIXPKGS, NixResolver};
pub use pkg_config::{DEFAULT_PKG_CONFIG, PkgConfigResolver};

/// Build the resolver for `kind`, configured from the manifest.
pub fn build_resolver(kind: ResolverKind, manifest: &Manifest) -> Arc<dyn PackageResolverPort> {
    match kind {
        ResolverKind::Nix => Arc::new(NixResolver::new(&manifest.lib_subdir)),
        ResolverKind::PkgConfig => Arc::new(PkgConfigResolver::new()),
        ResolverKind::Static => Arc::new(StaticResolver::new(&manifest.lib_subdir)),
    }
}

/// Map a failure to start a resolver tool.
fn tool_error(program: &str, err: io::Error) -> ResolveError {
    let reason = if err.kind() == io::ErrorKind::NotFound {
        format!("{program} not found in PATH")
    } else {
        err.to_string()
    };
    ResolveError::Unavailable {
        resolver: program.to_string(),
        reason,
    }
}
