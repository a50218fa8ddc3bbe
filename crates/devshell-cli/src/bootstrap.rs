//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Manifest discovery and loading (via devshell-core paths)
//! - Package resolver selection (via devshell-runtime)
//! - Session launcher (via devshell-runtime)
//!
//! It is also the only place that reads the process environment on behalf
//! of the core.

use std::env;
use std::sync::Arc;

use devshell_core::paths::{ManifestLocation, resolve_manifest_location};
use devshell_core::{
    CoreError, EnvironmentService, Manifest, ResolverKind, SessionLauncherPort,
};
use devshell_runtime::{ShellLauncher, build_resolver};
use tracing::debug;

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Manifest named on the command line.
    pub manifest: Option<String>,
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// The active manifest.
    pub manifest: Manifest,
    /// Where the manifest came from.
    pub location: ManifestLocation,
    /// Session launcher for `devshell shell`.
    pub launcher: Arc<dyn SessionLauncherPort>,
}

impl CliContext {
    /// Resolver kind to use: the command-line choice wins over the manifest.
    pub fn resolver_kind(&self, requested: Option<ResolverKind>) -> ResolverKind {
        requested.unwrap_or(self.manifest.resolver)
    }

    /// Build the environment service for the chosen resolver.
    pub fn environment(&self, requested: Option<ResolverKind>) -> EnvironmentService {
        let kind = self.resolver_kind(requested);
        debug!(resolver = %kind, "Using package resolver");
        EnvironmentService::new(build_resolver(kind, &self.manifest))
    }

    /// Current value of the manifest's variable, unless inheritance is off.
    pub fn existing_value(&self, no_inherit: bool) -> Result<Option<String>, CliError> {
        if no_inherit {
            return Ok(None);
        }
        read_existing(&self.manifest.variable)
    }
}

/// Read a path-list variable from the process environment.
///
/// Unset is `None`. A value that is not valid UTF-8 is an error rather than
/// absent, so it is never silently replaced.
pub fn read_existing(name: &str) -> Result<Option<String>, CliError> {
    env::var_os(name)
        .map(|value| {
            value.into_string().map_err(|_| {
                CliError::Config(format!(
                    "{name} is not valid UTF-8 and cannot be extended"
                ))
            })
        })
        .transpose()
}

/// Locate and load the manifest, and wire the adapters.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    let location = resolve_manifest_location(config.manifest.as_deref()).map_err(CoreError::from)?;

    let manifest = match &location.path {
        Some(path) => Manifest::load(path).map_err(CoreError::from)?,
        None => Manifest::with_defaults(),
    };
    debug!(
        source = %location.source,
        dependencies = manifest.dependencies.len(),
        "Loaded manifest"
    );

    Ok(CliContext {
        manifest,
        location,
        launcher: Arc::new(ShellLauncher::new()),
    })
}
