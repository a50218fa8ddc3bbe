//! Manifest location resolution.

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

use super::error::PathError;
use super::platform::{config_root, normalize_user_path};
use crate::manifest::MANIFEST_FILE_NAME;

/// Environment variable that points at a manifest file.
pub const MANIFEST_ENV_VAR: &str = "DEVSHELL_MANIFEST";

/// Where the active manifest came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestSource {
    /// `--manifest` on the command line.
    Explicit,
    /// `DEVSHELL_MANIFEST` (possibly from `.env`).
    EnvVar,
    /// `./devshell.json` in the working directory.
    WorkingDir,
    /// `devshell.json` in the user config directory.
    ConfigDir,
    /// No file found; the compiled-in defaults apply.
    BuiltIn,
}

impl fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Explicit => "--manifest",
            Self::EnvVar => MANIFEST_ENV_VAR,
            Self::WorkingDir => "working directory",
            Self::ConfigDir => "config directory",
            Self::BuiltIn => "built-in defaults",
        };
        f.write_str(label)
    }
}

/// Resolution result for the manifest file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLocation {
    /// The manifest file, or `None` when the built-in defaults apply.
    pub path: Option<PathBuf>,
    /// How the location was determined.
    pub source: ManifestSource,
}

/// Resolve the manifest location using the process environment.
///
/// Resolution order:
/// 1. Explicit path provided by caller (must exist)
/// 2. `DEVSHELL_MANIFEST` environment variable (must exist)
/// 3. `./devshell.json`
/// 4. `<config dir>/devshell/devshell.json`
/// 5. Built-in defaults
pub fn resolve_manifest_location(explicit: Option<&str>) -> Result<ManifestLocation, PathError> {
    let cwd = env::current_dir().map_err(|e| PathError::CurrentDirError(e.to_string()))?;
    let env_value = env::var(MANIFEST_ENV_VAR).ok();
    resolve_manifest_location_with(explicit, env_value.as_deref(), &cwd, config_root().as_deref())
}

/// Resolution with every input supplied by the caller.
pub fn resolve_manifest_location_with(
    explicit: Option<&str>,
    env_value: Option<&str>,
    cwd: &Path,
    config_dir: Option<&Path>,
) -> Result<ManifestLocation, PathError> {
    let named = explicit
        .map(|p| (p, ManifestSource::Explicit))
        .or_else(|| {
            env_value
                .filter(|v| !v.trim().is_empty())
                .map(|v| (v, ManifestSource::EnvVar))
        });

    if let Some((raw, source)) = named {
        let path = normalize_user_path(raw)?;
        if !path.is_file() {
            return Err(PathError::ManifestNotFound(path));
        }
        return Ok(ManifestLocation {
            path: Some(path),
            source,
        });
    }

    let candidates = [
        Some((cwd.join(MANIFEST_FILE_NAME), ManifestSource::WorkingDir)),
        config_dir.map(|dir| (dir.join(MANIFEST_FILE_NAME), ManifestSource::ConfigDir)),
    ];
    for (path, source) in candidates.into_iter().flatten() {
        if path.is_file() {
            return Ok(ManifestLocation {
                path: Some(path),
                source,
            });
        }
    }

    Ok(ManifestLocation {
        path: None,
        source: ManifestSource::BuiltIn,
    })
}

/// Where `devshell init` writes a new manifest.
pub fn default_manifest_path() -> Result<PathBuf, PathError> {
    env::current_dir()
        .map(|cwd| cwd.join(MANIFEST_FILE_NAME))
        .map_err(|e| PathError::CurrentDirError(e.to_string()))
}
