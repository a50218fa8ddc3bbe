//! Manifest domain types and validation.
//!
//! The manifest is the declarative configuration surface: which
//! dependencies to make available, which resolver turns them into
//! directories, and which variable receives the composed value.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Component, Path};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{DEFAULT_LIBRARY_PATH_VAR, DependencyHandle, DependencySpec};

/// Default directory, relative to a package prefix, holding shared libraries.
pub const DEFAULT_LIB_SUBDIR: &str = "lib";

/// File name looked up in the working directory and the config directory.
pub const MANIFEST_FILE_NAME: &str = "devshell.json";

/// Which external package resolver turns dependency handles into paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolverKind {
    /// Realise packages through `nix-build` against `<nixpkgs>`.
    #[default]
    Nix,
    /// Ask `pkg-config` for each module's `libdir`.
    PkgConfig,
    /// Use the fixed `path` of each manifest entry.
    Static,
}

impl ResolverKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nix => "nix",
            Self::PkgConfig => "pkg-config",
            Self::Static => "static",
        }
    }
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolverKind {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nix" => Ok(Self::Nix),
            "pkg-config" | "pkgconfig" => Ok(Self::PkgConfig),
            "static" => Ok(Self::Static),
            other => Err(ManifestError::UnknownResolver(other.to_string())),
        }
    }
}

/// Errors raised while loading, saving or validating a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to write manifest {path}: {reason}")]
    Write { path: String, reason: String },

    #[error("Invalid manifest {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Environment variable name {0:?} is not a shell identifier")]
    InvalidVariable(String),

    #[error("Dependency '{0}' is declared more than once")]
    DuplicateDependency(String),

    #[error("Library subdirectory {0:?} must be a relative path without '..'")]
    InvalidLibSubdir(String),

    #[error("Unknown resolver '{0}' (expected nix, pkg-config or static)")]
    UnknownResolver(String),
}

/// The declarative dependency list plus composition settings.
///
/// All fields are defaulted so a manifest file only needs to state what
/// differs from [`Manifest::with_defaults`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Variable that receives the composed value.
    pub variable: String,

    /// Resolver used when the command line does not pick one.
    pub resolver: ResolverKind,

    /// Directory under each package prefix that holds shared libraries.
    pub lib_subdir: String,

    /// Program launched by `devshell shell` when no command is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,

    /// Dependencies in declaration order.
    pub dependencies: Vec<DependencySpec>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Manifest {
    /// Manifest for a graphics, windowing, audio and profiling toolchain.
    pub fn with_defaults() -> Self {
        Self {
            variable: DEFAULT_LIBRARY_PATH_VAR.to_string(),
            resolver: ResolverKind::default(),
            lib_subdir: DEFAULT_LIB_SUBDIR.to_string(),
            shell: None,
            dependencies: default_dependencies(),
        }
    }

    /// An empty manifest with default settings.
    pub fn empty() -> Self {
        Self {
            dependencies: Vec::new(),
            ..Self::with_defaults()
        }
    }

    /// Look up a dependency by name.
    pub fn dependency(&self, name: &str) -> Option<&DependencySpec> {
        self.dependencies.iter().find(|d| d.name.as_str() == name)
    }

    /// Load and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|e| ManifestError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let manifest: Self =
            serde_json::from_str(&content).map_err(|e| ManifestError::Parse {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        validate_manifest(&manifest)?;
        Ok(manifest)
    }

    /// Write the manifest as pretty JSON, with a trailing newline.
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        let write_err = |reason: String| ManifestError::Write {
            path: path.display().to_string(),
            reason,
        };
        let mut json = serde_json::to_string_pretty(self).map_err(|e| write_err(e.to_string()))?;
        json.push('\n');
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }
        fs::write(path, json).map_err(|e| write_err(e.to_string()))
    }
}

/// Whether `name` is a POSIX shell identifier (`[A-Za-z_][A-Za-z0-9_]*`).
///
/// The variable name is printed unquoted in `export NAME=...` lines.
pub fn is_valid_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate a manifest.
pub fn validate_manifest(manifest: &Manifest) -> Result<(), ManifestError> {
    if !is_valid_variable_name(&manifest.variable) {
        return Err(ManifestError::InvalidVariable(manifest.variable.clone()));
    }

    let subdir = Path::new(&manifest.lib_subdir);
    if subdir.is_absolute()
        || subdir
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(ManifestError::InvalidLibSubdir(manifest.lib_subdir.clone()));
    }

    let mut seen = HashSet::new();
    for dep in &manifest.dependencies {
        if !seen.insert(dep.name.as_str()) {
            return Err(ManifestError::DuplicateDependency(dep.name.to_string()));
        }
    }

    Ok(())
}

fn default_dependencies() -> Vec<DependencySpec> {
    // (name, nix attribute, pkg-config module, optional)
    const DEFAULTS: &[(&str, &str, Option<&str>, bool)] = &[
        ("pkg-config", "pkg-config", None, true),
        ("libX11", "xorg.libX11", Some("x11"), false),
        ("libXcursor", "xorg.libXcursor", Some("xcursor"), false),
        ("libXrandr", "xorg.libXrandr", Some("xrandr"), false),
        ("libXi", "xorg.libXi", Some("xi"), false),
        ("libxcb", "xorg.libxcb", Some("xcb"), false),
        ("libxkbcommon", "libxkbcommon", Some("xkbcommon"), false),
        ("vulkan-loader", "vulkan-loader", Some("vulkan"), false),
        ("wayland", "wayland", Some("wayland-client"), false),
        ("pulseaudio", "pulseaudio", Some("libpulse"), false),
        ("perf", "linuxPackages.perf", None, true),
    ];

    DEFAULTS
        .iter()
        .filter_map(|&(name, attr, pkg_config, optional)| {
            let mut spec = DependencySpec::new(DependencyHandle::new(name).ok()?).with_attr(attr);
            if let Some(module) = pkg_config {
                spec = spec.with_pkg_config(module);
            }
            Some(if optional { spec.optional() } else { spec })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let manifest = Manifest::with_defaults();
        validate_manifest(&manifest).unwrap();
        assert_eq!(manifest.variable, "LD_LIBRARY_PATH");
        assert_eq!(manifest.resolver, ResolverKind::Nix);
        assert_eq!(manifest.dependencies.len(), 11);
    }

    #[test]
    fn test_defaults_keep_declaration_order() {
        let manifest = Manifest::with_defaults();
        let names: Vec<&str> = manifest
            .dependencies
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "pkg-config",
                "libX11",
                "libXcursor",
                "libXrandr",
                "libXi",
                "libxcb",
                "libxkbcommon",
                "vulkan-loader",
                "wayland",
                "pulseaudio",
                "perf"
            ]
        );
    }

    #[test]
    fn test_default_hints() {
        let manifest = Manifest::with_defaults();
        let x11 = manifest.dependency("libX11").unwrap();
        assert_eq!(x11.nix_attr(), "xorg.libX11");
        assert_eq!(x11.pkg_config_module(), "x11");
        assert!(manifest.dependency("perf").unwrap().optional);
        assert!(manifest.dependency("nope").is_none());
    }

    #[test]
    fn test_partial_manifest_fills_defaults() {
        let manifest: Manifest =
            serde_json::from_str(r#"{"variable":"DYLD_LIBRARY_PATH","dependencies":[]}"#).unwrap();
        assert_eq!(manifest.variable, "DYLD_LIBRARY_PATH");
        assert_eq!(manifest.lib_subdir, "lib");
        assert!(manifest.dependencies.is_empty());
    }

    #[test]
    fn test_resolver_kind_parsing() {
        assert_eq!("nix".parse::<ResolverKind>().unwrap(), ResolverKind::Nix);
        assert_eq!(
            "PKG-CONFIG".parse::<ResolverKind>().unwrap(),
            ResolverKind::PkgConfig
        );
        assert_eq!(
            "static".parse::<ResolverKind>().unwrap(),
            ResolverKind::Static
        );
        assert!(matches!(
            "brew".parse::<ResolverKind>(),
            Err(ManifestError::UnknownResolver(_))
        ));
        let kind: ResolverKind = serde_json::from_str(r#""pkg-config""#).unwrap();
        assert_eq!(kind, ResolverKind::PkgConfig);
    }

    #[test]
    fn test_validate_rejects_bad_variable() {
        for bad in [
            "",
            "A=B",
            "LD LIBRARY",
            "1PATH",
            "LD-LIBRARY",
            "X;touch${IFS}f;Y",
            "$(id)",
            "LIBRÄRY",
        ] {
            let manifest = Manifest {
                variable: bad.to_string(),
                ..Manifest::empty()
            };
            assert!(matches!(
                validate_manifest(&manifest),
                Err(ManifestError::InvalidVariable(_))
            ));
        }
    }

    #[test]
    fn test_variable_name_rules() {
        for ok in ["LD_LIBRARY_PATH", "DYLD_LIBRARY_PATH", "_X", "a1"] {
            assert!(is_valid_variable_name(ok), "{ok} should be accepted");
        }
        assert!(!is_valid_variable_name("9"));
        assert!(!is_valid_variable_name("A B"));
    }

    #[test]
    fn test_validate_rejects_escaping_lib_subdir() {
        for bad in ["/lib", "../lib", "lib/../../x"] {
            let manifest = Manifest {
                lib_subdir: bad.to_string(),
                ..Manifest::empty()
            };
            assert!(matches!(
                validate_manifest(&manifest),
                Err(ManifestError::InvalidLibSubdir(_))
            ));
        }
        let nested = Manifest {
            lib_subdir: "lib/x86_64-linux-gnu".to_string(),
            ..Manifest::empty()
        };
        validate_manifest(&nested).unwrap();
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut manifest = Manifest::with_defaults();
        let dup = manifest.dependencies[1].clone();
        manifest.dependencies.push(dup);
        assert!(matches!(
            validate_manifest(&manifest),
            Err(ManifestError::DuplicateDependency(name)) if name == "libX11"
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(MANIFEST_FILE_NAME);
        let manifest = Manifest {
            shell: Some("/bin/zsh".to_string()),
            resolver: ResolverKind::Static,
            ..Manifest::with_defaults()
        };
        manifest.save(&path).unwrap();
        assert_eq!(Manifest::load(&path).unwrap(), manifest);
    }

    #[test]
    fn test_load_reports_parse_and_validation_errors() {
        let dir = tempfile::tempdir().unwrap();

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            Manifest::load(&broken),
            Err(ManifestError::Parse { .. })
        ));

        let invalid = dir.path().join("invalid.json");
        fs::write(&invalid, r#"{"variable":""}"#).unwrap();
        assert!(matches!(
            Manifest::load(&invalid),
            Err(ManifestError::InvalidVariable(_))
        ));

        assert!(matches!(
            Manifest::load(&dir.path().join("missing.json")),
            Err(ManifestError::Read { .. })
        ));
    }
}
