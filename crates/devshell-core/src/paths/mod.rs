//! Path utilities for devshell configuration files.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle output separately
//! - OS-specific logic is kept private in `platform`

mod error;
mod manifest;
mod platform;

pub use error::PathError;
pub use manifest::{
    MANIFEST_ENV_VAR, ManifestLocation, ManifestSource, default_manifest_path,
    resolve_manifest_location, resolve_manifest_location_with,
};
pub use platform::config_root;
