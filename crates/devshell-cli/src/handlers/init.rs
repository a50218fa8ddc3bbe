//! Init command handler.
//!
//! Writes the default manifest so it can be edited.

use std::path::{Path, PathBuf};

use anyhow::Result;
use devshell_core::paths::default_manifest_path;
use devshell_core::{CoreError, Manifest};

use crate::error::CliError;

/// Write the default manifest to `path`, refusing to overwrite unless forced.
pub fn write_default_manifest(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::Arguments(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Manifest::with_defaults()
        .save(path)
        .map_err(|e| CliError::from(CoreError::from(e)))
}

/// Execute the init command.
pub fn execute(output: Option<&str>, force: bool) -> Result<()> {
    let path = match output {
        Some(p) => PathBuf::from(p),
        None => default_manifest_path().map_err(|e| CliError::from(CoreError::from(e)))?,
    };
    write_default_manifest(&path, force)?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_loadable_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devshell.json");
        write_default_manifest(&path, false).unwrap();
        assert_eq!(Manifest::load(&path).unwrap(), Manifest::with_defaults());
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("devshell.json");
        std::fs::write(&path, "{}").unwrap();

        let err = write_default_manifest(&path, false).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");

        write_default_manifest(&path, true).unwrap();
        assert!(Manifest::load(&path).is_ok());
    }
}
