//! Compose command handler.
//!
//! Exposes the pure composer directly, with no manifest and no resolver.

use anyhow::Result;
use devshell_core::compose;

use crate::bootstrap::read_existing;
use crate::error::CliError;

/// Pick the existing value: literal flag, then a named variable.
pub fn existing_value(
    existing: Option<String>,
    from_env: Option<&str>,
) -> Result<Option<String>, CliError> {
    match (existing, from_env) {
        (Some(value), _) => Ok(Some(value)),
        (None, Some(name)) => read_existing(name),
        (None, None) => Ok(None),
    }
}

/// Execute the compose command.
pub fn execute(existing: Option<String>, from_env: Option<&str>, paths: &[String]) -> Result<()> {
    let existing = existing_value(existing, from_env)?;
    println!("{}", compose(existing.as_deref(), paths));
    Ok(())
}
