//! Paths command handler.
//!
//! Shows which manifest is in effect and why.

use anyhow::Result;
use devshell_core::paths::{MANIFEST_ENV_VAR, config_root};

use crate::bootstrap::CliContext;

/// Execute the paths command in `key = value` format.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let manifest = ctx
        .location
        .path
        .as_ref()
        .map_or_else(|| "(none)".to_string(), |p| p.display().to_string());
    let config_dir = config_root()
        .map_or_else(|| "(unknown)".to_string(), |p| p.display().to_string());

    println!("manifest = {manifest}");
    println!("source = {}", ctx.location.source);
    println!("config_dir = {config_dir}");
    println!("env_override = {MANIFEST_ENV_VAR}");
    println!("variable = {}", ctx.manifest.variable);
    println!("resolver = {}", ctx.manifest.resolver);
    Ok(())
}
