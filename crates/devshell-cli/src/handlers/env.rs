//! Env command handler.
//!
//! Resolves the manifest and prints the composed variable, typically for
//! `eval "$(devshell env)"`.

use anyhow::Result;
use devshell_core::ComposedEnvironment;
use serde_json::json;

use crate::bootstrap::CliContext;
use crate::commands::{OutputFormat, ResolveArgs};
use crate::error::CliError;

/// Quote a value for POSIX shells using single quotes.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Render a composed environment in the requested format.
pub fn render(env: &ComposedEnvironment, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Export => format!("export {}={}", env.variable, shell_quote(&env.value)),
        OutputFormat::Value => env.value.clone(),
        OutputFormat::Json => serde_json::to_string_pretty(&json!({
            "variable": env.variable,
            "value": env.value,
            "resolved": env.resolved,
            "skipped": env.skipped,
        }))?,
    })
}

/// Execute the env command.
pub async fn execute(ctx: &CliContext, args: &ResolveArgs, format: OutputFormat) -> Result<()> {
    let existing = ctx.existing_value(args.no_inherit)?;
    let env = ctx
        .environment(args.resolver)
        .compose_environment(&ctx.manifest, existing.as_deref())
        .await
        .map_err(CliError::from)?;

    println!("{}", render(&env, format)?);
    Ok(())
}
