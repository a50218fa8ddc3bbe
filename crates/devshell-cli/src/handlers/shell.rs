//! Shell command handler.
//!
//! The imperative edge: the composed value is handed to the launcher,
//! which applies it to the child's environment only.

use anyhow::Result;
use devshell_core::{CoreError, SessionRequest};
use devshell_runtime::default_shell;

use crate::bootstrap::CliContext;
use crate::commands::ResolveArgs;
use crate::error::CliError;

/// Variable set inside the session so prompts and scripts can detect it.
pub const ACTIVE_MARKER_VAR: &str = "DEVSHELL_ACTIVE";

/// Build the launch request for `command`, or the configured shell.
pub fn session_request(
    command: &[String],
    configured_shell: Option<&str>,
    assignment: (String, String),
) -> SessionRequest {
    let request = match command.split_first() {
        Some((program, args)) => SessionRequest::new(program.clone()).with_args(args.iter().cloned()),
        None => SessionRequest::new(default_shell(configured_shell)),
    };
    let (name, value) = assignment;
    request
        .with_env(name, value)
        .with_env(ACTIVE_MARKER_VAR, "1")
}

/// Execute the shell command and return the session's exit status.
pub async fn execute(ctx: &CliContext, args: &ResolveArgs, command: &[String]) -> Result<i32> {
    let existing = ctx.existing_value(args.no_inherit)?;
    let env = ctx
        .environment(args.resolver)
        .compose_environment(&ctx.manifest, existing.as_deref())
        .await
        .map_err(CliError::from)?;

    let request = session_request(command, ctx.manifest.shell.as_deref(), env.assignment());
    let outcome = ctx
        .launcher
        .launch(&request)
        .await
        .map_err(|e| CliError::from(CoreError::from(e)))?;

    Ok(outcome.shell_status())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment() -> (String, String) {
        ("LD_LIBRARY_PATH".to_string(), "/a/lib".to_string())
    }

    #[test]
    fn test_explicit_command_is_used() {
        let command = vec!["cargo".to_string(), "run".to_string()];
        let request = session_request(&command, Some("/bin/zsh"), assignment());
        assert_eq!(request.program, "cargo");
        assert_eq!(request.args, vec!["run".to_string()]);
        assert_eq!(
            request.env,
            vec![
                ("LD_LIBRARY_PATH".to_string(), "/a/lib".to_string()),
                (ACTIVE_MARKER_VAR.to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_configured_shell_when_no_command() {
        let request = session_request(&[], Some("/bin/zsh"), assignment());
        assert_eq!(request.program, "/bin/zsh");
        assert!(request.args.is_empty());
    }
}
