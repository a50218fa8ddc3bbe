//! Interactive session launcher.
//!
//! Spawns the requested program with the composed assignments applied on
//! top of the inherited environment and waits for it to finish. Ctrl-C is
//! left to the child: the terminal delivers it to the whole foreground
//! process group, so the launcher only swallows its own copy.

use std::env;
use std::process::ExitStatus;

use async_trait::async_trait;
use devshell_core::{LaunchError, SessionLauncherPort, SessionOutcome, SessionRequest};
use tokio::process::Command;
use tracing::{debug, info};

/// Fallback when neither the caller nor `$SHELL` names a shell.
#[cfg(unix)]
pub const FALLBACK_SHELL: &str = "/bin/sh";

/// Fallback when neither the caller nor `%COMSPEC%` names a shell.
#[cfg(windows)]
pub const FALLBACK_SHELL: &str = "cmd.exe";

/// Pick the interactive shell: explicit choice, then the user's login
/// shell, then [`FALLBACK_SHELL`].
pub fn default_shell(configured: Option<&str>) -> String {
    #[cfg(unix)]
    let from_env = env::var("SHELL").ok();
    #[cfg(windows)]
    let from_env = env::var("COMSPEC").ok();

    select_shell(configured, from_env.as_deref())
}

fn select_shell(configured: Option<&str>, from_env: Option<&str>) -> String {
    configured
        .into_iter()
        .chain(from_env)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(FALLBACK_SHELL)
        .to_string()
}

/// `SessionLauncherPort` backed by `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct ShellLauncher;

impl ShellLauncher {
    pub const fn new() -> Self {
        Self
    }

    fn command(request: &SessionRequest) -> Command {
        let mut cmd = Command::new(&request.program);
        cmd.args(&request.args);
        for (name, value) in &request.env {
            cmd.env(name, value);
        }
        cmd
    }
}

fn outcome_from_status(status: ExitStatus) -> SessionOutcome {
    #[cfg(unix)]
    let signal = std::os::unix::process::ExitStatusExt::signal(&status);
    #[cfg(not(unix))]
    let signal = None;

    SessionOutcome {
        exit_code: status.code(),
        signal,
    }
}

#[async_trait]
impl SessionLauncherPort for ShellLauncher {
    async fn launch(&self, request: &SessionRequest) -> Result<SessionOutcome, LaunchError> {
        if request.program.trim().is_empty() {
            return Err(LaunchError::InvalidRequest(
                "no program to launch".to_string(),
            ));
        }

        info!(program = %request.program, args = ?request.args, "Launching session");
        for (name, value) in &request.env {
            debug!(%name, %value, "Session environment");
        }

        let mut child = Self::command(request)
            .spawn()
            .map_err(|e| LaunchError::SpawnFailed {
                program: request.program.clone(),
                reason: e.to_string(),
            })?;

        let waited = loop {
            tokio::select! {
                status = child.wait() => break status,
                _ = tokio::signal::ctrl_c() => {
                    debug!("Interrupt received; leaving it to the session");
                }
            }
        };
        let status = waited.map_err(|e| LaunchError::WaitFailed {
            program: request.program.clone(),
            reason: e.to_string(),
        })?;

        let outcome = outcome_from_status(status);
        debug!(?outcome, "Session finished");
        Ok(outcome)
    }
}
