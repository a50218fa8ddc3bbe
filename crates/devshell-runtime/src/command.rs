//! Captured execution of resolver tools.

use std::io;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

/// Output of a finished tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    /// The last non-empty line of stderr, for error messages.
    pub fn stderr_tail(&self) -> String {
        self.stderr
            .lines()
            .map(str::trim)
            .rfind(|l| !l.is_empty())
            .unwrap_or("no output")
            .to_string()
    }
}

/// Run `program args...` with stdin closed and both output streams captured.
pub async fn run_captured(program: &str, args: &[&str]) -> io::Result<CapturedOutput> {
    debug!(program, ?args, "Running resolver command");

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await?;

    Ok(CapturedOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_tail_picks_last_line() {
        let out = CapturedOutput {
            success: false,
            stdout: String::new(),
            stderr: "warning: x\nerror: attribute 'nope' missing\n\n".to_string(),
        };
        assert_eq!(out.stderr_tail(), "error: attribute 'nope' missing");
    }

    #[test]
    fn test_stderr_tail_when_silent() {
        let out = CapturedOutput {
            success: false,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert_eq!(out.stderr_tail(), "no output");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_captured_collects_streams() {
        let out = run_captured("sh", &["-c", "echo out; echo err >&2; exit 4"])
            .await
            .unwrap();
        assert!(!out.success);
        assert_eq!(out.stdout.trim(), "out");
        assert_eq!(out.stderr_tail(), "err");
    }

    #[tokio::test]
    async fn test_run_captured_missing_program() {
        let err = run_captured("devshell-definitely-not-installed", &[])
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
