//! Session launcher port.
//!
//! The launcher is the output boundary: it receives the composed
//! assignments and runs a session with them in effect. Nothing in the core
//! mutates the process environment itself.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when launching a session.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The program could not be started.
    #[error("Failed to start {program}: {reason}")]
    SpawnFailed { program: String, reason: String },

    /// Waiting for the session failed.
    #[error("Failed to wait for {program}: {reason}")]
    WaitFailed { program: String, reason: String },

    /// The request itself is unusable.
    #[error("Invalid session request: {0}")]
    InvalidRequest(String),
}

/// What to run and which environment assignments to apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    /// Program to execute (absolute path or looked up in `PATH`).
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// `(name, value)` pairs set on top of the inherited environment.
    pub env: Vec<(String, String)>,
}

impl SessionRequest {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((name.into(), value.into()));
        self
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// Exit code, or `None` when the session was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Terminating signal number, unix only.
    pub signal: Option<i32>,
}

impl SessionOutcome {
    pub const fn exited(code: i32) -> Self {
        Self {
            exit_code: Some(code),
            signal: None,
        }
    }

    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }

    /// Exit status a parent shell would report: the code itself, or
    /// `128 + signal` for signal deaths.
    pub const fn shell_status(&self) -> i32 {
        match (self.exit_code, self.signal) {
            (Some(code), _) => code,
            (None, Some(signal)) => 128 + signal,
            (None, None) => 1,
        }
    }
}

/// Port for running a session with composed environment assignments.
#[async_trait]
pub trait SessionLauncherPort: Send + Sync {
    /// Run the session to completion.
    async fn launch(&self, request: &SessionRequest) -> Result<SessionOutcome, LaunchError>;
}
