//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` to exit codes and user-facing messages.

use devshell_core::{CoreError, LaunchError, ResolveError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Argument error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Manifest or path configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The package resolver could not be run at all.
    #[error("{0}")]
    Unavailable(String),

    /// Process execution error.
    #[error("Process error: {0}")]
    Process(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,    // EX_USAGE
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Process(_) => 71,     // EX_OSERR
            Self::Io(_) => 74,          // EX_IOERR
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Resolve {
                source: ResolveError::Unavailable { .. },
                ..
            } => Self::Unavailable(err.to_string()),
            CoreError::Resolve { .. } => Self::Core(err.to_string()),
            CoreError::Launch(LaunchError::InvalidRequest(msg)) => Self::Arguments(msg),
            CoreError::Launch(launch_err) => Self::Process(launch_err.to_string()),
            CoreError::Manifest(manifest_err) => Self::Config(manifest_err.to_string()),
            CoreError::Path(path_err) => Self::Config(path_err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error returned by a handler.
///
/// Handlers return `anyhow::Error`; a `CliError` or `CoreError` anywhere in
/// the chain decides the code, anything else is a general error.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(cli) = cause.downcast_ref::<CliError>() {
            return cli.exit_code();
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use devshell_core::{ManifestError, PathError};

    #[test]
    fn test_resolver_unavailable_maps_to_ex_unavailable() {
        let err = CliError::from(CoreError::Resolve {
            name: "wayland".to_string(),
            source: ResolveError::Unavailable {
                resolver: "nix-build".to_string(),
                reason: "nix-build not found in PATH".to_string(),
            },
        });
        assert_eq!(err.exit_code(), 69);
        assert!(err.to_string().contains("wayland"));
    }

    #[test]
    fn test_missing_package_is_general_error() {
        let err = CliError::from(CoreError::Resolve {
            name: "libXi".to_string(),
            source: ResolveError::NotFound("libXi".to_string()),
        });
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_config_errors_map_to_ex_config() {
        let err = CliError::from(CoreError::Manifest(ManifestError::InvalidVariable(
            String::new(),
        )));
        assert_eq!(err.exit_code(), 78);
        let err = CliError::from(CoreError::Path(PathError::EmptyPath));
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_launch_errors() {
        let err = CliError::from(CoreError::Launch(LaunchError::SpawnFailed {
            program: "zsh".to_string(),
            reason: "No such file or directory".to_string(),
        }));
        assert_eq!(err.exit_code(), 71);
        let err = CliError::from(CoreError::Launch(LaunchError::InvalidRequest(
            "no program".to_string(),
        )));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_for_walks_anyhow_chain() {
        let err = anyhow::Error::new(CliError::Io("disk full".to_string())).context("writing");
        assert_eq!(exit_code_for(&err), 74);
        assert_eq!(exit_code_for(&anyhow::anyhow!("plain")), 1);
    }
}
