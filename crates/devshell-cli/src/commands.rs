//! Main commands enum and primary subcommands.

use clap::{Args, Subcommand, ValueEnum};
use devshell_core::ResolverKind;

/// How `devshell env` prints the composed value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `export VAR='value'`, ready for `eval`
    #[default]
    Export,
    /// The bare value
    Value,
    /// JSON with the value and every contributing dependency
    Json,
}

/// Options shared by every command that resolves the manifest.
#[derive(Debug, Clone, Default, Args)]
pub struct ResolveArgs {
    /// Resolver to use instead of the manifest's (nix, pkg-config, static)
    #[arg(long, env = "DEVSHELL_RESOLVER")]
    pub resolver: Option<ResolverKind>,

    /// Ignore the variable's current value instead of keeping it as a prefix
    #[arg(long)]
    pub no_inherit: bool,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Compose paths onto a value without resolving anything
    Compose {
        /// Existing value to keep as the prefix
        #[arg(long)]
        existing: Option<String>,
        /// Read the existing value from this environment variable
        #[arg(long, conflicts_with = "existing")]
        from_env: Option<String>,
        /// Library directories to append, in order
        paths: Vec<String>,
    },

    /// Resolve the manifest and print the composed variable
    Env {
        #[command(flatten)]
        resolve: ResolveArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Export)]
        format: OutputFormat,
    },

    /// Resolve the manifest and launch a shell (or COMMAND) with the composed variable
    Shell {
        #[command(flatten)]
        resolve: ResolveArgs,
        /// Command to run instead of the interactive shell
        #[arg(last = true)]
        command: Vec<String>,
    },

    /// Resolve every dependency and report the outcome
    Deps {
        /// Resolver to use instead of the manifest's (nix, pkg-config, static)
        #[arg(long, env = "DEVSHELL_RESOLVER")]
        resolver: Option<ResolverKind>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which manifest is in effect
    Paths,

    /// Write the default manifest to ./devshell.json
    Init {
        /// Overwrite an existing manifest
        #[arg(short, long)]
        force: bool,
        /// Write to this path instead
        #[arg(long)]
        output: Option<String>,
    },
}
