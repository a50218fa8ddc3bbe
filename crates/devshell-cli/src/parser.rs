//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for composing library search paths into a
/// development shell.
#[derive(Parser)]
#[command(name = "devshell")]
#[command(about = "Compose native library search paths and launch a development shell")]
#[command(version)]
pub struct Cli {
    /// Manifest file to use instead of the discovered one
    #[arg(long, global = true)]
    pub manifest: Option<String>,

    /// Enable verbose/debug logging on stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
