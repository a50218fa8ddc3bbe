//! CLI entry point - the composition root.
//!
//! Logging goes to stderr so that `eval "$(devshell env)"` only ever sees
//! the export line on stdout.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use devshell_cli::{Cli, CliConfig, Commands, bootstrap, exit_code_for, handlers};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(0);
    };

    let config = CliConfig {
        manifest: cli.manifest,
    };

    match command {
        Commands::Compose {
            existing,
            from_env,
            paths,
        } => {
            handlers::compose::execute(existing, from_env.as_deref(), &paths)?;
        }
        Commands::Init { force, output } => {
            handlers::init::execute(output.as_deref(), force)?;
        }
        Commands::Env { resolve, format } => {
            let ctx = bootstrap(&config)?;
            handlers::env::execute(&ctx, &resolve, format).await?;
        }
        Commands::Shell { resolve, command } => {
            let ctx = bootstrap(&config)?;
            return handlers::shell::execute(&ctx, &resolve, &command).await;
        }
        Commands::Deps { resolver, json } => {
            let ctx = bootstrap(&config)?;
            handlers::deps::execute(&ctx, resolver, json).await?;
        }
        Commands::Paths => {
            let ctx = bootstrap(&config)?;
            handlers::paths::execute(&ctx)?;
        }
    }
    Ok(0)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(u8::try_from(exit_code_for(&err)).unwrap_or(1))
        }
    }
}
