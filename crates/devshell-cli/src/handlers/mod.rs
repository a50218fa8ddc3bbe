//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call core services
//!   3. Format output for the terminal
//!
//! Handlers should NOT contain composition logic of their own. Output meant
//! for `eval` goes to stdout; everything else goes through `tracing` to
//! stderr.

pub mod compose;
pub mod deps;
pub mod env;
pub mod init;
pub mod paths;
pub mod shell;
