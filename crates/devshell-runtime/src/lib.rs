#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]

mod command;
pub mod launcher;
pub mod resolver;

// Re-export the launcher implementation
pub use launcher::{FALLBACK_SHELL, ShellLauncher, default_shell};

// Re-export resolver adapters
pub use resolver::{NixResolver, PkgConfigResolver, StaticResolver, build_resolver};
