//! Domain types for devshell.
//!
//! Pure data and the environment composer, with no infrastructure
//! dependencies.

mod dependency;
mod library_path;

pub use dependency::{DependencyHandle, DependencySpec, HandleError, ResolvedDependency};
pub use library_path::{DEFAULT_LIBRARY_PATH_VAR, LibraryPathList, PATH_LIST_SEPARATOR, compose};
