//! Core services that orchestrate ports and domain logic.

mod environment;

pub use environment::{
    ComposedEnvironment, DependencyReport, DependencyStatus, EnvironmentService,
    SkippedDependency,
};
