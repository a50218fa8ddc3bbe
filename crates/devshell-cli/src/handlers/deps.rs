//! Deps command handler.
//!
//! Resolves every manifest entry and prints one line per dependency.

use anyhow::{Result, bail};
use devshell_core::{DependencyReport, DependencyStatus, ResolverKind};

use crate::bootstrap::CliContext;

/// Format one report line.
pub fn format_report(report: &DependencyReport) -> String {
    let marker = match (&report.status, report.optional) {
        (DependencyStatus::Resolved { .. }, _) => "ok",
        (DependencyStatus::Failed { .. }, true) => "skip",
        (DependencyStatus::Failed { .. }, false) => "FAIL",
    };
    let detail = match &report.status {
        DependencyStatus::Resolved { lib_dir } => lib_dir.display().to_string(),
        DependencyStatus::Failed { reason } => reason.clone(),
    };
    format!("{marker:<5} {:<16} {detail}", report.name.as_str())
}

/// Execute the deps command.
///
/// Fails when any required dependency did not resolve.
pub async fn execute(ctx: &CliContext, resolver: Option<ResolverKind>, json: bool) -> Result<()> {
    let kind = ctx.resolver_kind(resolver);
    let reports = ctx.environment(resolver).check_dependencies(&ctx.manifest).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!(
            "{} dependencies, resolver: {kind}, variable: {}\n",
            reports.len(),
            ctx.manifest.variable
        );
        for report in &reports {
            println!("{}", format_report(report));
        }
    }

    let missing: Vec<&str> = reports
        .iter()
        .filter(|r| !r.optional && !r.is_resolved())
        .map(|r| r.name.as_str())
        .collect();
    if !missing.is_empty() {
        bail!("Required dependencies not available: {}", missing.join(", "));
    }
    Ok(())
}
