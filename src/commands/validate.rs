//! Plan validation command
//!
//! Prints a colored summary by default, or the full report as JSON for the
//! orchestrating agent.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use crate::config::Config;
use crate::plan::validate::{validate_plan_file_as, Issue, ValidationReport};

/// Execute the validate command. Returns whether the plan is valid.
pub fn execute(config: &Config, plan_path: &Path, json: bool) -> Result<bool> {
    let path = config.resolve_path(plan_path);
    let registry = config.registry();
    let report = validate_plan_file_as(&path, plan_path, &registry);

    if json {
        let out = serde_json::to_string_pretty(&report)
            .context("Failed to serialize validation report")?;
        println!("{out}");
    } else {
        print!("{}", render_report(&report));
    }

    Ok(report.valid)
}

fn render_issue(marker: &str, issue: &Issue) -> String {
    format!("  {marker} {}\n", issue.message)
}

/// Human-readable summary of a report
pub fn render_report(report: &ValidationReport) -> String {
    let mut out = String::new();

    if !report.errors.is_empty() {
        out.push_str(&format!("{}\n", "Errors:".bold()));
        for issue in &report.errors {
            out.push_str(&render_issue(&"✗".red().bold().to_string(), issue));
        }
        out.push('\n');
    }

    if !report.warnings.is_empty() {
        out.push_str(&format!("{}\n", "Warnings:".bold()));
        for issue in &report.warnings {
            out.push_str(&render_issue(&"⚠".yellow().bold().to_string(), issue));
        }
        out.push('\n');
    }

    if let Some(graph) = &report.dependency_graph {
        if !graph.parallel_batches.is_empty() {
            out.push_str(&format!("{}\n", "Parallel batches:".bold()));
            for (idx, batch) in graph.parallel_batches.iter().enumerate() {
                out.push_str(&format!("  {idx}: {}\n", batch.join(", ")));
            }
        }
        if !graph.critical_path.is_empty() {
            out.push_str(&format!(
                "{} {}\n",
                "Critical path:".bold(),
                graph.critical_path.join(" → ")
            ));
        }
        out.push('\n');
    }

    if report.valid {
        out.push_str(&format!(
            "{} Plan is valid ({} warning(s))\n",
            "✓".green().bold(),
            report.warnings.len()
        ));
    } else {
        out.push_str(&format!(
            "{} Plan is invalid ({} error(s), {} warning(s))\n",
            "✗".red().bold(),
            report.errors.len(),
            report.warnings.len()
        ));
    }

    out
}
