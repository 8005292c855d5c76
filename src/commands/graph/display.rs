//! Graph display formatting
//!
//! Renders a plan's parallel batches as levels, marking phases on the
//! critical path.

use std::collections::HashSet;

use anyhow::{bail, Result};
use colored::Colorize;

use crate::plan::graph::GraphAnalysis;
use crate::plan::schema::PlanPhase;

use super::colors::phase_color;

const CRITICAL_MARK: &str = "★";
const PHASE_MARK: &str = "○";

/// Format prerequisites, flagging ids that name no phase
fn format_dependencies(phase: &PlanPhase, known: &HashSet<&str>) -> String {
    if phase.blocked_by.is_empty() {
        return String::new();
    }

    let deps: Vec<String> = phase
        .blocked_by
        .iter()
        .map(|dep| {
            if known.contains(dep.as_str()) {
                dep.to_string()
            } else {
                format!("{}{dep}", "?".magenta().bold())
            }
        })
        .collect();

    format!(" ← {}", deps.join(", "))
}

/// Build the layered view of a plan.
///
/// # Errors
///
/// Fails when batches cannot be computed, which only happens on cyclic plans.
pub fn build_graph_display(phases: &[PlanPhase], analysis: &GraphAnalysis) -> Result<String> {
    if phases.is_empty() {
        return Ok("(no phases found in plan)".to_string());
    }

    let batches = match &analysis.parallel_batches {
        Ok(batches) => batches,
        Err(e) => bail!("{e}"),
    };

    let known: HashSet<&str> = phases.iter().map(|p| p.id.as_str()).collect();
    let critical: HashSet<&str> = analysis
        .critical_path
        .as_ref()
        .map(|path| path.iter().map(String::as_str).collect())
        .unwrap_or_default();

    let mut output = String::new();

    for (level, batch) in batches.iter().enumerate() {
        let header = if level == 0 {
            "Level 0 (no dependencies):".to_string()
        } else {
            format!("Level {level}:")
        };
        output.push_str(&header);
        output.push('\n');

        for id in batch {
            let Some(phase) = phases.iter().find(|p| p.id.as_str() == id) else {
                continue;
            };
            let mark = if critical.contains(id.as_str()) {
                CRITICAL_MARK.yellow().bold()
            } else {
                PHASE_MARK.dimmed()
            };
            let label = phase.label().unwrap_or("(untitled)").color(phase_color(id));
            let deps = format_dependencies(phase, &known);
            output.push_str(&format!("  {mark} {label} ({id}){deps}\n"));
        }

        output.push('\n');
    }

    if let Ok(path) = &analysis.critical_path {
        let chain: Vec<String> = path
            .iter()
            .map(|id| id.color(phase_color(id)).to_string())
            .collect();
        output.push_str(&format!(
            "{} {} ({} phases)\n",
            "Critical path:".bold(),
            chain.join(" → "),
            path.len()
        ));
    }

    Ok(output)
}
