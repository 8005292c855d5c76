//! Dependency graph display
//!
//! Usage: maestro graph <plan>
//!
//! ## Module Organization
//!
//! - `display`: level layout and critical path formatting
//! - `colors`: phase color assignment for visual differentiation

mod colors;
mod display;


use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use crate::config::Config;
use crate::plan::graph::analyze;
use crate::plan::parser::load_plan;

pub use colors::phase_color;
pub use display::build_graph_display;

/// Show the dependency graph of a plan
pub fn show(config: &Config, plan_path: &Path) -> Result<()> {
    let path = config.resolve_path(plan_path);
    let plan = load_plan(&path).with_context(|| format!("Failed to load plan {}", path.display()))?;
    let analysis = analyze(&plan.phases);

    println!();
    println!("Dependency Graph:");
    println!("=================");
    println!();

    let display = build_graph_display(&plan.phases, &analysis)?;
    println!("{display}");

    if !analysis.file_conflicts.is_empty() {
        println!();
        for conflict in &analysis.file_conflicts {
            println!("{} {conflict}", "⚠".yellow().bold());
        }
    }

    println!();
    print!("Legend: ");
    print!("{} ", "★".yellow().bold());
    print!("critical path  ");
    print!("{} ", "○".dimmed());
    print!("off critical path  ");
    print!("{} ", "?".magenta().bold());
    println!("unknown prerequisite");
    println!();

    info!(phases = plan.phases.len(), "displayed dependency graph");
    Ok(())
}
