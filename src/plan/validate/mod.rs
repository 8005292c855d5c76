//! Plan validation: structural checks plus dependency graph analysis
//!
//! Errors make a plan invalid; warnings are reported but do not. Input
//! failures (missing file, unreadable front matter) short-circuit with a
//! single error and no dependency graph.

mod report;


use std::path::Path;

use tracing::{debug, info};

pub use report::{DependencyGraphReport, Issue, PhaseNode, Severity, ValidationReport};

use report::ReportBuilder;

use crate::agents::AgentRegistry;
use crate::plan::graph::{analyze, DependencyGraph, GraphAnalysis};
use crate::plan::parser::{parse_plan_content, read_plan, LoadedPlan, PlanLoadError};
use crate::plan::schema::PlanPhase;

/// Validate a plan document on disk.
///
/// A missing file or unparseable front matter yields an invalid report with a
/// single error and no dependency graph. Front matter that parses but does
/// not match the plan schema is reported as an error, and phases are then
/// taken from `## Phase <n>: <title>` headers.
pub fn validate_plan_file(path: &Path, registry: &dyn AgentRegistry) -> ValidationReport {
    validate_plan_file_as(path, path, registry)
}

/// Validate the plan at `path`, naming it `shown` in input errors.
///
/// Callers that resolve a user-supplied path pass the original as `shown`.
pub fn validate_plan_file_as(
    path: &Path,
    shown: &Path,
    registry: &dyn AgentRegistry,
) -> ValidationReport {
    let content = match read_plan(path) {
        Ok(content) => content,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "plan could not be read");
            return ValidationReport::input_error(e.shown_as(shown).to_string());
        }
    };

    let report = validate_plan_content(&content, registry);
    info!(
        path = %path.display(),
        valid = report.valid,
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validated plan"
    );
    report
}

/// Validate plan content (for testing without file system)
pub fn validate_plan_content(content: &str, registry: &dyn AgentRegistry) -> ValidationReport {
    match parse_plan_content(content) {
        Ok(plan) => validate_loaded_plan(&plan, registry),
        Err(PlanLoadError::Frontmatter(detail)) => {
            debug!(%detail, "front matter could not be parsed");
            ValidationReport::input_error("Failed to parse YAML frontmatter")
        }
        Err(e) => ValidationReport::input_error(e.to_string()),
    }
}

/// Validate an already loaded plan, including its front matter schema result
pub fn validate_loaded_plan(plan: &LoadedPlan, registry: &dyn AgentRegistry) -> ValidationReport {
    let mut builder = ReportBuilder::default();

    if let Some(detail) = &plan.frontmatter_error {
        builder.error(None, format!("Frontmatter validation failed: {detail}"));
    }

    check_phases(&plan.phases, registry, builder)
}

/// Validate a phase list: structural checks, cycles, file conflicts,
/// parallel batches and the critical path.
pub fn validate_phases(phases: &[PlanPhase], registry: &dyn AgentRegistry) -> ValidationReport {
    check_phases(phases, registry, ReportBuilder::default())
}

fn check_phases(
    phases: &[PlanPhase],
    registry: &dyn AgentRegistry,
    mut builder: ReportBuilder,
) -> ValidationReport {
    if phases.is_empty() {
        builder.error(None, "No phases found in plan");
    }

    let graph = DependencyGraph::new(phases);
    for &id in graph.duplicate_ids() {
        builder.error(Some(id), format!("Duplicate phase id: {id}"));
    }

    for phase in phases {
        check_phase(phase, &graph, registry, &mut builder);
    }

    let analysis = analyze(phases);

    for cycle in &analysis.cycles {
        builder.error(None, format!("Circular dependency: {cycle}"));
    }

    for conflict in &analysis.file_conflicts {
        builder.warning(None, conflict.to_string());
    }

    // The detector and the depth walk see the same cycles; report them once
    if analysis.cycles.is_empty() {
        let graph_errors = [
            analysis.parallel_batches.as_ref().err(),
            analysis.critical_path.as_ref().err(),
        ];
        for err in graph_errors.into_iter().flatten() {
            builder.error(None, err.to_string());
        }
    }

    builder.finish(graph_report(phases, &analysis))
}

fn check_phase(
    phase: &PlanPhase,
    graph: &DependencyGraph<'_>,
    registry: &dyn AgentRegistry,
    builder: &mut ReportBuilder,
) {
    let pid = phase.id.as_str();

    if phase.label().is_none() {
        builder.warning(Some(pid), format!("Phase {pid}: missing title/name"));
    }

    if !phase.has_agent() {
        builder.warning(Some(pid), format!("Phase {pid}: no agent assigned"));
    }

    let mut reported: Vec<&str> = Vec::new();
    for dep in &phase.blocked_by {
        let dep = dep.as_str();
        if !graph.contains(dep) && !reported.contains(&dep) {
            builder.error(
                Some(pid),
                format!("Phase {pid}: blocked_by references non-existent phase {dep}"),
            );
            reported.push(dep);
        }
    }

    for name in phase.agent_names() {
        if name.trim().is_empty() {
            continue;
        }
        if !registry.exists(name) {
            builder.warning(
                Some(pid),
                format!("Phase {pid}: agent '{name}' not found in agents/ directory"),
            );
        }
    }
}

fn graph_report(phases: &[PlanPhase], analysis: &GraphAnalysis) -> DependencyGraphReport {
    let nodes = phases
        .iter()
        .map(|phase| PhaseNode {
            id: phase.id.to_string(),
            depends_on: phase.blocked_by.iter().map(|d| d.to_string()).collect(),
            parallel_group: analysis
                .parallel_group(phase.id.as_str())
                .and_then(|group| i64::try_from(group).ok())
                .unwrap_or(-1),
        })
        .collect();

    DependencyGraphReport {
        phases: nodes,
        critical_path: analysis.critical_path.clone().unwrap_or_default(),
        parallel_batches: analysis.parallel_batches.clone().unwrap_or_default(),
    }
}
