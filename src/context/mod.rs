//! Context chain: upstream hand-off notes for a phase about to be delegated
//!
//! Each completed agent result may carry a `### Downstream Context` section
//! written for the phases that depend on it. Before a phase is dispatched,
//! the sections left by its blocking phases are gathered into one payload.

mod results;


use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::plan::parser::{parse_plan_content_lenient, read_plan, PlanLoadError};

use results::{scan_results, ResultEntry};

pub use results::extract_section;

/// Placeholder chain text when no blocking phase left any context
pub const NO_CONTEXT: &str = "No upstream context available.";

const PART_SEPARATOR: &str = "\n\n---\n\n";

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Plan file not found: {0}")]
    PlanNotFound(PathBuf),

    #[error("Phase '{0}' not found in plan")]
    PhaseNotFound(String),

    #[error(transparent)]
    Plan(PlanLoadError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextChain {
    pub phase_id: String,
    pub blocking_phases: Vec<String>,
    pub context_chain: String,
    /// Blocking phases that left no downstream context
    pub missing_contexts: Vec<String>,
}

/// Assemble the context chain for `phase_id` from results under `state_dir`.
///
/// The plan is loaded leniently: front matter phases when they validate,
/// otherwise `## Phase <n>:` headers. For each blocking phase, a result whose
/// JSON `phase_id` names it is preferred; failing that, the first unclaimed
/// result that records no `phase_id` is used. Each result feeds at most one
/// blocking phase.
pub fn build_context_chain(
    state_dir: &Path,
    plan_path: &Path,
    phase_id: &str,
) -> Result<ContextChain, ContextError> {
    let content = read_plan(plan_path).map_err(|e| match e {
        PlanLoadError::NotFound(path) => ContextError::PlanNotFound(path),
        other => ContextError::Plan(other),
    })?;
    let plan = parse_plan_content_lenient(&content);

    let phase = plan
        .phase(phase_id)
        .ok_or_else(|| ContextError::PhaseNotFound(phase_id.to_string()))?;

    let mut blocking_phases: Vec<String> = Vec::new();
    for dep in &phase.blocked_by {
        if !blocking_phases.iter().any(|b| b == dep.as_str()) {
            blocking_phases.push(dep.to_string());
        }
    }

    let entries = scan_results(state_dir);
    let mut claimed = vec![false; entries.len()];
    let mut parts = Vec::new();
    let mut missing_contexts = Vec::new();

    for blocking_id in &blocking_phases {
        match claim_section(&entries, &mut claimed, blocking_id) {
            Some(entry) => {
                debug!(phase = %blocking_id, path = %entry.path.display(), "found downstream context");
                if let Some(section) = &entry.section {
                    parts.push(format!("## Context from Phase {blocking_id}\n\n{section}"));
                }
            }
            None => missing_contexts.push(blocking_id.clone()),
        }
    }

    info!(
        phase = phase_id,
        found = parts.len(),
        missing = missing_contexts.len(),
        "assembled context chain"
    );

    let context_chain = if parts.is_empty() {
        NO_CONTEXT.to_string()
    } else {
        parts.join(PART_SEPARATOR)
    };

    Ok(ContextChain {
        phase_id: phase_id.to_string(),
        blocking_phases,
        context_chain,
        missing_contexts,
    })
}

fn claim_section<'e>(
    entries: &'e [ResultEntry],
    claimed: &mut [bool],
    blocking_id: &str,
) -> Option<&'e ResultEntry> {
    let available = |idx: &usize| !claimed[*idx] && entries[*idx].section.is_some();

    let idx = (0..entries.len())
        .filter(available)
        .find(|&idx| entries[idx].phase_id.as_deref() == Some(blocking_id))
        .or_else(|| {
            (0..entries.len())
                .filter(available)
                .find(|&idx| entries[idx].phase_id.is_none())
        })?;

    claimed[idx] = true;
    Some(&entries[idx])
}
