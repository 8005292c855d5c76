//! Validation report returned to the orchestrating agent

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_id: Option<String>,
    pub message: String,
}

impl Issue {
    pub fn error(phase_id: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            phase_id: phase_id.map(String::from),
            message: message.into(),
        }
    }

    pub fn warning(phase_id: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            phase_id: phase_id.map(String::from),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseNode {
    pub id: String,
    pub depends_on: Vec<String>,
    /// Index into `parallel_batches`, or -1 when batches could not be computed
    pub parallel_group: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraphReport {
    pub phases: Vec<PhaseNode>,
    pub critical_path: Vec<String>,
    pub parallel_batches: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    /// Absent when the plan could not be read far enough to analyze
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_graph: Option<DependencyGraphReport>,
}

impl ValidationReport {
    /// Report for input that failed before any phase was extracted
    pub fn input_error(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![Issue::error(None, message)],
            warnings: Vec::new(),
            dependency_graph: None,
        }
    }
}

/// Accumulates findings; validity is decided once at the end
#[derive(Debug, Default)]
pub(super) struct ReportBuilder {
    errors: Vec<Issue>,
    warnings: Vec<Issue>,
}

impl ReportBuilder {
    pub(super) fn error(&mut self, phase_id: Option<&str>, message: impl Into<String>) {
        self.errors.push(Issue::error(phase_id, message));
    }

    pub(super) fn warning(&mut self, phase_id: Option<&str>, message: impl Into<String>) {
        self.warnings.push(Issue::warning(phase_id, message));
    }

    pub(super) fn finish(self, graph: DependencyGraphReport) -> ValidationReport {
        ValidationReport {
            valid: self.errors.is_empty(),
            errors: self.errors,
            warnings: self.warnings,
            dependency_graph: Some(graph),
        }
    }
}
