//! Plan parsing, analysis and validation
//!
//! This module handles:
//! - Parsing plan documents (markdown with YAML front matter)
//! - Analyzing the phase dependency graph
//! - Validating phases and producing the validation report

pub mod graph;
pub mod parser;
pub mod schema;
pub mod validate;

// Re-export commonly used types
pub use graph::{analyze, DependencyGraph, GraphAnalysis, GraphError};
pub use parser::{load_plan, parse_plan_content, LoadedPlan, PlanLoadError};
pub use schema::{PhaseId, PlanFrontmatter, PlanPhase};
pub use validate::{validate_phases, validate_plan_file, ValidationReport};
