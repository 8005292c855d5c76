//! Plan front matter schema

mod types;


pub use types::{AgentField, PhaseId, PlanFrontmatter, PlanPhase};
