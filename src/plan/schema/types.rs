//! Plan front matter type definitions

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a phase within a plan.
///
/// Plans may write ids as YAML numbers (`id: 3`) or strings (`id: "3"`).
/// Both forms are normalized to the same canonical string at deserialization,
/// so `3` and `"3"` name the same graph node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PhaseId(String);

impl PhaseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PhaseId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for PhaseId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for PhaseId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => Self(n.to_string()),
            // 3.0 renders as "3", matching the integer form
            RawId::Float(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

/// Agent assignment: either a single agent name or a list of names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentField {
    One(String),
    Many(Vec<String>),
}

impl AgentField {
    pub fn names(&self) -> Vec<&str> {
        match self {
            AgentField::One(name) => vec![name.as_str()],
            AgentField::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            AgentField::One(name) => name.trim().is_empty(),
            AgentField::Many(names) => names.is_empty(),
        }
    }
}

/// A phase as declared in the plan front matter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanPhase {
    pub id: PhaseId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<AgentField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<AgentField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Prerequisite phases; this phase cannot start until they finish
    #[serde(default)]
    pub blocked_by: Vec<PhaseId>,
    #[serde(default)]
    pub files_created: Vec<String>,
    #[serde(default)]
    pub files_modified: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_criteria: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
}

impl PlanPhase {
    /// Create a bare phase with no dependencies, files or agents
    pub fn new(id: impl Into<PhaseId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            name: None,
            agent: None,
            agents: None,
            description: None,
            blocked_by: Vec::new(),
            files_created: Vec::new(),
            files_modified: Vec::new(),
            validation_criteria: None,
            validation: None,
            parallel: None,
        }
    }

    /// Title if present, else name. Blank strings count as absent.
    pub fn label(&self) -> Option<&str> {
        [&self.title, &self.name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.trim().is_empty())
    }

    pub fn has_agent(&self) -> bool {
        [&self.agents, &self.agent]
            .into_iter()
            .flatten()
            .any(|field| !field.is_empty())
    }

    /// Agent names assigned to this phase. `agents` takes precedence over `agent`.
    pub fn agent_names(&self) -> Vec<&str> {
        self.agents
            .as_ref()
            .or(self.agent.as_ref())
            .map(AgentField::names)
            .unwrap_or_default()
    }
}

/// Front matter of an implementation plan document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanFrontmatter {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_phases: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_files: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phases: Option<Vec<PlanPhase>>,
}
