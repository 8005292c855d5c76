//! Plan document loader - extracts the phase list from a plan document
//!
//! A plan is markdown with YAML front matter. Phases come from the front
//! matter `phases:` list when it is present and valid; otherwise they are
//! recovered from `## Phase <n>: <title>` headers in the body.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

mod extraction;

pub use extraction::extract_header_phases;

use crate::parser::split_frontmatter;
use crate::plan::schema::{PlanFrontmatter, PlanPhase};

/// Errors that prevent a plan document from being read at all
#[derive(Debug, Error)]
pub enum PlanLoadError {
    #[error("Plan file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read plan file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Front matter missing, unterminated or not YAML
    #[error("Failed to parse YAML frontmatter: {0}")]
    Frontmatter(String),
}

impl PlanLoadError {
    /// Name the plan file as `shown` instead of the path that was read
    pub fn shown_as(self, shown: &Path) -> Self {
        match self {
            Self::NotFound(_) => Self::NotFound(shown.to_path_buf()),
            Self::Read { source, .. } => Self::Read {
                path: shown.to_path_buf(),
                source,
            },
            other => other,
        }
    }
}

/// Where the phase list of a loaded plan came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseSource {
    Frontmatter,
    Headers,
}

/// Result of loading a plan document
#[derive(Debug, Clone)]
pub struct LoadedPlan {
    /// Front matter, when it matched the plan schema
    pub frontmatter: Option<PlanFrontmatter>,
    /// Why the front matter did not match the plan schema
    pub frontmatter_error: Option<String>,
    pub phases: Vec<PlanPhase>,
    pub phase_source: PhaseSource,
    pub body: String,
}

impl LoadedPlan {
    /// Find a phase by its normalized id
    pub fn phase(&self, id: &str) -> Option<&PlanPhase> {
        self.phases.iter().find(|p| p.id.as_str() == id)
    }
}

/// Read a plan document from disk
pub fn read_plan(path: &Path) -> Result<String, PlanLoadError> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            PlanLoadError::NotFound(path.to_path_buf())
        } else {
            PlanLoadError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Load and parse a plan document. Front matter must be present and parse as YAML.
pub fn load_plan(path: &Path) -> Result<LoadedPlan, PlanLoadError> {
    let content = read_plan(path)?;
    debug!(path = %path.display(), bytes = content.len(), "loaded plan document");
    parse_plan_content(&content)
}

/// Parse plan content (for testing without file system)
pub fn parse_plan_content(content: &str) -> Result<LoadedPlan, PlanLoadError> {
    let doc = split_frontmatter(content).map_err(|e| PlanLoadError::Frontmatter(format!("{e:#}")))?;

    let (frontmatter, frontmatter_error) =
        match serde_yaml::from_value::<PlanFrontmatter>(doc.frontmatter) {
            Ok(fm) => (Some(fm), None),
            Err(e) => (None, Some(e.to_string())),
        };

    Ok(assemble(frontmatter, frontmatter_error, doc.body))
}

/// Parse plan content, treating unreadable front matter as absent.
///
/// Used where a best-effort phase list is enough: the whole document is then
/// scanned for phase headers.
pub fn parse_plan_content_lenient(content: &str) -> LoadedPlan {
    match parse_plan_content(content) {
        Ok(plan) => plan,
        Err(e) => {
            debug!(error = %e, "front matter unusable, falling back to phase headers");
            assemble(None, Some(e.to_string()), content.to_string())
        }
    }
}

fn assemble(
    frontmatter: Option<PlanFrontmatter>,
    frontmatter_error: Option<String>,
    body: String,
) -> LoadedPlan {
    // A declared list is authoritative even when empty
    let declared = frontmatter.as_ref().and_then(|fm| fm.phases.clone());

    let (phases, phase_source) = match declared {
        Some(phases) => (phases, PhaseSource::Frontmatter),
        None => (extract_header_phases(&body), PhaseSource::Headers),
    };

    debug!(count = phases.len(), source = ?phase_source, "extracted plan phases");

    LoadedPlan {
        frontmatter,
        frontmatter_error,
        phases,
        phase_source,
        body,
    }
}
