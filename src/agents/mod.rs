//! Agent registry: which agent definitions exist
//!
//! Agents are markdown files in a directory, one per agent, named
//! `<agent>.md`. Validation only needs to know whether a name resolves;
//! listing also reads the optional front matter description.


use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::parser::parse_from_markdown;
use crate::validation::validate_name;

/// Lookup of known agent names
pub trait AgentRegistry {
    fn exists(&self, name: &str) -> bool;
}

/// Front matter fields read from an agent definition
#[derive(Debug, Deserialize)]
struct AgentFrontmatter {
    #[serde(default)]
    description: Option<String>,
}

/// An agent definition found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentInfo {
    pub name: String,
    pub description: Option<String>,
    pub path: PathBuf,
}

/// Registry backed by a directory of `<name>.md` files
#[derive(Debug, Clone)]
pub struct DirectoryRegistry {
    dir: PathBuf,
}

impl DirectoryRegistry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the definition file for `name`, if the name is safe to join
    pub fn definition_path(&self, name: &str) -> Option<PathBuf> {
        validate_name(name).ok()?;
        Some(self.dir.join(format!("{name}.md")))
    }

    /// Agent names present in the directory, sorted. A missing directory is empty.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            debug!(dir = %self.dir.display(), "agents directory does not exist");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read agents directory: {}", self.dir.display()))?;

        let mut names: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
            .filter_map(|path| path.file_stem()?.to_str().map(String::from))
            .filter(|name| validate_name(name).is_ok())
            .collect();
        names.sort();

        Ok(names)
    }

    /// Every agent definition with its description, sorted by name
    pub fn describe(&self) -> Result<Vec<AgentInfo>> {
        let mut agents = Vec::new();

        for name in self.list()? {
            let path = self.dir.join(format!("{name}.md"));
            let description = match read_description(&path) {
                Ok(description) => description,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "could not read agent front matter");
                    None
                }
            };
            agents.push(AgentInfo {
                name,
                description,
                path,
            });
        }

        Ok(agents)
    }
}

impl AgentRegistry for DirectoryRegistry {
    fn exists(&self, name: &str) -> bool {
        let found = self
            .definition_path(name)
            .is_some_and(|path| path.is_file());
        debug!(agent = name, found, "agent lookup");
        found
    }
}

/// Read the `description` field of an agent definition. Files without
/// front matter simply have no description.
fn read_description(path: &Path) -> Result<Option<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read agent definition: {}", path.display()))?;

    let has_frontmatter = content
        .lines()
        .next()
        .is_some_and(|line| line.trim().starts_with("---"));
    if !has_frontmatter {
        return Ok(None);
    }

    let (frontmatter, _body): (Option<AgentFrontmatter>, String) =
        parse_from_markdown(&content, "agent definition")?;

    Ok(frontmatter
        .and_then(|fm| fm.description)
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty()))
}
