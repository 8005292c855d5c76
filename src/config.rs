//! Resolved paths for a maestro invocation.
//!
//! Each setting is taken from the first source that provides it: command-line
//! flag, environment variable, `<project_root>/.maestro/config.toml`, built-in
//! default. Relative paths are resolved against the project root.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::agents::DirectoryRegistry;

/// Config file location, relative to the project root
pub const CONFIG_FILE: &str = ".maestro/config.toml";

/// State directory used when nothing else is configured
pub const DEFAULT_STATE_DIR: &str = ".gemini";

/// Overrides the state directory
pub const STATE_DIR_ENV: &str = "MAESTRO_STATE_DIR";

/// Extension install directory; agents live in its `agents/` subdirectory
pub const EXTENSION_PATH_ENV: &str = "EXTENSION_PATH";

/// Values read from the project config file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    state_dir: Option<String>,
    agents_dir: Option<String>,
}

impl FileConfig {
    fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(CONFIG_FILE);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: FileConfig = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        debug!(path = %config_path.display(), "loaded project config");
        Ok(config)
    }
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub project_root: Option<PathBuf>,
    pub state_dir: Option<PathBuf>,
    pub agents_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub project_root: PathBuf,
    pub state_dir: PathBuf,
    pub agents_dir: PathBuf,
}

impl Config {
    /// Resolve configuration from overrides, the process environment and the
    /// project config file.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        Self::resolve_with(overrides, |key| env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup
    pub fn resolve_with(
        overrides: ConfigOverrides,
        lookup_env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let project_root = match overrides.project_root {
            Some(root) => root,
            None => env::current_dir().context("Failed to determine current directory")?,
        };

        let file = FileConfig::load(&project_root)?;
        let env_value = |key: &str| lookup_env(key).filter(|v| !v.trim().is_empty());

        let state_dir = overrides
            .state_dir
            .or_else(|| env_value(STATE_DIR_ENV).map(PathBuf::from))
            .or_else(|| file.state_dir.as_deref().map(expand_tilde))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR));

        let agents_dir = overrides
            .agents_dir
            .or_else(|| env_value(EXTENSION_PATH_ENV).map(|ext| PathBuf::from(ext).join("agents")))
            .or_else(|| file.agents_dir.as_deref().map(expand_tilde))
            .unwrap_or_else(|| PathBuf::from("agents"));

        let config = Self {
            state_dir: project_root.join(state_dir),
            agents_dir: project_root.join(agents_dir),
            project_root,
        };

        debug!(
            project_root = %config.project_root.display(),
            state_dir = %config.state_dir.display(),
            agents_dir = %config.agents_dir.display(),
            "resolved configuration"
        );

        Ok(config)
    }

    /// Resolve a user-supplied path against the project root
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        self.project_root.join(path)
    }

    pub fn registry(&self) -> DirectoryRegistry {
        DirectoryRegistry::new(&self.agents_dir)
    }
}

/// Expand a leading `~/` to the home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}
