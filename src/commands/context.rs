//! Context chain command: prints the upstream context for a phase as JSON

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;
use crate::context::{build_context_chain, ContextError};

/// Execute the context command
pub fn execute(config: &Config, phase_id: &str, plan_path: &Path) -> Result<()> {
    let path = config.resolve_path(plan_path);
    let chain = build_context_chain(&config.state_dir, &path, phase_id).map_err(|e| match e {
        ContextError::PlanNotFound(_) => ContextError::PlanNotFound(plan_path.to_path_buf()),
        ContextError::Plan(e) => ContextError::Plan(e.shown_as(plan_path)),
        other => other,
    })?;

    let out = serde_json::to_string_pretty(&chain).context("Failed to serialize context chain")?;
    println!("{out}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_plan_named_as_given() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            project_root: temp.path().to_path_buf(),
            state_dir: temp.path().join(".gemini"),
            agents_dir: temp.path().join("agents"),
        };

        let err = execute(&config, "1", Path::new("nope.md")).unwrap_err();
        assert_eq!(err.to_string(), "Plan file not found: nope.md");
    }
}
