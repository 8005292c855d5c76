//! Shared test helpers: a throwaway project directory

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use maestro::config::{Config, ConfigOverrides};

/// A temporary project with `agents/` and `.gemini/` laid out like a real one
pub struct TestProject {
    temp: TempDir,
    pub config: Config,
}

impl TestProject {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir_all(temp.path().join("agents")).expect("Failed to create agents dir");
        fs::create_dir_all(temp.path().join(".gemini")).expect("Failed to create state dir");

        let config = Config::resolve_with(
            ConfigOverrides {
                project_root: Some(temp.path().to_path_buf()),
                ..Default::default()
            },
            |_| None,
        )
        .expect("Failed to resolve config");

        Self { temp, config }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Write a plan file and return its path relative to the project root
    pub fn write_plan(&self, name: &str, content: &str) -> PathBuf {
        fs::write(self.root().join(name), content).expect("Failed to write plan");
        PathBuf::from(name)
    }

    pub fn add_agent(&self, name: &str) {
        let content = format!("---\nname: {name}\ndescription: The {name} agent\n---\nYou are {name}.\n");
        fs::write(self.config.agents_dir.join(format!("{name}.md")), content)
            .expect("Failed to write agent definition");
    }

    /// Store a batch result file under the state directory
    pub fn add_result(&self, batch: &str, file: &str, content: &str) {
        let dir = self.config.state_dir.join("parallel").join(batch).join("results");
        fs::create_dir_all(&dir).expect("Failed to create results dir");
        fs::write(dir.join(file), content).expect("Failed to write result");
    }
}

/// Build plan front matter from `(id, blocked_by)` pairs; every phase gets
/// a title and the `coder` agent
pub fn plan_with_phases(phases: &[(&str, &[&str])]) -> String {
    let mut plan = String::from("---\ntitle: Test plan\nstatus: draft\nphases:\n");
    for (id, deps) in phases {
        plan.push_str(&format!(
            "  - id: {id}\n    title: Phase {id}\n    agent: coder\n    blocked_by: [{}]\n",
            deps.join(", ")
        ));
    }
    plan.push_str("---\n\n# Test plan\n");
    plan
}
