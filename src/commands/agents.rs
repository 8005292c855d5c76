//! List the agent definitions available to plans

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;

/// Execute the agents command
pub fn execute(config: &Config) -> Result<()> {
    let registry = config.registry();
    let agents = registry.describe()?;

    if agents.is_empty() {
        println!(
            "No agent definitions found in {}",
            registry.dir().display().to_string().dimmed()
        );
        return Ok(());
    }

    println!("{} ({})", "Agents:".bold(), registry.dir().display());
    for agent in &agents {
        match &agent.description {
            Some(description) => println!("  {} - {description}", agent.name.cyan()),
            None => println!("  {}", agent.name.cyan()),
        }
    }

    Ok(())
}
