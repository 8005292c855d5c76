use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use maestro::commands::{agents, context, graph, validate};
use maestro::config::{Config, ConfigOverrides};
use maestro::logging;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "maestro")]
#[command(about = "Plan validation and context tracking for multi-agent orchestration", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Project root (default: current directory)
    #[arg(long, global = true)]
    project_root: Option<PathBuf>,

    /// State directory (default: $MAESTRO_STATE_DIR or .gemini)
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Agent definitions directory (default: $EXTENSION_PATH/agents or ./agents)
    #[arg(long, global = true)]
    agents_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a plan: structure, dependencies, agents and file conflicts
    Validate {
        /// Path to the plan file
        plan_path: PathBuf,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show parallel batches and the critical path of a plan
    Graph {
        /// Path to the plan file
        plan_path: PathBuf,
    },

    /// Assemble upstream context for a phase about to be delegated
    Context {
        /// Phase ID as written in the plan
        phase_id: String,

        /// Path to the plan file
        plan_path: PathBuf,
    },

    /// List available agent definitions
    Agents,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let config = Config::resolve(ConfigOverrides {
        project_root: cli.project_root,
        state_dir: cli.state_dir,
        agents_dir: cli.agents_dir,
    })?;

    match cli.command {
        Commands::Validate { plan_path, json } => {
            let valid = validate::execute(&config, &plan_path, json)?;
            Ok(if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Graph { plan_path } => {
            graph::show(&config, &plan_path)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Context {
            phase_id,
            plan_path,
        } => {
            context::execute(&config, &phase_id, &plan_path)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Agents => {
            agents::execute(&config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_validate_with_globals() {
        let cli = Cli::try_parse_from([
            "maestro",
            "-vv",
            "validate",
            "plan.md",
            "--json",
            "--state-dir",
            "state",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.state_dir, Some(PathBuf::from("state")));
        match cli.command {
            Commands::Validate { plan_path, json } => {
                assert_eq!(plan_path, PathBuf::from("plan.md"));
                assert!(json);
            }
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn test_context_accepts_dotted_phase_ids() {
        for id in ["3", "1.5", "api.v2"] {
            let cli = Cli::try_parse_from(["maestro", "context", id, "plan.md"]).unwrap();
            match cli.command {
                Commands::Context { phase_id, .. } => assert_eq!(phase_id, id),
                _ => panic!("expected context"),
            }
        }
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["maestro", "-q", "-v", "agents"]).is_err());
    }
}
