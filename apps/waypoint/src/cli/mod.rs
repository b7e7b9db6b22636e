//! # Waypoint CLI Module
//!
//! This module implements the CLI interface for Waypoint.
//!
//! ## Available Commands
//!
//! - `graph` - Print the merged navigation graph
//! - `check` - Validate configuration and feature registration
//! - `replay` - Run a scripted navigation session through the shell

mod commands;

use crate::error::AppError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Waypoint - feature-composed navigation
///
/// Merges every feature's screen graph at startup and routes navigation
/// intents through a single shell.
#[derive(Parser, Debug)]
#[command(name = "waypoint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the configuration file [default: waypoint.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the merged navigation graph
    Graph,

    /// Validate configuration and feature registration
    Check,

    /// Replay a scripted navigation session
    Replay {
        /// Path to the TOML script
        #[arg(short, long)]
        script: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), AppError> {
    let config = load_config(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Graph) => cmd_graph(&config, json_mode),
        Some(Commands::Replay { script }) => cmd_replay(&config, json_mode, &script).await,
        Some(Commands::Check) | None => cmd_check(&config, json_mode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "waypoint",
            "replay",
            "--script",
            "session.toml",
            "--json-mode",
            "-c",
            "custom.toml",
        ])
        .expect("parse");

        assert!(cli.json_mode);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(
            cli.command,
            Some(Commands::Replay { script }) if script == PathBuf::from("session.toml")
        ));
    }

    #[test]
    fn no_subcommand_is_accepted() {
        let cli = Cli::try_parse_from(["waypoint", "-q"]).expect("parse");
        assert!(cli.quiet);
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn replay_requires_script() {
        assert!(Cli::try_parse_from(["waypoint", "replay"]).is_err());
    }
}
