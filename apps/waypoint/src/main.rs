//! # Waypoint - Feature-Composed Navigation
//!
//! The main binary for the Waypoint navigation shell.
//!
//! This application provides:
//! - Startup merge of every enabled feature's screen graph
//! - Configuration checks (collisions, invalid roots)
//! - Scripted session replay through the live shell
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    apps/waypoint (THE BINARY)                   │
//! │                                                                 │
//! │  ┌─────────────┐    ┌─────────────┐    ┌──────────────────┐    │
//! │  │   CLI       │    │  Features   │    │  Replay driver   │    │
//! │  │  (clap)     │    │ (contribs)  │    │ (tokio + watch)  │    │
//! │  └──────┬──────┘    └──────┬──────┘    └────────┬─────────┘    │
//! │         │                  │                    │               │
//! │         └──────────────────┼────────────────────┘               │
//! │                            ▼                                    │
//! │                    ┌───────────────┐                            │
//! │                    │ waypoint-core │                            │
//! │                    │ (THE LOGIC)   │                            │
//! │                    └───────────────┘                            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! waypoint graph
//! waypoint check --config waypoint.toml
//! waypoint replay --script demos/session.toml --json-mode
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use waypoint::cli;

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // WAYPOINT_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("WAYPOINT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("waypoint={default_level},waypoint_core={default_level}").into()
    });

    // Logs go to stderr so --json-mode output stays parseable.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Waypoint startup banner.
fn print_banner() {
    println!(
        r#"
  Waypoint v{}
  feature graphs in, one shell out
"#,
        env!("CARGO_PKG_VERSION")
    );
}
