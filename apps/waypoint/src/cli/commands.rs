//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::config::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::error::AppError;
use crate::features;
use crate::replay::{self, Script, StepReport};
use std::path::Path;
use waypoint_core::{Access, CompositionRoot, MergedGraph, Outcome};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Load the configuration named on the command line, or the default file.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, AppError> {
    match path {
        Some(path) => AppConfig::load(path, true),
        None => AppConfig::load(Path::new(DEFAULT_CONFIG_FILE), false),
    }
}

/// Merge the graphs of every enabled feature.
fn merged_graph(config: &AppConfig) -> Result<MergedGraph, AppError> {
    Ok(features::registry(config)?.merge()?)
}

fn print_json(output: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(output).unwrap_or_default()
    );
}

// =============================================================================
// GRAPH COMMAND
// =============================================================================

/// Print the merged navigation graph.
pub fn cmd_graph(config: &AppConfig, json_mode: bool) -> Result<(), AppError> {
    let graph = merged_graph(config)?;

    if json_mode {
        let screens: serde_json::Map<String, serde_json::Value> = graph
            .screens()
            .map(|(destination, entry)| {
                (
                    destination.to_string(),
                    serde_json::json!({
                        "feature": entry.feature,
                        "access": entry.access,
                    }),
                )
            })
            .collect();
        print_json(&serde_json::json!({
            "screen_count": graph.len(),
            "roots": config.roots,
            "features": graph.features(),
            "screens": screens,
        }));
        return Ok(());
    }

    println!("Waypoint Navigation Graph");
    println!("=========================");
    for (feature, destinations) in graph.features() {
        println!();
        println!("{} ({} screens)", feature, destinations.len());
        for destination in destinations {
            let lock = match graph.get(destination).map(|entry| entry.access) {
                Some(Access::Public) => "",
                _ => "  [protected]",
            };
            println!("  {}{}", destination, lock);
        }
    }
    println!();
    println!("Roots:");
    println!("  Signed out: {}", config.roots.signed_out);
    println!("  Signed in:  {}", config.roots.signed_in);
    println!();
    println!("Total: {} screens", graph.len());

    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Validate configuration and feature registration.
///
/// Fails with the core's error on an identifier collision or an invalid root.
pub fn cmd_check(config: &AppConfig, json_mode: bool) -> Result<(), AppError> {
    let root = CompositionRoot::new(
        merged_graph(config)?,
        config.roots.clone(),
        config.initial_auth,
    )?;
    let features: Vec<&str> = root.graph().features().into_keys().collect();

    if json_mode {
        print_json(&serde_json::json!({
            "status": "ok",
            "features": features,
            "screen_count": root.graph().len(),
            "roots": root.roots(),
            "initial_auth": root.auth(),
            "start": root.current(),
        }));
        return Ok(());
    }

    println!("Configuration OK");
    println!("  Features: {}", features.join(", "));
    println!("  Screens:  {}", root.graph().len());
    println!(
        "  Roots:    {} (signed out), {} (signed in)",
        root.roots().signed_out,
        root.roots().signed_in
    );
    println!("  Auth:     {}", root.auth());
    println!("  Start:    {}", root.current());

    Ok(())
}

// =============================================================================
// REPLAY COMMAND
// =============================================================================

/// Replay a scripted navigation session.
pub async fn cmd_replay(config: &AppConfig, json_mode: bool, script: &Path) -> Result<(), AppError> {
    let script = Script::load(script)?;
    tracing::info!(steps = script.steps.len(), "Replaying session");

    let reports = replay::replay(config, &script).await?;

    if json_mode {
        print_json(&serde_json::json!({
            "steps": reports,
            "final_stack": reports.last().map(|report| &report.stack),
        }));
        return Ok(());
    }

    println!("Waypoint Replay");
    println!("===============");
    for report in &reports {
        print_report(report);
    }
    if reports.len() < script.steps.len() {
        println!();
        println!(
            "Stopped after {} of {} steps",
            reports.len(),
            script.steps.len()
        );
    }

    Ok(())
}

fn print_report(report: &StepReport) {
    let outcome = report
        .outcome
        .as_ref()
        .map_or_else(|| "no change".to_string(), describe);
    let stack: Vec<&str> = report.stack.iter().map(|d| d.as_str()).collect();
    println!("{:>4}. {:<40} {}", report.step, report.action, outcome);
    println!("      stack: {}", stack.join(" > "));
    if report.superseded > 0 {
        println!("      superseded: {}", report.superseded);
    }
}

fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Pushed { destination } => format!("pushed {}", destination),
        Outcome::Reused { destination } => format!("reused {}", destination),
        Outcome::Popped { from, to } => format!("popped {} -> {}", from, to),
        Outcome::AtRoot { destination } => format!("at root {}", destination),
        Outcome::Blocked { destination } => format!("blocked {} (sign-in required)", destination),
        Outcome::RootReset { auth, root } => format!("{} -> root {}", auth, root),
    }
}
