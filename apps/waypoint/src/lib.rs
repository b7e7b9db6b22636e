//! # waypoint
//!
//! The headless Waypoint application shell - THE BINARY's library half.
//!
//! Wires the sample feature modules into a [`waypoint_core::GraphRegistry`],
//! builds the composition root from `waypoint.toml`, and drives the shell from
//! the CLI or a replay script.

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod replay;

pub use config::AppConfig;
pub use error::AppError;
