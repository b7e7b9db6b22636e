//! # Application Errors
//!
//! Failures of the binary layer. Navigation-core failures are carried through
//! unchanged in [`AppError::Core`].

use thiserror::Error;
use waypoint_core::WaypointError;

/// Errors raised while loading configuration, scripts, or running the shell.
#[derive(Debug, Error)]
pub enum AppError {
    /// Startup or navigation failure reported by the core.
    #[error(transparent)]
    Core(#[from] WaypointError),

    /// The configuration file is malformed or names unknown features.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The replay script is malformed.
    #[error("Script error: {0}")]
    Script(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),

    /// The shell task stopped unexpectedly.
    #[error("Shell task failed: {0}")]
    Shell(String),
}
