//! # Feature Modules
//!
//! Each feature owns its screens and contributes exactly one graph at startup.
//! Features never import each other's destinations for registration; cross
//! feature navigation only happens through the [`Navigator`](waypoint_core::Navigator).
//!
//! [`registry`] is the explicit aggregation step: it collects the contributors
//! of every feature enabled in the configuration.

pub mod alerts;
pub mod auth;
pub mod home;
pub mod places;
pub mod profile;

use crate::config::AppConfig;
use crate::error::AppError;
use waypoint_core::{GraphContributor, GraphRegistry};

/// Every feature this binary ships.
pub const ALL: &[&str] = &["auth", "home", "places", "profile", "alerts"];

/// Look up a feature's contributor by name.
pub fn contributor(name: &str) -> Option<Box<dyn GraphContributor>> {
    match name {
        "auth" => Some(Box::new(auth::AuthGraph)),
        "home" => Some(Box::new(home::HomeGraph)),
        "places" => Some(Box::new(places::PlacesGraph)),
        "profile" => Some(Box::new(profile::ProfileGraph)),
        "alerts" => Some(Box::new(alerts::graph())),
        _ => None,
    }
}

/// Assemble the registry for the enabled features.
pub fn registry(config: &AppConfig) -> Result<GraphRegistry, AppError> {
    let mut builder = GraphRegistry::builder();
    for name in &config.features {
        let contributor = contributor(name)
            .ok_or_else(|| AppError::Config(format!("Unknown feature '{}'", name)))?;
        builder = builder.register_boxed(contributor);
    }
    Ok(builder.build())
}

// =============================================================================
// TESTS
// =============================================================================
