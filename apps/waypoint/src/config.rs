//! # Configuration
//!
//! `waypoint.toml` selects the enabled features, the root entry points and the
//! authentication state the shell starts in.
//!
//! ```toml
//! features = ["auth", "home", "places", "profile", "alerts"]
//! initial_auth = "unauthenticated"
//!
//! [roots]
//! signed_out = "auth/sign-in"
//! signed_in = "home"
//! ```

use crate::error::AppError;
use crate::features;
use serde::{Deserialize, Serialize};
use std::path::Path;
use waypoint_core::{AuthState, RootEntries};

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "waypoint.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Features whose graphs are registered at startup.
    #[serde(default = "default_features")]
    pub features: Vec<String>,

    /// Authentication state before the auth collaborator reports anything.
    #[serde(default)]
    pub initial_auth: AuthState,

    /// Start destination per authentication state.
    #[serde(default = "default_roots")]
    pub roots: RootEntries,
}

fn default_features() -> Vec<String> {
    features::ALL.iter().map(|name| (*name).to_string()).collect()
}

fn default_roots() -> RootEntries {
    RootEntries::new(features::auth::SIGN_IN, features::home::HOME)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            features: default_features(),
            initial_auth: AuthState::default(),
            roots: default_roots(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, AppError> {
        let config: Self =
            toml::from_str(source).map_err(|e| AppError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration file.
    ///
    /// A missing file is only tolerated when it is the implicit default
    /// (`explicit == false`); built-in defaults are used then.
    pub fn load(path: &Path, explicit: bool) -> Result<Self, AppError> {
        if !path.exists() && !explicit {
            tracing::info!(
                "No {} found, using built-in configuration",
                path.display()
            );
            return Ok(Self::default());
        }

        let source = std::fs::read_to_string(path).map_err(|e| {
            AppError::Io(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(?config, "Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check that every enabled feature exists and none is listed twice.
    pub fn validate(&self) -> Result<(), AppError> {
        for (i, name) in self.features.iter().enumerate() {
            if !features::ALL.contains(&name.as_str()) {
                return Err(AppError::Config(format!(
                    "Unknown feature '{}' (available: {})",
                    name,
                    features::ALL.join(", ")
                )));
            }
            if self.features[..i].contains(name) {
                return Err(AppError::Config(format!(
                    "Feature '{}' is listed more than once",
                    name
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
