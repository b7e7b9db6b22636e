//! # Core Type Definitions
//!
//! This module contains the value types shared by every part of the core:
//! - Screen addressing (`Destination`, `Access`)
//! - Navigation intents (`NavigationEvent`, `NavOptions`, `PopUpTo`)
//! - Authentication gate (`AuthState`)
//! - Error types (`WaypointError`)
//!
//! ## Ordering Guarantees
//!
//! `Destination` implements `Ord` so the merged graph can be kept in a
//! `BTreeMap` and rendered identically regardless of registration order.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// DESTINATION
// =============================================================================

/// Opaque identifier of a navigable screen.
///
/// Chosen by the feature that owns the screen. Equality is structural on the
/// identifier; the core attaches no meaning to its contents.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Destination(String);

impl Destination {
    /// Create a destination from an identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that the identifier can be registered.
    ///
    /// The only rejected identifier is the empty one; anything else is taken
    /// verbatim.
    pub fn validate(&self) -> Result<(), WaypointError> {
        if self.0.is_empty() {
            return Err(WaypointError::InvalidDestination(self.0.clone()));
        }
        Ok(())
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Destination {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Destination {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// =============================================================================
// ACCESS
// =============================================================================

/// Whether a screen may be shown before the user has signed in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Reachable in every authentication state.
    Public,
    /// Reachable only while authenticated.
    #[default]
    Protected,
}

impl Access {
    /// Check if this access level admits the given authentication state.
    #[must_use]
    pub const fn admits(self, auth: AuthState) -> bool {
        matches!(
            (self, auth),
            (Access::Public, _) | (Access::Protected, AuthState::Authenticated)
        )
    }
}

// =============================================================================
// AUTH STATE
// =============================================================================

/// Latest authentication signal supplied by the auth collaborator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    /// No signed-in user; only the sign-in root graph is shown.
    #[default]
    Unauthenticated,
    /// A user is signed in; the full merged graph is shown.
    Authenticated,
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthState::Unauthenticated => f.write_str("unauthenticated"),
            AuthState::Authenticated => f.write_str("authenticated"),
        }
    }
}

// =============================================================================
// NAVIGATION OPTIONS
// =============================================================================

/// Pop entries off the back stack down to `destination` before pushing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopUpTo {
    /// Entry to pop down to.
    pub destination: Destination,
    /// Also pop `destination` itself.
    #[serde(default)]
    pub inclusive: bool,
}

/// Options attached to a `ToDestination` intent.
///
/// The Navigator stores and forwards these untouched. Only the back stack
/// interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NavOptions {
    /// Pop-up-to behaviour applied before the push.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pop_up_to: Option<PopUpTo>,
    /// Reuse the top entry instead of pushing a duplicate of it.
    #[serde(default)]
    pub single_top: bool,
}

impl NavOptions {
    /// Create empty options (plain push).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set single-top behaviour.
    #[must_use]
    pub fn single_top(mut self, single_top: bool) -> Self {
        self.single_top = single_top;
        self
    }

    /// Pop down to `destination` before pushing.
    #[must_use]
    pub fn pop_up_to(mut self, destination: impl Into<Destination>, inclusive: bool) -> Self {
        self.pop_up_to = Some(PopUpTo {
            destination: destination.into(),
            inclusive,
        });
        self
    }
}

// =============================================================================
// NAVIGATION EVENT
// =============================================================================

/// A navigation intent travelling from a feature to the composition root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationEvent {
    /// Show `destination`, applying `options` to the back stack.
    ToDestination {
        /// Target screen.
        destination: Destination,
        /// Pass-through options.
        options: NavOptions,
    },
    /// Go back one level.
    Up,
}

impl NavigationEvent {
    /// Build a `ToDestination` event.
    #[must_use]
    pub fn to(destination: impl Into<Destination>, options: NavOptions) -> Self {
        Self::ToDestination {
            destination: destination.into(),
            options,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Waypoint core.
///
/// Every variant is a programming or configuration mistake; none of them is
/// retried. Superseded navigation intents are not errors and have no variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaypointError {
    /// Two registrations used the same identifier.
    #[error("Destination '{destination}' registered by both '{first}' and '{second}'")]
    DuplicateDestination {
        /// The colliding identifier.
        destination: Destination,
        /// Feature that registered it first.
        first: String,
        /// Feature that registered it again.
        second: String,
    },

    /// A feature tried to register an unusable identifier.
    #[error("Invalid destination identifier: {0:?}")]
    InvalidDestination(String),

    /// A root entry point is not part of the merged graph.
    #[error("Root destination '{0}' is not registered by any feature")]
    MissingRoot(Destination),

    /// The signed-out root entry point requires authentication.
    #[error("Signed-out root '{0}' must be a public destination")]
    ProtectedRoot(Destination),

    /// A feature navigated to a screen no contributor registered.
    #[error("Unreachable destination: '{0}'")]
    UnreachableDestination(Destination),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_equality_is_structural() {
        assert_eq!(Destination::new("home"), Destination::from("home"));
        assert_ne!(Destination::new("home"), Destination::new("home/"));
    }

    #[test]
    fn destination_validation() {
        assert!(Destination::new("places/detail").validate().is_ok());
        assert_eq!(
            Destination::new("").validate(),
            Err(WaypointError::InvalidDestination(String::new()))
        );
        assert!(Destination::new("places detail").validate().is_ok());
        assert!(Destination::new(" ").validate().is_ok());
    }

    #[test]
    fn access_admits() {
        assert!(Access::Public.admits(AuthState::Unauthenticated));
        assert!(Access::Public.admits(AuthState::Authenticated));
        assert!(!Access::Protected.admits(AuthState::Unauthenticated));
        assert!(Access::Protected.admits(AuthState::Authenticated));
    }

    #[test]
    fn nav_options_builder() {
        let options = NavOptions::new().single_top(true).pop_up_to("home", true);
        assert!(options.single_top);
        assert_eq!(
            options.pop_up_to,
            Some(PopUpTo {
                destination: Destination::new("home"),
                inclusive: true,
            })
        );
    }

    #[test]
    fn event_constructor_keeps_options() {
        let options = NavOptions::new().single_top(true);
        let event = NavigationEvent::to("home", options.clone());
        assert_eq!(
            event,
            NavigationEvent::ToDestination {
                destination: Destination::new("home"),
                options,
            }
        );
    }

    #[test]
    fn auth_state_defaults_to_signed_out() {
        assert_eq!(AuthState::default(), AuthState::Unauthenticated);
        assert_eq!(AuthState::Authenticated.to_string(), "authenticated");
    }

    #[test]
    fn error_names_colliding_identifier() {
        let err = WaypointError::DuplicateDestination {
            destination: Destination::new("home"),
            first: "home".to_string(),
            second: "profile".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("'home'"));
        assert!(message.contains("'profile'"));
    }
}
