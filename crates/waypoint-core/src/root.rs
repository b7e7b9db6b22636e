//! # Composition Root
//!
//! Owns the merged graph and the "current screen" state.
//!
//! The root is a two-state machine keyed on [`AuthState`]:
//! - `Unauthenticated`: the stack starts at the signed-out root, and only
//!   public screens may be pushed.
//! - `Authenticated`: the stack starts at the signed-in root, and every
//!   registered screen is reachable.
//!
//! An auth transition replaces the whole stack in one step, so no observer
//! can see a protected screen while signed out.

use crate::graph::MergedGraph;
use crate::stack::BackStack;
use crate::{Access, AuthState, Destination, NavigationEvent, WaypointError};
use serde::{Deserialize, Serialize};

// =============================================================================
// ROOT ENTRIES
// =============================================================================

/// Start destination for each authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootEntries {
    /// Shown while unauthenticated. Must be public.
    pub signed_out: Destination,
    /// Shown once authenticated.
    pub signed_in: Destination,
}

impl RootEntries {
    /// Create root entries.
    #[must_use]
    pub fn new(signed_out: impl Into<Destination>, signed_in: impl Into<Destination>) -> Self {
        Self {
            signed_out: signed_out.into(),
            signed_in: signed_in.into(),
        }
    }

    /// The start destination for `auth`.
    #[must_use]
    pub fn for_state(&self, auth: AuthState) -> &Destination {
        match auth {
            AuthState::Unauthenticated => &self.signed_out,
            AuthState::Authenticated => &self.signed_in,
        }
    }
}

// =============================================================================
// OUTCOME
// =============================================================================

/// What applying an event or auth change did to the stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// A new entry was pushed.
    Pushed {
        /// The new top.
        destination: Destination,
    },
    /// The top entry was reused (single-top).
    Reused {
        /// The unchanged top.
        destination: Destination,
    },
    /// One entry was popped.
    Popped {
        /// The entry removed.
        from: Destination,
        /// The new top.
        to: Destination,
    },
    /// `Up` with only the root on the stack; nothing happened.
    AtRoot {
        /// The root that stayed.
        destination: Destination,
    },
    /// Navigation to a protected screen while unauthenticated was refused.
    Blocked {
        /// The refused destination.
        destination: Destination,
    },
    /// The auth state changed and the stack was replaced.
    RootReset {
        /// New auth state.
        auth: AuthState,
        /// New root.
        root: Destination,
    },
}

// =============================================================================
// COMPOSITION ROOT
// =============================================================================

/// The only writer of the current screen.
#[derive(Debug)]
pub struct CompositionRoot {
    graph: MergedGraph,
    roots: RootEntries,
    auth: AuthState,
    stack: BackStack,
}

impl CompositionRoot {
    /// Create the root over a merged graph.
    ///
    /// Both root entries must be registered, and the signed-out root must be
    /// public. Either violation is a fatal configuration error.
    pub fn new(
        graph: MergedGraph,
        roots: RootEntries,
        auth: AuthState,
    ) -> Result<Self, WaypointError> {
        let signed_out = graph
            .get(&roots.signed_out)
            .ok_or_else(|| WaypointError::MissingRoot(roots.signed_out.clone()))?;
        if signed_out.access != Access::Public {
            return Err(WaypointError::ProtectedRoot(roots.signed_out.clone()));
        }
        if !graph.contains(&roots.signed_in) {
            return Err(WaypointError::MissingRoot(roots.signed_in.clone()));
        }

        let mut stack = BackStack::new();
        stack.reset(roots.for_state(auth).clone());
        Ok(Self {
            graph,
            roots,
            auth,
            stack,
        })
    }

    /// Current authentication state.
    #[must_use]
    pub fn auth(&self) -> AuthState {
        self.auth
    }

    /// The merged graph.
    #[must_use]
    pub fn graph(&self) -> &MergedGraph {
        &self.graph
    }

    /// The configured root entries.
    #[must_use]
    pub fn roots(&self) -> &RootEntries {
        &self.roots
    }

    /// The back stack.
    #[must_use]
    pub fn stack(&self) -> &BackStack {
        &self.stack
    }

    /// The screen currently shown.
    #[must_use]
    pub fn current(&self) -> &Destination {
        self.stack
            .top()
            .map(|entry| &entry.destination)
            .unwrap_or_else(|| self.roots.for_state(self.auth))
    }

    /// Apply an authentication change.
    ///
    /// Returns `None` if the state is unchanged; the stack is left alone.
    pub fn set_auth(&mut self, auth: AuthState) -> Option<Outcome> {
        if auth == self.auth {
            return None;
        }
        self.auth = auth;
        let root = self.roots.for_state(auth).clone();
        self.stack.reset(root.clone());
        tracing::info!(%auth, %root, "Authentication changed; root graph replaced");
        Some(Outcome::RootReset { auth, root })
    }

    /// Apply one navigation event.
    ///
    /// Returns `WaypointError::UnreachableDestination` for a destination no
    /// feature registered.
    pub fn apply(&mut self, event: NavigationEvent) -> Result<Outcome, WaypointError> {
        let outcome = match event {
            NavigationEvent::Up => match self.stack.pop() {
                Some(popped) => Outcome::Popped {
                    from: popped.destination,
                    to: self.current().clone(),
                },
                None => Outcome::AtRoot {
                    destination: self.current().clone(),
                },
            },
            NavigationEvent::ToDestination {
                destination,
                options,
            } => {
                let access = self.graph.resolve(&destination)?.access;
                if !access.admits(self.auth) {
                    tracing::warn!(
                        %destination,
                        auth = %self.auth,
                        "Refused navigation to protected destination"
                    );
                    return Ok(Outcome::Blocked { destination });
                }
                if self.stack.push(destination.clone(), options) {
                    Outcome::Pushed { destination }
                } else {
                    Outcome::Reused { destination }
                }
            }
        };
        tracing::debug!(?outcome, depth = self.stack.len(), "Navigation applied");
        Ok(outcome)
    }
}

// =============================================================================
// TESTS
// =============================================================================
