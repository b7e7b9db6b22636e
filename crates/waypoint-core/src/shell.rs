//! # Shell Module
//!
//! The composition root's subscription: a single task that owns the
//! [`CompositionRoot`], reads the navigator's event stream and the auth
//! signal, and publishes a [`ShellSnapshot`] after every change.
//!
//! ## Ordering
//!
//! - Events are applied one at a time; the next one is not read until the
//!   previous mutation is complete.
//! - A published auth change is applied before the next navigation event, so a
//!   protected intent issued just before sign-out is judged against the
//!   signed-out state.
//!
//! ## Termination
//!
//! `run` returns `Ok` with the final root when every `Navigator` handle has
//! been dropped, and `Err` as soon as a feature navigates to a destination no
//! contributor registered.

use crate::navigator::Destinations;
use crate::root::{CompositionRoot, Outcome};
use crate::{AuthState, Destination, WaypointError};
use serde::Serialize;
use tokio::sync::watch;

/// What the renderer sees after each change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellSnapshot {
    /// Current authentication state.
    pub auth: AuthState,
    /// Back stack, bottom first; the last entry is on screen.
    pub stack: Vec<Destination>,
    /// Navigation events applied so far (including refused ones).
    pub events: u64,
    /// Result of the latest change.
    pub last: Option<Outcome>,
}

impl ShellSnapshot {
    fn capture(root: &CompositionRoot, events: u64, last: Option<Outcome>) -> Self {
        Self {
            auth: root.auth(),
            stack: root.stack().destinations(),
            events,
            last,
        }
    }

    /// The screen on display.
    #[must_use]
    pub fn current(&self) -> Option<&Destination> {
        self.stack.last()
    }
}

/// Single consumer of the navigation stream.
#[derive(Debug)]
pub struct Shell {
    root: CompositionRoot,
    destinations: Destinations,
    auth: watch::Receiver<AuthState>,
    snapshots: watch::Sender<ShellSnapshot>,
}

impl Shell {
    /// Wire a root to its event stream and auth signal.
    ///
    /// The root is synchronised with the signal's current value immediately.
    pub fn new(
        mut root: CompositionRoot,
        destinations: Destinations,
        mut auth: watch::Receiver<AuthState>,
    ) -> Self {
        let current = *auth.borrow_and_update();
        let last = root.set_auth(current);
        let (snapshots, _) = watch::channel(ShellSnapshot::capture(&root, 0, last));
        Self {
            root,
            destinations,
            auth,
            snapshots,
        }
    }

    /// Subscribe to snapshots. Valid until `run` returns.
    #[must_use]
    pub fn snapshots(&self) -> watch::Receiver<ShellSnapshot> {
        self.snapshots.subscribe()
    }

    /// The root, before the shell starts running.
    #[must_use]
    pub fn root(&self) -> &CompositionRoot {
        &self.root
    }

    /// Consume events until the navigator closes.
    pub async fn run(self) -> Result<CompositionRoot, WaypointError> {
        let Shell {
            mut root,
            mut destinations,
            mut auth,
            snapshots,
        } = self;
        let mut events = snapshots.borrow().events;
        let mut auth_open = true;

        loop {
            tokio::select! {
                biased;

                changed = auth.changed(), if auth_open => {
                    if changed.is_err() {
                        tracing::debug!("Auth signal closed; keeping last known state");
                        auth_open = false;
                        continue;
                    }
                    let state = *auth.borrow_and_update();
                    if let Some(outcome) = root.set_auth(state) {
                        snapshots.send_replace(ShellSnapshot::capture(&root, events, Some(outcome)));
                    }
                }

                event = destinations.next() => {
                    let Some(event) = event else {
                        tracing::info!(events, "Navigator closed; shell stopping");
                        return Ok(root);
                    };
                    let outcome = root.apply(event).inspect_err(|err| {
                        tracing::error!(%err, "Navigation to unregistered destination");
                    })?;
                    events += 1;
                    snapshots.send_replace(ShellSnapshot::capture(&root, events, Some(outcome)));
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::root::RootEntries;
    use crate::{NavOptions, Navigator};

    fn root(auth: AuthState) -> CompositionRoot {
        let mut builder = GraphBuilder::new();
        builder.begin_feature("auth");
        builder.public_screen("auth/sign-in");
        builder.begin_feature("home");
        builder.screen("home").screen("profile");
        let graph = builder.build().expect("build");
        CompositionRoot::new(graph, RootEntries::new("auth/sign-in", "home"), auth).expect("root")
    }

    #[test]
    fn new_syncs_root_with_signal() {
        let navigator = Navigator::new();
        let (_auth_tx, auth_rx) = watch::channel(AuthState::Authenticated);
        let shell = Shell::new(
            root(AuthState::Unauthenticated),
            navigator.destinations(),
            auth_rx,
        );

        assert_eq!(shell.root().auth(), AuthState::Authenticated);
        let snapshot = shell.snapshots().borrow().clone();
        assert_eq!(snapshot.current(), Some(&Destination::new("home")));
        assert!(matches!(snapshot.last, Some(Outcome::RootReset { .. })));
    }

    #[tokio::test]
    async fn run_applies_events_until_navigator_drops() {
        let navigator = Navigator::new();
        let (_auth_tx, auth_rx) = watch::channel(AuthState::Authenticated);
        let shell = Shell::new(
            root(AuthState::Authenticated),
            navigator.destinations(),
            auth_rx,
        );

        navigator.navigate_to("profile", NavOptions::new());
        drop(navigator);

        let root = shell.run().await.expect("run");
        assert_eq!(root.current(), &Destination::new("profile"));
    }

    #[tokio::test]
    async fn run_survives_closed_auth_signal() {
        let navigator = Navigator::new();
        let (auth_tx, auth_rx) = watch::channel(AuthState::Authenticated);
        let shell = Shell::new(
            root(AuthState::Authenticated),
            navigator.destinations(),
            auth_rx,
        );
        drop(auth_tx);

        navigator.navigate_to("profile", NavOptions::new());
        drop(navigator);

        let root = shell.run().await.expect("run");
        assert_eq!(root.auth(), AuthState::Authenticated);
        assert_eq!(root.stack().len(), 2);
    }
}
