//! # Feature Graphs
//!
//! The registration protocol between feature modules and the composition root.
//!
//! Each feature owns one [`GraphContributor`]. At merge time every contributor
//! is invoked once against a single shared [`GraphBuilder`], which produces the
//! [`MergedGraph`]. All data structures use `BTreeMap`, so the merged graph is
//! identical whatever order the contributors run in.

use crate::{Access, Destination, WaypointError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

// =============================================================================
// GRAPHCONTRIBUTOR TRAIT
// =============================================================================

/// A feature module's contribution to the shared navigation graph.
///
/// Contributors are stateless: `register` declares screens and nothing else.
/// Features must not assume anything about the order in which other
/// contributors are invoked.
pub trait GraphContributor: Send + Sync {
    /// Name of the owning feature, used in diagnostics.
    fn feature(&self) -> &str;

    /// Declare this feature's screens on the shared builder.
    fn register(&self, builder: &mut GraphBuilder);
}

/// A contributor backed by a closure.
pub struct FnContributor<F> {
    feature: String,
    register: F,
}

impl<F> GraphContributor for FnContributor<F>
where
    F: Fn(&mut GraphBuilder) + Send + Sync,
{
    fn feature(&self) -> &str {
        &self.feature
    }

    fn register(&self, builder: &mut GraphBuilder) {
        (self.register)(builder);
    }
}

/// Wrap a closure as a contributor for `feature`.
pub fn contributor<F>(feature: impl Into<String>, register: F) -> FnContributor<F>
where
    F: Fn(&mut GraphBuilder) + Send + Sync,
{
    FnContributor {
        feature: feature.into(),
        register,
    }
}

// =============================================================================
// SCREEN ENTRY
// =============================================================================

/// What the merged graph knows about a registered screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenEntry {
    /// Feature that registered the screen.
    pub feature: String,
    /// Authentication requirement.
    pub access: Access,
}

// =============================================================================
// GRAPH BUILDER
// =============================================================================

/// The shared builder every contributor registers against.
///
/// Registration itself never fails; problems are recorded and reported by
/// [`GraphBuilder::build`], so one bad feature cannot hide another feature's
/// screens from the diagnostic.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    feature: String,
    screens: BTreeMap<Destination, ScreenEntry>,
    errors: Vec<WaypointError>,
}

impl GraphBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute subsequent registrations to `feature`.
    pub fn begin_feature(&mut self, feature: &str) {
        self.feature = feature.to_string();
    }

    /// Register a screen that requires authentication.
    pub fn screen(&mut self, destination: impl Into<Destination>) -> &mut Self {
        self.add(destination.into(), Access::Protected)
    }

    /// Register a screen reachable while signed out.
    pub fn public_screen(&mut self, destination: impl Into<Destination>) -> &mut Self {
        self.add(destination.into(), Access::Public)
    }

    /// Register a screen with an explicit access level.
    pub fn add(&mut self, destination: Destination, access: Access) -> &mut Self {
        if let Err(err) = destination.validate() {
            self.errors.push(err);
            return self;
        }

        match self.screens.entry(destination) {
            Entry::Occupied(existing) => {
                self.errors.push(WaypointError::DuplicateDestination {
                    destination: existing.key().clone(),
                    first: existing.get().feature.clone(),
                    second: self.feature.clone(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(ScreenEntry {
                    feature: self.feature.clone(),
                    access,
                });
            }
        }
        self
    }

    /// Number of screens registered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    /// Check if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Finish registration.
    ///
    /// Returns the first recorded error, if any. Collisions are configuration
    /// bugs and are never resolved by picking one of the registrations.
    pub fn build(self) -> Result<MergedGraph, WaypointError> {
        if let Some(err) = self.errors.into_iter().next() {
            return Err(err);
        }
        Ok(MergedGraph {
            screens: self.screens,
        })
    }
}

// =============================================================================
// MERGED GRAPH
// =============================================================================

/// The single navigable tree assembled from every feature graph.
///
/// The tree has one level per feature; [`MergedGraph::features`] exposes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergedGraph {
    screens: BTreeMap<Destination, ScreenEntry>,
}

impl MergedGraph {
    /// Look up a screen.
    #[must_use]
    pub fn get(&self, destination: &Destination) -> Option<&ScreenEntry> {
        self.screens.get(destination)
    }

    /// Look up a screen a feature asked to navigate to.
    ///
    /// Returns `WaypointError::UnreachableDestination` if no feature
    /// registered it.
    pub fn resolve(&self, destination: &Destination) -> Result<&ScreenEntry, WaypointError> {
        self.get(destination)
            .ok_or_else(|| WaypointError::UnreachableDestination(destination.clone()))
    }

    /// Check if a screen is registered.
    #[must_use]
    pub fn contains(&self, destination: &Destination) -> bool {
        self.screens.contains_key(destination)
    }

    /// Total number of screens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.screens.len()
    }

    /// Check if the graph has no screens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// All screens in identifier order.
    pub fn screens(&self) -> impl Iterator<Item = (&Destination, &ScreenEntry)> {
        self.screens.iter()
    }

    /// Screens grouped by owning feature.
    #[must_use]
    pub fn features(&self) -> BTreeMap<&str, Vec<&Destination>> {
        let mut features: BTreeMap<&str, Vec<&Destination>> = BTreeMap::new();
        for (destination, entry) in &self.screens {
            features
                .entry(entry.feature.as_str())
                .or_default()
                .push(destination);
        }
        features
    }
}

// =============================================================================
// TESTS
// =============================================================================
