//! # Graph Registry
//!
//! The startup-time set of every feature's [`GraphContributor`].
//!
//! - Assembled exactly once, by an explicit aggregation step at startup
//! - Immutable once built (no runtime registration or unregistration)
//! - Consumed by [`GraphRegistry::merge`], which invokes each contributor once

use crate::graph::{GraphBuilder, GraphContributor, MergedGraph};
use crate::WaypointError;

/// Collects contributors during startup.
#[derive(Default)]
pub struct RegistryBuilder {
    contributors: Vec<Box<dyn GraphContributor>>,
}

impl RegistryBuilder {
    /// Add a feature's contributor.
    #[must_use]
    pub fn register(self, contributor: impl GraphContributor + 'static) -> Self {
        self.register_boxed(Box::new(contributor))
    }

    /// Add an already boxed contributor.
    #[must_use]
    pub fn register_boxed(mut self, contributor: Box<dyn GraphContributor>) -> Self {
        self.contributors.push(contributor);
        self
    }

    /// Freeze the set.
    #[must_use]
    pub fn build(self) -> GraphRegistry {
        GraphRegistry {
            contributors: self.contributors,
        }
    }
}

/// The frozen set of feature contributors.
pub struct GraphRegistry {
    contributors: Vec<Box<dyn GraphContributor>>,
}

impl GraphRegistry {
    /// Start assembling a registry.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Number of registered features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    /// Check if no feature registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }

    /// Names of the registered features.
    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.contributors.iter().map(|c| c.feature())
    }

    /// Merge every feature graph into one.
    ///
    /// Consumes the registry so each contributor runs exactly once.
    /// A destination registered twice aborts the merge with
    /// `WaypointError::DuplicateDestination` naming it.
    pub fn merge(self) -> Result<MergedGraph, WaypointError> {
        let mut builder = GraphBuilder::new();
        for contributor in &self.contributors {
            builder.begin_feature(contributor.feature());
            let before = builder.len();
            contributor.register(&mut builder);
            tracing::debug!(
                feature = contributor.feature(),
                screens = builder.len() - before,
                "Registered feature graph"
            );
        }

        let graph = builder.build().inspect_err(|err| {
            tracing::error!(%err, "Feature graph merge failed");
        })?;
        tracing::info!(
            features = self.contributors.len(),
            screens = graph.len(),
            "Merged navigation graph"
        );
        Ok(graph)
    }
}

impl std::fmt::Debug for GraphRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.features()).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::contributor;
    use crate::Destination;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        calls: Arc<AtomicUsize>,
    }

    impl GraphContributor for Counting {
        fn feature(&self) -> &str {
            "counting"
        }

        fn register(&self, builder: &mut GraphBuilder) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            builder.screen("counting/main");
        }
    }

    #[test]
    fn merge_invokes_each_contributor_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = GraphRegistry::builder()
            .register(Counting {
                calls: Arc::clone(&calls),
            })
            .register(contributor("home", |b: &mut GraphBuilder| {
                b.screen("home");
            }))
            .build();

        assert_eq!(registry.len(), 2);
        let graph = registry.merge().expect("merge");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn collision_across_features_names_identifier() {
        let registry = GraphRegistry::builder()
            .register(contributor("home", |b: &mut GraphBuilder| {
                b.screen("home");
            }))
            .register(contributor("dashboard", |b: &mut GraphBuilder| {
                b.screen("home");
            }))
            .build();

        match registry.merge() {
            Err(WaypointError::DuplicateDestination {
                destination,
                first,
                second,
            }) => {
                assert_eq!(destination, Destination::new("home"));
                assert_eq!(first, "home");
                assert_eq!(second, "dashboard");
            }
            other => unreachable!("expected collision, got {:?}", other),
        }
    }

    #[test]
    fn empty_registry_merges_to_empty_graph() {
        let registry = GraphRegistry::builder().build();
        assert!(registry.is_empty());
        assert!(registry.merge().expect("merge").is_empty());
    }

    #[test]
    fn debug_lists_features() {
        let registry = GraphRegistry::builder()
            .register(contributor("alerts", |_: &mut GraphBuilder| {}))
            .build();
        assert_eq!(format!("{:?}", registry), r#"["alerts"]"#);
    }
}
