//! # Back Stack
//!
//! The navigation stack behind the active screen.
//!
//! This is the only place that interprets [`NavOptions`]; the Navigator
//! carries them without looking inside.

use crate::{Destination, NavOptions};
use serde::Serialize;

/// One screen on the back stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackEntry {
    /// The screen.
    pub destination: Destination,
    /// Options it was opened with.
    pub options: NavOptions,
}

/// Ordered screens, bottom (root) first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BackStack {
    entries: Vec<StackEntry>,
}

impl BackStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole stack with a single root entry.
    pub fn reset(&mut self, root: Destination) {
        self.entries.clear();
        self.entries.push(StackEntry {
            destination: root,
            options: NavOptions::default(),
        });
    }

    /// Push a screen, honouring its options.
    ///
    /// `pop_up_to` is applied first and is ignored when its target is not on
    /// the stack. With `single_top`, a push of the screen already on top only
    /// refreshes its options.
    ///
    /// Returns `false` if the top entry was reused instead of pushing.
    pub fn push(&mut self, destination: Destination, options: NavOptions) -> bool {
        if let Some(pop) = &options.pop_up_to {
            if let Some(index) = self
                .entries
                .iter()
                .rposition(|entry| entry.destination == pop.destination)
            {
                let keep = if pop.inclusive { index } else { index + 1 };
                self.entries.truncate(keep);
            }
        }

        if options.single_top {
            if let Some(top) = self.entries.last_mut() {
                if top.destination == destination {
                    top.options = options;
                    return false;
                }
            }
        }

        self.entries.push(StackEntry {
            destination,
            options,
        });
        true
    }

    /// Pop the top entry. The last entry is never popped.
    pub fn pop(&mut self) -> Option<StackEntry> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop()
    }

    /// The entry currently shown.
    #[must_use]
    pub fn top(&self) -> Option<&StackEntry> {
        self.entries.last()
    }

    /// Check if `destination` is anywhere on the stack.
    #[must_use]
    pub fn contains(&self, destination: &Destination) -> bool {
        self.entries.iter().any(|entry| &entry.destination == destination)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Destinations, bottom first.
    #[must_use]
    pub fn destinations(&self) -> Vec<Destination> {
        self.entries
            .iter()
            .map(|entry| entry.destination.clone())
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_of(names: &[&str]) -> BackStack {
        let mut stack = BackStack::new();
        if let Some((root, rest)) = names.split_first() {
            stack.reset(Destination::new(*root));
            for name in rest {
                stack.push(Destination::new(*name), NavOptions::new());
            }
        }
        stack
    }

    fn names(stack: &BackStack) -> Vec<String> {
        stack
            .destinations()
            .iter()
            .map(|d| d.as_str().to_string())
            .collect()
    }

    #[test]
    fn pop_keeps_root() {
        let mut stack = stack_of(&["home", "profile"]);
        assert_eq!(
            stack.pop().map(|e| e.destination),
            Some(Destination::new("profile"))
        );
        assert!(stack.pop().is_none());
        assert_eq!(names(&stack), ["home"]);
        assert!(!stack.is_empty());
    }

    #[test]
    fn pop_up_to_exclusive() {
        let mut stack = stack_of(&["home", "places/list", "places/detail"]);
        let pushed = stack.push(
            Destination::new("profile"),
            NavOptions::new().pop_up_to("home", false),
        );
        assert!(pushed);
        assert_eq!(names(&stack), ["home", "profile"]);
    }

    #[test]
    fn pop_up_to_inclusive_replaces_root() {
        let mut stack = stack_of(&["auth/sign-in", "auth/sign-up"]);
        stack.push(
            Destination::new("home"),
            NavOptions::new().pop_up_to("auth/sign-in", true),
        );
        assert_eq!(names(&stack), ["home"]);
    }

    #[test]
    fn pop_up_to_missing_target_is_ignored() {
        let mut stack = stack_of(&["home", "profile"]);
        stack.push(
            Destination::new("profile/edit"),
            NavOptions::new().pop_up_to("alerts/inbox", true),
        );
        assert_eq!(names(&stack), ["home", "profile", "profile/edit"]);
    }

    #[test]
    fn single_top_reuses_top_entry() {
        let mut stack = stack_of(&["home", "alerts/inbox"]);
        let options = NavOptions::new().single_top(true);
        assert!(!stack.push(Destination::new("alerts/inbox"), options.clone()));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.top().map(|e| &e.options), Some(&options));

        // Without single_top the duplicate is pushed.
        assert!(stack.push(Destination::new("alerts/inbox"), NavOptions::new()));
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn reset_clears_everything() {
        let mut stack = stack_of(&["home", "profile", "profile/edit"]);
        stack.reset(Destination::new("auth/sign-in"));
        assert_eq!(names(&stack), ["auth/sign-in"]);
        assert!(!stack.contains(&Destination::new("profile")));
    }
}
