//! Sign-in, sign-up and password reset. The only screens reachable while
//! signed out.

use waypoint_core::{GraphBuilder, GraphContributor, NavOptions, Navigator};

pub const SIGN_IN: &str = "auth/sign-in";
pub const SIGN_UP: &str = "auth/sign-up";
pub const RESET_PASSWORD: &str = "auth/reset-password";

/// Graph contributor for the auth feature.
pub struct AuthGraph;

impl GraphContributor for AuthGraph {
    fn feature(&self) -> &str {
        "auth"
    }

    fn register(&self, builder: &mut GraphBuilder) {
        builder
            .public_screen(SIGN_IN)
            .public_screen(SIGN_UP)
            .public_screen(RESET_PASSWORD);
    }
}

/// Open the sign-up form from the sign-in screen.
pub fn open_sign_up(navigator: &Navigator) {
    navigator.navigate_to(SIGN_UP, NavOptions::new().single_top(true));
}

/// Return to sign-in, dropping whatever auth forms are open above it.
pub fn back_to_sign_in(navigator: &Navigator) {
    navigator.navigate_to(
        SIGN_IN,
        NavOptions::new().pop_up_to(SIGN_IN, true),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::{Access, Destination, GraphRegistry};

    #[test]
    fn auth_screens_are_public() {
        let graph = GraphRegistry::builder()
            .register(AuthGraph)
            .build()
            .merge()
            .expect("merge");
        assert_eq!(graph.len(), 3);
        assert!(graph.screens().all(|(_, entry)| entry.access == Access::Public));
        assert!(graph.contains(&Destination::new(RESET_PASSWORD)));
    }

    #[test]
    fn sign_up_opens_single_top() {
        let navigator = Navigator::new();
        open_sign_up(&navigator);
        open_sign_up(&navigator);

        let mut destinations = navigator.destinations();
        assert_eq!(
            destinations.try_next(),
            Some(waypoint_core::NavigationEvent::to(
                SIGN_UP,
                NavOptions::new().single_top(true)
            ))
        );
        assert_eq!(navigator.stats().superseded, 1);
    }

    #[test]
    fn back_to_sign_in_pops_inclusive() {
        let navigator = Navigator::new();
        back_to_sign_in(&navigator);
        let event = navigator.destinations().try_next().expect("event");
        assert_eq!(
            event,
            waypoint_core::NavigationEvent::to(SIGN_IN, NavOptions::new().pop_up_to(SIGN_IN, true))
        );
    }
}
