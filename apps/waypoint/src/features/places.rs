//! Saved places: list, detail, creation and the map-based location picker.
//!
//! Geocoding and location hardware live behind the picker screen; this module
//! only declares the screens and the intents that move between them.

use waypoint_core::{GraphBuilder, GraphContributor, NavOptions, Navigator};

pub const LIST: &str = "places/list";
pub const DETAIL: &str = "places/detail";
pub const ADD: &str = "places/add";
pub const PICK_LOCATION: &str = "places/pick-location";

/// Graph contributor for the places feature.
pub struct PlacesGraph;

impl GraphContributor for PlacesGraph {
    fn feature(&self) -> &str {
        "places"
    }

    fn register(&self, builder: &mut GraphBuilder) {
        builder
            .screen(LIST)
            .screen(DETAIL)
            .screen(ADD)
            .screen(PICK_LOCATION);
    }
}

/// Show a saved place.
pub fn open_detail(navigator: &Navigator) {
    navigator.navigate_to(DETAIL, NavOptions::new().single_top(true));
}

/// Leave the add form once the place is saved, landing back on the list.
pub fn place_saved(navigator: &Navigator) {
    navigator.navigate_to(LIST, NavOptions::new().pop_up_to(LIST, true));
}

/// Close the location picker after a location was chosen.
pub fn location_picked(navigator: &Navigator) {
    navigator.navigate_up();
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::{
        AuthState, CompositionRoot, Destination, GraphRegistry, NavigationEvent, RootEntries,
    };

    /// Feed every intent the helper issues straight into a root.
    fn drive(root: &mut CompositionRoot, navigator: &Navigator, intent: fn(&Navigator)) {
        let mut destinations = navigator.destinations();
        intent(navigator);
        while let Some(event) = destinations.try_next() {
            root.apply(event).expect("apply");
        }
    }

    #[test]
    fn add_flow_returns_to_list() {
        let graph = GraphRegistry::builder()
            .register(crate::features::home::HomeGraph)
            .register(crate::features::auth::AuthGraph)
            .register(PlacesGraph)
            .build()
            .merge()
            .expect("merge");
        let mut root = CompositionRoot::new(
            graph,
            RootEntries::new(crate::features::auth::SIGN_IN, crate::features::home::HOME),
            AuthState::Authenticated,
        )
        .expect("root");
        let navigator = Navigator::new();

        for destination in [LIST, ADD, PICK_LOCATION] {
            root.apply(NavigationEvent::to(destination, NavOptions::new()))
                .expect("apply");
        }
        drive(&mut root, &navigator, location_picked);
        assert_eq!(root.current(), &Destination::new(ADD));

        drive(&mut root, &navigator, place_saved);
        assert_eq!(
            root.stack().destinations(),
            [Destination::new("home"), Destination::new(LIST)]
        );

        drive(&mut root, &navigator, open_detail);
        drive(&mut root, &navigator, open_detail);
        assert_eq!(root.stack().len(), 3);
    }
}
