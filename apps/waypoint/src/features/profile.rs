//! The signed-in user's profile and app settings.

use waypoint_core::{GraphBuilder, GraphContributor, NavOptions, Navigator};

pub const PROFILE: &str = "profile";
pub const EDIT: &str = "profile/edit";
pub const SETTINGS: &str = "profile/settings";

/// Graph contributor for the profile feature.
pub struct ProfileGraph;

impl GraphContributor for ProfileGraph {
    fn feature(&self) -> &str {
        "profile"
    }

    fn register(&self, builder: &mut GraphBuilder) {
        builder.screen(PROFILE).screen(EDIT).screen(SETTINGS);
    }
}

/// Open settings without stacking it twice.
pub fn open_settings(navigator: &Navigator) {
    navigator.navigate_to(SETTINGS, NavOptions::new().single_top(true));
}
