//! The signed-in landing screen.

use waypoint_core::{GraphBuilder, GraphContributor};

pub const HOME: &str = "home";

/// Graph contributor for the home feature.
pub struct HomeGraph;

impl GraphContributor for HomeGraph {
    fn feature(&self) -> &str {
        "home"
    }

    fn register(&self, builder: &mut GraphBuilder) {
        builder.screen(HOME);
    }
}
