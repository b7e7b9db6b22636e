//! In-app inbox for push notifications. Delivery itself is handled by the
//! cloud notification function; this feature only shows what arrived.

use waypoint_core::{GraphBuilder, GraphContributor, NavOptions, Navigator, contributor};

pub const INBOX: &str = "alerts/inbox";
pub const DETAIL: &str = "alerts/detail";

/// Graph contributor for the alerts feature.
pub fn graph() -> impl GraphContributor {
    contributor("alerts", |builder: &mut GraphBuilder| {
        builder.screen(INBOX).screen(DETAIL);
    })
}

/// Open the inbox when a notification is tapped, replacing any inbox entry
/// already on top.
pub fn notification_opened(navigator: &Navigator) {
    navigator.navigate_to(INBOX, NavOptions::new().single_top(true));
}
