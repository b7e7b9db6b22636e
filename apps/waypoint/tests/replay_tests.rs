//! # Replay Integration Tests
//!
//! Config file + script file through the full startup path and the live shell.

use std::path::PathBuf;
use tempfile::TempDir;
use waypoint::cli::load_config;
use waypoint::replay::{Script, replay};
use waypoint::{AppConfig, AppError};
use waypoint_core::{AuthState, Destination, Outcome, WaypointError};

// =============================================================================
// FIXTURES
// =============================================================================

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

fn stack(destinations: &[Destination]) -> Vec<&str> {
    destinations.iter().map(Destination::as_str).collect()
}

const SESSION: &str = r#"
[[step]]
navigate = "auth/sign-up"

[[step]]
navigate = "profile"

[[step]]
auth = "authenticated"

[[step]]
navigate = "places/list"

[[step]]
navigate = "places/detail"

[[step]]
navigate = "profile"
pop_up_to = "home"

[[step]]
up = true

[[step]]
up = true

[[step]]
auth = "unauthenticated"
"#;

// =============================================================================
// END TO END
// =============================================================================

#[tokio::test]
async fn scripted_session_walks_through_sign_in() {
    let dir = tempfile::tempdir().expect("tempdir");
    let script = Script::load(&write(&dir, "session.toml", SESSION)).expect("script");

    let reports = replay(&AppConfig::default(), &script).await.expect("replay");
    assert_eq!(reports.len(), 9);

    assert_eq!(stack(&reports[0].stack), ["auth/sign-in", "auth/sign-up"]);
    assert_eq!(
        reports[1].outcome,
        Some(Outcome::Blocked {
            destination: Destination::new("profile")
        })
    );
    assert_eq!(stack(&reports[1].stack), ["auth/sign-in", "auth/sign-up"]);

    assert_eq!(reports[2].auth, AuthState::Authenticated);
    assert_eq!(stack(&reports[2].stack), ["home"]);

    assert_eq!(
        stack(&reports[4].stack),
        ["home", "places/list", "places/detail"]
    );
    assert_eq!(stack(&reports[5].stack), ["home", "profile"]);
    assert_eq!(
        reports[6].outcome,
        Some(Outcome::Popped {
            from: Destination::new("profile"),
            to: Destination::new("home"),
        })
    );
    assert!(matches!(reports[7].outcome, Some(Outcome::AtRoot { .. })));

    assert_eq!(reports[8].auth, AuthState::Unauthenticated);
    assert_eq!(stack(&reports[8].stack), ["auth/sign-in"]);
}

#[tokio::test]
async fn repeated_auth_state_reports_no_change() {
    let script = Script::from_toml_str(
        r#"
        [[step]]
        auth = "unauthenticated"
        "#,
    )
    .expect("script");

    let reports = replay(&AppConfig::default(), &script).await.expect("replay");
    assert_eq!(reports[0].outcome, None);
    assert_eq!(stack(&reports[0].stack), ["auth/sign-in"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn burst_keeps_stack_consistent() {
    let config = AppConfig::from_toml_str(r#"initial_auth = "authenticated""#).expect("config");
    let script = Script::from_toml_str(
        r#"
        [[step]]
        burst = ["profile", "alerts/inbox", "places/list", "profile/settings"]
        "#,
    )
    .expect("script");

    let reports = replay(&config, &script).await.expect("replay");
    let report = &reports[0];

    assert_eq!(report.stack[0], Destination::new("home"));
    let pushed = report.stack.len() as u64 - 1;
    assert!(pushed >= 1);
    assert_eq!(pushed + report.superseded, 4);
}

// =============================================================================
// FAILURES
// =============================================================================

#[tokio::test]
async fn unregistered_destination_fails_replay() {
    let config = AppConfig::from_toml_str(r#"initial_auth = "authenticated""#).expect("config");
    let script = Script::from_toml_str(
        r#"
        [[step]]
        navigate = "profile"

        [[step]]
        navigate = "chat/room"

        [[step]]
        up = true
        "#,
    )
    .expect("script");

    let err = replay(&config, &script).await.expect_err("unreachable");
    assert!(matches!(
        err,
        AppError::Core(WaypointError::UnreachableDestination(ref d)) if d.as_str() == "chat/room"
    ));
}

#[tokio::test]
async fn disabled_feature_makes_its_screens_unreachable() {
    let config = AppConfig::from_toml_str(
        r#"
        features = ["auth", "home"]
        initial_auth = "authenticated"
        "#,
    )
    .expect("config");
    let script = Script::from_toml_str("[[step]]\nnavigate = \"places/list\"\n").expect("script");

    assert!(matches!(
        replay(&config, &script).await,
        Err(AppError::Core(WaypointError::UnreachableDestination(_)))
    ));
}

#[tokio::test]
async fn protected_signed_out_root_is_rejected_at_startup() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(
        &dir,
        "waypoint.toml",
        r#"
        [roots]
        signed_out = "home"
        signed_in = "home"
        "#,
    );
    let config = load_config(Some(&path)).expect("config");

    let err = replay(&config, &Script::default())
        .await
        .expect_err("protected root");
    assert!(matches!(
        err,
        AppError::Core(WaypointError::ProtectedRoot(_))
    ));
}

#[test]
fn unknown_feature_in_config_file_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write(&dir, "waypoint.toml", r#"features = ["auth", "chat"]"#);

    let err = load_config(Some(&path)).expect_err("unknown feature");
    assert!(err.to_string().contains("chat"));
}
