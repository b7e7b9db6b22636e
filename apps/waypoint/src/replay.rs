//! # Session Replay
//!
//! Drives a live Navigator and Shell from a scripted session, standing in for
//! the feature code and the auth collaborator of a running app.
//!
//! ## Script Format
//!
//! ```toml
//! [[step]]
//! auth = "authenticated"
//!
//! [[step]]
//! navigate = "places/detail"
//! single_top = true
//! pop_up_to = "home"      # optional
//! inclusive = false       # optional, with pop_up_to
//!
//! [[step]]
//! up = true
//!
//! [[step]]
//! burst = ["profile", "alerts/inbox", "places/list"]
//! ```
//!
//! Each step runs to completion before the next one starts: the replay waits
//! until the shell has applied every delivered event (or the auth change).
//! `burst` issues its intents from concurrent tasks, so intermediate ones may
//! be superseded.

use crate::config::AppConfig;
use crate::error::AppError;
use crate::features;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tokio::sync::watch;
use waypoint_core::{
    AuthState, CompositionRoot, Destination, NavOptions, Navigator, Outcome, Shell, ShellSnapshot,
};

/// Maximum number of steps in one script.
pub const MAX_SCRIPT_STEPS: usize = 10_000;

// =============================================================================
// SCRIPT
// =============================================================================

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A feature calls `navigate_to`.
    Navigate {
        /// Target screen.
        destination: Destination,
        /// Options passed along.
        options: NavOptions,
    },
    /// A feature calls `navigate_up`.
    Up,
    /// The auth collaborator reports a new state.
    Auth(AuthState),
    /// Several features call `navigate_to` at once.
    Burst(Vec<Destination>),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Navigate {
                destination,
                options,
            } => {
                write!(f, "navigate {}", destination)?;
                if options.single_top {
                    write!(f, " single-top")?;
                }
                if let Some(pop) = &options.pop_up_to {
                    let inclusive = if pop.inclusive { " inclusive" } else { "" };
                    write!(f, " pop-up-to {}{}", pop.destination, inclusive)?;
                }
                Ok(())
            }
            Step::Up => write!(f, "up"),
            Step::Auth(state) => write!(f, "auth {}", state),
            Step::Burst(destinations) => write!(f, "burst x{}", destinations.len()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStep {
    navigate: Option<String>,
    #[serde(default)]
    single_top: bool,
    pop_up_to: Option<String>,
    #[serde(default)]
    inclusive: bool,
    #[serde(default)]
    up: bool,
    auth: Option<AuthState>,
    burst: Option<Vec<String>>,
}

impl RawStep {
    fn into_step(self, index: usize) -> Result<Step, AppError> {
        let actions = usize::from(self.navigate.is_some())
            + usize::from(self.up)
            + usize::from(self.auth.is_some())
            + usize::from(self.burst.is_some());
        if actions != 1 {
            return Err(AppError::Script(format!(
                "Step {} must have exactly one of navigate, up, auth, burst",
                index + 1
            )));
        }
        let options_given = self.single_top || self.pop_up_to.is_some() || self.inclusive;
        if options_given && self.navigate.is_none() {
            return Err(AppError::Script(format!(
                "Step {}: navigation options are only valid with navigate",
                index + 1
            )));
        }

        if let Some(destination) = self.navigate {
            let mut options = NavOptions::new().single_top(self.single_top);
            if let Some(target) = self.pop_up_to {
                options = options.pop_up_to(target, self.inclusive);
            }
            return Ok(Step::Navigate {
                destination: Destination::new(destination),
                options,
            });
        }
        if let Some(state) = self.auth {
            return Ok(Step::Auth(state));
        }
        if let Some(burst) = self.burst {
            if burst.is_empty() {
                return Err(AppError::Script(format!(
                    "Step {}: burst needs at least one destination",
                    index + 1
                )));
            }
            return Ok(Step::Burst(burst.into_iter().map(Destination::new).collect()));
        }
        Ok(Step::Up)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScript {
    #[serde(default)]
    step: Vec<RawStep>,
}

/// A parsed replay script.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    /// Steps in execution order.
    pub steps: Vec<Step>,
}

impl Script {
    /// Parse a TOML script.
    pub fn from_toml_str(source: &str) -> Result<Self, AppError> {
        let raw: RawScript = toml::from_str(source).map_err(|e| AppError::Script(e.to_string()))?;
        if raw.step.len() > MAX_SCRIPT_STEPS {
            return Err(AppError::Script(format!(
                "Script has {} steps, maximum is {}",
                raw.step.len(),
                MAX_SCRIPT_STEPS
            )));
        }
        let steps = raw
            .step
            .into_iter()
            .enumerate()
            .map(|(index, step)| step.into_step(index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { steps })
    }

    /// Read and parse a script file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            AppError::Io(format!("Cannot read script '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&source)
    }
}

// =============================================================================
// REPLAY
// =============================================================================

/// What one step did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// 1-based step number.
    pub step: usize,
    /// Human-readable action.
    pub action: String,
    /// Result of the last change the step caused, if any.
    pub outcome: Option<Outcome>,
    /// Intents superseded during this step.
    pub superseded: u64,
    /// Authentication state afterwards.
    pub auth: AuthState,
    /// Back stack afterwards, bottom first.
    pub stack: Vec<Destination>,
}

/// Run a script against the configured features.
///
/// Stops at the first step the shell rejects with an error, returning that
/// error.
pub async fn replay(config: &AppConfig, script: &Script) -> Result<Vec<StepReport>, AppError> {
    let graph = features::registry(config)?.merge()?;
    let root = CompositionRoot::new(graph, config.roots.clone(), config.initial_auth)?;

    let navigator = Navigator::new();
    let (auth_tx, auth_rx) = watch::channel(config.initial_auth);
    let shell = Shell::new(root, navigator.destinations(), auth_rx);
    let mut snapshots = shell.snapshots();
    let task = tokio::spawn(shell.run());

    let mut reports = Vec::with_capacity(script.steps.len());
    let mut auth = config.initial_auth;
    for (index, step) in script.steps.iter().enumerate() {
        let before = navigator.stats();
        tracing::debug!(step = index + 1, %step, "Replaying step");

        let snapshot = match step {
            Step::Auth(state) => {
                auth_tx.send_replace(*state);
                observe(&mut snapshots, |s| s.auth == *state).await
            }
            _ => {
                issue(&navigator, step).await?;
                observe(&mut snapshots, |s| {
                    let stats = navigator.stats();
                    stats.is_drained() && s.events == stats.delivered
                })
                .await
            }
        };
        let Some(snapshot) = snapshot else {
            tracing::warn!(step = index + 1, "Shell stopped during replay");
            break;
        };

        let outcome = match step {
            Step::Auth(state) if *state == auth => None,
            _ => snapshot.last.clone(),
        };
        auth = snapshot.auth;
        reports.push(StepReport {
            step: index + 1,
            action: step.to_string(),
            outcome,
            superseded: navigator.stats().superseded - before.superseded,
            auth: snapshot.auth,
            stack: snapshot.stack,
        });
    }

    drop(navigator);
    match task.await {
        Ok(Ok(_root)) => Ok(reports),
        Ok(Err(err)) => Err(err.into()),
        Err(err) => Err(AppError::Shell(err.to_string())),
    }
}

/// Issue the intents of a navigation step.
async fn issue(navigator: &Navigator, step: &Step) -> Result<(), AppError> {
    match step {
        Step::Navigate {
            destination,
            options,
        } => navigator.navigate_to(destination.clone(), options.clone()),
        Step::Up => navigator.navigate_up(),
        Step::Burst(destinations) => {
            let producers: Vec<_> = destinations
                .iter()
                .cloned()
                .map(|destination| {
                    let navigator = navigator.clone();
                    tokio::spawn(async move {
                        navigator.navigate_to(destination, NavOptions::new());
                    })
                })
                .collect();
            for producer in producers {
                producer
                    .await
                    .map_err(|e| AppError::Shell(format!("Producer task failed: {}", e)))?;
            }
        }
        Step::Auth(_) => {}
    }
    Ok(())
}

/// Wait for a snapshot matching `ready`. `None` once the shell has stopped.
async fn observe(
    snapshots: &mut watch::Receiver<ShellSnapshot>,
    ready: impl FnMut(&ShellSnapshot) -> bool,
) -> Option<ShellSnapshot> {
    snapshots
        .wait_for(ready)
        .await
        .ok()
        .map(|snapshot| snapshot.clone())
}

// =============================================================================
// TESTS
// =============================================================================
