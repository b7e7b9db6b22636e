//! # waypoint-core
//!
//! The navigation and feature-composition core for Waypoint - THE LOGIC.
//!
//! Independently built feature modules register their screens into one shared
//! navigation graph without depending on each other, and a single event-driven
//! router turns "go to destination" / "go back" intents into a race-free
//! stream consumed by one shell.
//!
//! ## Data Flow
//!
//! ```text
//! feature code ──navigate_to / navigate_up──▶ Navigator (single-slot mailbox)
//!                                                  │
//!                                                  ▼
//! GraphRegistry ──merge──▶ MergedGraph ──▶ CompositionRoot ◀── Shell task ◀── AuthState
//! ```
//!
//! ## Architectural Constraints
//!
//! - The Navigator never holds a reference to the merged graph
//! - Exactly one task mutates the current screen
//! - Registration is a startup-only, one-shot operation
//! - Destination identifiers are unique in the merged graph; a collision is fatal

// =============================================================================
// MODULES
// =============================================================================

pub mod graph;
pub mod navigator;
pub mod registry;
pub mod root;
pub mod shell;
pub mod stack;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Access, AuthState, Destination, NavOptions, NavigationEvent, PopUpTo, WaypointError,
};

// =============================================================================
// RE-EXPORTS: Navigation Engine
// =============================================================================

pub use graph::{
    FnContributor, GraphBuilder, GraphContributor, MergedGraph, ScreenEntry, contributor,
};
pub use navigator::{Destinations, Navigator, NavigatorStats};
pub use registry::{GraphRegistry, RegistryBuilder};
pub use root::{CompositionRoot, Outcome, RootEntries};
pub use shell::{Shell, ShellSnapshot};
pub use stack::{BackStack, StackEntry};
