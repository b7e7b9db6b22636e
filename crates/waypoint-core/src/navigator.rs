//! # Navigator
//!
//! The single point of coordination between "intent to navigate" (any
//! feature, any thread) and "actual navigation" (the one shell task).
//!
//! ## Delivery Rules
//!
//! Events travel through a single-slot mailbox:
//! - If the consumer is parked in [`Destinations::next`], the event is handed
//!   to it directly and can no longer be superseded, unless that read is
//!   cancelled before it returns.
//! - Otherwise the event replaces whatever is waiting in the slot. Replaced
//!   events are dropped: navigation intents are point-in-time actions, not a
//!   backlog to replay.
//!
//! Producers never block and never fail. The mailbox lock guards a few field
//! assignments and no I/O.
//!
//! ## Subscribers
//!
//! One [`Destinations`] handle is the supported configuration. Additional
//! handles share the same mailbox and compete for events: whoever reads next
//! gets the event, and ordering across handles is undefined.
//!
//! ## Lifecycle
//!
//! A `Navigator` is created once at startup and cloned into every feature
//! that emits intents. When the last clone is dropped the stream ends: any
//! event still waiting is delivered, then [`Destinations::next`] returns `None`.

use crate::{Destination, NavOptions, NavigationEvent};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

// =============================================================================
// STATISTICS
// =============================================================================

/// Counters describing the life of every event issued so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NavigatorStats {
    /// Events passed to `navigate_to` / `navigate_up`.
    pub issued: u64,
    /// Events handed to a consumer.
    pub delivered: u64,
    /// Events replaced by a newer one before anybody read them.
    pub superseded: u64,
}

impl NavigatorStats {
    /// Events issued but neither delivered nor superseded yet (0 or 1).
    #[must_use]
    pub const fn pending(&self) -> u64 {
        self.issued
            .saturating_sub(self.delivered)
            .saturating_sub(self.superseded)
    }

    /// Check if every issued event has been delivered or superseded.
    #[must_use]
    pub const fn is_drained(&self) -> bool {
        self.pending() == 0
    }
}

// =============================================================================
// MAILBOX
// =============================================================================

#[derive(Debug, Default)]
struct Mailbox {
    /// Event claimed by a parked consumer; never overwritten.
    handoff: Option<NavigationEvent>,
    /// Conflated slot: the newest unconsumed event.
    latest: Option<NavigationEvent>,
    /// A consumer is waiting for the next event.
    parked: bool,
    producers: usize,
    subscribers: usize,
    closed: bool,
    stats: NavigatorStats,
}

impl Mailbox {
    fn put(&mut self, event: NavigationEvent) {
        self.stats.issued = self.stats.issued.saturating_add(1);
        if self.parked {
            self.parked = false;
            self.handoff = Some(event);
        } else if let Some(stale) = self.latest.replace(event) {
            self.stats.superseded = self.stats.superseded.saturating_add(1);
            tracing::trace!(?stale, "Superseded unconsumed navigation event");
        }
    }

    fn take(&mut self) -> Option<NavigationEvent> {
        let event = self.handoff.take().or_else(|| self.latest.take())?;
        self.parked = false;
        self.stats.delivered = self.stats.delivered.saturating_add(1);
        Some(event)
    }

    /// A parked read went away without taking its event. A claimed event
    /// becomes unconsumed again and conflates with anything newer.
    fn unpark(&mut self) {
        self.parked = false;
        let Some(claimed) = self.handoff.take() else {
            return;
        };
        if self.latest.is_none() {
            self.latest = Some(claimed);
        } else {
            self.stats.superseded = self.stats.superseded.saturating_add(1);
            tracing::trace!(stale = ?claimed, "Superseded event claimed by a cancelled read");
        }
    }
}

#[derive(Debug, Default)]
struct Shared {
    mailbox: Mutex<Mailbox>,
    notify: Notify,
}

impl Shared {
    /// Lock the mailbox. Critical sections never panic, so a poisoned lock
    /// still holds consistent state.
    fn lock(&self) -> MutexGuard<'_, Mailbox> {
        self.mailbox.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// NAVIGATOR (producer side)
// =============================================================================

/// Producer handle for navigation intents.
///
/// Cheap to clone; every clone feeds the same stream.
#[derive(Debug)]
pub struct Navigator {
    shared: Arc<Shared>,
}

impl Navigator {
    /// Create the navigator for this process.
    #[must_use]
    pub fn new() -> Self {
        let shared = Shared::default();
        shared.lock().producers = 1;
        Self {
            shared: Arc::new(shared),
        }
    }

    /// Request navigation to `destination`.
    ///
    /// Never blocks. `options` are forwarded to the consumer untouched.
    pub fn navigate_to(&self, destination: impl Into<Destination>, options: NavOptions) {
        self.send(NavigationEvent::to(destination, options));
    }

    /// Request navigation one level back.
    pub fn navigate_up(&self) {
        self.send(NavigationEvent::Up);
    }

    /// Issue an already-built event.
    pub fn send(&self, event: NavigationEvent) {
        self.shared.lock().put(event);
        self.shared.notify.notify_one();
    }

    /// Attach a consumer to the event stream.
    ///
    /// The composition root subscribes once for the life of the process.
    #[must_use]
    pub fn destinations(&self) -> Destinations {
        let subscribers = {
            let mut mailbox = self.shared.lock();
            mailbox.subscribers += 1;
            mailbox.subscribers
        };
        if subscribers > 1 {
            tracing::warn!(
                subscribers,
                "Multiple navigation subscribers attached; events go to whoever reads next"
            );
        }
        Destinations {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Snapshot of the event counters.
    #[must_use]
    pub fn stats(&self) -> NavigatorStats {
        self.shared.lock().stats
    }

    /// Check if a consumer is currently parked waiting for an event.
    #[must_use]
    pub fn consumer_waiting(&self) -> bool {
        self.shared.lock().parked
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Navigator {
    fn clone(&self) -> Self {
        self.shared.lock().producers += 1;
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Drop for Navigator {
    fn drop(&mut self) {
        let closed = {
            let mut mailbox = self.shared.lock();
            mailbox.producers = mailbox.producers.saturating_sub(1);
            mailbox.closed = mailbox.producers == 0;
            mailbox.closed
        };
        if closed {
            tracing::debug!("Last navigator handle dropped; closing event stream");
            self.shared.notify.notify_waiters();
            self.shared.notify.notify_one();
        }
    }
}

// =============================================================================
// DESTINATIONS (consumer side)
// =============================================================================

/// Consumer handle yielding navigation events one at a time.
#[derive(Debug)]
pub struct Destinations {
    shared: Arc<Shared>,
}

impl Destinations {
    /// Wait for the next event.
    ///
    /// Returns `None` once every `Navigator` handle is dropped and nothing is
    /// left to deliver. Cancel-safe: an event is only removed from the mailbox
    /// in the poll that returns it, and dropping a parked read releases its
    /// claim so later events conflate again.
    pub async fn next(&mut self) -> Option<NavigationEvent> {
        let mut parked = ParkedRead {
            shared: &self.shared,
            active: false,
        };
        loop {
            {
                let mut mailbox = self.shared.lock();
                if let Some(event) = mailbox.take() {
                    parked.active = false;
                    return Some(event);
                }
                if mailbox.closed {
                    parked.active = false;
                    return None;
                }
                mailbox.parked = true;
            }
            parked.active = true;
            self.shared.notify.notified().await;
        }
    }

    /// Take the waiting event without parking.
    #[must_use]
    pub fn try_next(&mut self) -> Option<NavigationEvent> {
        self.shared.lock().take()
    }

    /// Check if the producer side is gone.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }
}

/// Undoes `parked` when a `next()` future is dropped mid-wait.
struct ParkedRead<'a> {
    shared: &'a Shared,
    active: bool,
}

impl Drop for ParkedRead<'_> {
    fn drop(&mut self) {
        if self.active {
            self.shared.lock().unpark();
        }
    }
}

impl Drop for Destinations {
    fn drop(&mut self) {
        let mut mailbox = self.shared.lock();
        mailbox.subscribers = mailbox.subscribers.saturating_sub(1);
        if mailbox.subscribers == 0 {
            mailbox.parked = false;
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
