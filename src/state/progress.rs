//! Readiness Counter - Coarse loading progress signal
//!
//! Counts how many asynchronous loading units have completed.
//! - `loaded` signal (reactive, read-only for consumers)
//! - Ticket issuing for pending loads
//! - Waker list so pending loads resolve when the count moves past them
//!
//! Only a [`LoadTracker`] can advance the count. Bridges and import surfaces
//! read it.
//!
//! # Example
//!
//! ```ignore
//! let tracker = host.load_tracker()?;
//! let ticket = tracker.issue_ticket();
//!
//! // ... host finishes evaluating the module ...
//! tracker.mark_loaded();
//!
//! assert!(tracker.loaded() > ticket);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::task::Waker;

use spark_signals::{Derived, Signal, derived, signal, untrack};
use tracing::trace;

// =============================================================================
// Shared Counter
// =============================================================================

/// Counter state shared by a bridge and its trackers.
///
/// The `loaded` signal never leaves this module. Consumers get a
/// [`Derived`] view, so only [`LoadTracker`] can write.
pub(crate) struct ReadinessCounter {
    /// Completed loads.
    loaded: Signal<u32>,
    /// Loads requested so far. Next ticket to hand out.
    issued: Cell<u32>,
    /// Wakers of pending loads waiting on the next increment.
    waiters: RefCell<Vec<Waker>>,
}

impl ReadinessCounter {
    pub(crate) fn new() -> Rc<Self> {
        Self::starting_at(0)
    }

    pub(crate) fn starting_at(loaded: u32) -> Rc<Self> {
        Rc::new(Self {
            loaded: signal(loaded),
            issued: Cell::new(0),
            waiters: RefCell::new(Vec::new()),
        })
    }

    /// Current count.
    ///
    /// Note: This creates a reactive dependency when called from a derived/effect.
    pub(crate) fn get(&self) -> u32 {
        self.loaded.get()
    }

    /// Current count without reactive tracking.
    pub(crate) fn peek(&self) -> u32 {
        untrack(|| self.loaded.get())
    }

    /// Read-only reactive view of the count.
    pub(crate) fn derived(&self) -> Derived<u32> {
        let loaded = self.loaded.clone();
        derived(move || loaded.get())
    }

    /// Whether the load holding `ticket` has completed.
    ///
    /// A saturated counter completes every ticket, including `u32::MAX`.
    pub(crate) fn is_complete(&self, ticket: u32) -> bool {
        let loaded = self.peek();
        loaded > ticket || loaded == u32::MAX
    }

    pub(crate) fn register_waker(&self, waker: &Waker) {
        let mut waiters = self.waiters.borrow_mut();
        if !waiters.iter().any(|w| w.will_wake(waker)) {
            waiters.push(waker.clone());
        }
    }

    fn advance(&self) -> u32 {
        let next = self.peek().saturating_add(1);
        self.loaded.set(next);

        // Take the list first: a woken task may poll and re-register synchronously.
        let waiters = std::mem::take(&mut *self.waiters.borrow_mut());
        for waker in waiters {
            waker.wake();
        }
        next
    }

    fn next_ticket(&self) -> u32 {
        let ticket = self.issued.get();
        self.issued.set(ticket.saturating_add(1));
        ticket
    }
}

// =============================================================================
// Load Tracker
// =============================================================================

/// Write handle for the readiness counter.
///
/// Owned by the loading code that surrounds the bridge. Cloning shares the
/// same counter.
#[derive(Clone)]
pub struct LoadTracker {
    counter: Rc<ReadinessCounter>,
}

impl LoadTracker {
    pub(crate) fn new(counter: Rc<ReadinessCounter>) -> Self {
        Self { counter }
    }

    /// Hand out the ticket for a newly requested load.
    ///
    /// Tickets start at 0. A load with ticket `n` is complete once
    /// `loaded() > n`, or once the count has saturated at `u32::MAX`.
    pub fn issue_ticket(&self) -> u32 {
        let ticket = self.counter.next_ticket();
        trace!(ticket, "issued load ticket");
        ticket
    }

    /// Record one completed load and wake pending loads.
    ///
    /// Returns the new count. The count saturates at `u32::MAX`.
    pub fn mark_loaded(&self) -> u32 {
        let loaded = self.counter.advance();
        trace!(loaded, "loading unit completed");
        loaded
    }

    /// Number of completed loads (untracked).
    pub fn loaded(&self) -> u32 {
        self.counter.peek()
    }

    /// Number of tickets issued so far.
    pub fn issued(&self) -> u32 {
        self.counter.issued.get()
    }

    pub(crate) fn counter(&self) -> &Rc<ReadinessCounter> {
        &self.counter
    }
}

// =============================================================================
// Tests
// =============================================================================
