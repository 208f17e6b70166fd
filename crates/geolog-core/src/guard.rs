//! Busy guard for serializing capture invocations.
//!
//! The busy flag is set when a guard is acquired and cleared when the guard
//! is dropped, on every exit path including early returns and errors.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::events::{AppEvent, EventDispatcher};

/// A guard that holds the busy flag until dropped.
///
/// # Example
///
/// ```
/// use std::sync::atomic::AtomicBool;
/// use geolog_core::{BusyGuard, EventDispatcher};
///
/// let busy = AtomicBool::new(false);
/// let events = EventDispatcher::default();
///
/// let guard = BusyGuard::try_acquire(&busy, &events).unwrap();
/// // A second acquisition is refused while the first is held
/// assert!(BusyGuard::try_acquire(&busy, &events).is_none());
/// drop(guard);
/// assert!(BusyGuard::try_acquire(&busy, &events).is_some());
/// ```
#[must_use = "the busy flag is released as soon as the guard is dropped"]
pub struct BusyGuard<'a> {
    flag: &'a AtomicBool,
    events: &'a EventDispatcher,
}

impl<'a> BusyGuard<'a> {
    /// Set the flag if it is clear. Returns `None` if it was already set.
    pub fn try_acquire(flag: &'a AtomicBool, events: &'a EventDispatcher) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        debug!("busy flag set");
        events.send(AppEvent::BusyChanged { busy: true });
        Some(Self { flag, events })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        debug!("busy flag cleared");
        self.events.send(AppEvent::BusyChanged { busy: false });
    }
}
