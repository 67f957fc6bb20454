//! Change debouncing for watch mode.
//!
//! Editors often emit several events per save (truncate, write, rename).
//! Events for the watched file are coalesced into one pending change that is
//! released once no new event has arrived for the debounce interval.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Kind of change seen on the watched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChangeKind {
    Created,
    Modified,
    Removed,
}

/// Pending change waiting to be released.
struct PendingChange {
    kind: ChangeKind,
    deadline: Instant,
}

/// Thread-safe single-file debouncer.
pub(crate) struct ChangeDebouncer {
    pending: Mutex<Option<PendingChange>>,
    debounce_duration: Duration,
}

impl ChangeDebouncer {
    pub(crate) fn new(debounce_duration: Duration) -> Self {
        Self {
            pending: Mutex::new(None),
            debounce_duration,
        }
    }

    /// Record a change. Safe to call from the watcher callback thread.
    pub(crate) fn record(&self, kind: ChangeKind) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let deadline = Instant::now() + self.debounce_duration;

        *pending = match pending.take() {
            None => Some(PendingChange { kind, deadline }),
            Some(existing) => {
                Self::coalesce(existing.kind, kind).map(|kind| PendingChange { kind, deadline })
            }
        };
    }

    /// Coalesce two change kinds.
    ///
    /// Returns `None` when both should be discarded (created then removed).
    #[allow(clippy::match_same_arms)]
    fn coalesce(existing: ChangeKind, new: ChangeKind) -> Option<ChangeKind> {
        use ChangeKind::{Created, Modified, Removed};

        match (existing, new) {
            (Created, Created | Modified) => Some(Created),
            (Created, Removed) => None,

            (Modified, Created) => Some(Created),
            (Modified, Modified) => Some(Modified),
            (Modified, Removed) => Some(Removed),

            // Atomic save: old file removed, new one written in its place.
            (Removed, Created | Modified) => Some(Modified),
            (Removed, Removed) => Some(Removed),
        }
    }

    /// Take the pending change if its quiet period has elapsed.
    pub(crate) fn take_ready(&self) -> Option<ChangeKind> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        match pending.as_ref() {
            Some(change) if change.deadline <= Instant::now() => {
                pending.take().map(|change| change.kind)
            }
            _ => None,
        }
    }
}
