//! Traversal context: what every recursion level shares, plus the first-error slot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::WalkError;
use crate::fetch::Transport;

use super::plan::TraversalPlan;

/// Borrowed state handed down through [`walk_level`](super::walk::walk_level).
pub struct TraversalContext<'a> {
    pub transport: &'a dyn Transport,
    pub plan: &'a TraversalPlan,
    pub cancel: &'a AtomicBool,
}

impl TraversalContext<'_> {
    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

#[derive(Default)]
struct Slot {
    error: Option<WalkError>,
    written: bool,
}

/// Terminal-outcome slot shared between producer and consumer. Written at most once.
#[derive(Clone, Default)]
pub struct FirstError(Arc<Mutex<Slot>>);

impl FirstError {
    /// Store `err` unless an error was already recorded. Returns whether it was stored.
    pub fn record(&self, err: WalkError) -> bool {
        let mut slot = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.written {
            log::debug!("dropping secondary error: {}", err);
            return false;
        }
        slot.written = true;
        slot.error = Some(err);
        true
    }

    /// Hand the recorded error out. Later calls return `None`.
    pub fn take(&self) -> Option<WalkError> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .error
            .take()
    }
}
