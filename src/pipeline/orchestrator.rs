use crossbeam_channel::{Receiver, Sender, bounded};
use log::debug;
use std::iter::FusedIterator;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use crate::error::WalkError;
use crate::fetch::Transport;
use crate::types::Item;

use super::context::FirstError;
use super::plan::TraversalPlan;
use super::walk::traverse_with;

/// Streaming traversal: a producer thread walks the plan and hands leaves over a bounded channel.
///
/// Yields leaves in document order, then at most one error, then `None`. Dropping it cancels
/// the producer and waits for it, so no request outlives the handle.
pub struct Traversal {
    leaf_rx: Option<Receiver<Item>>,
    producer: Option<JoinHandle<()>>,
    first_error: FirstError,
    cancel: Arc<AtomicBool>,
    finished: bool,
}

/// Start walking `plan` on a producer thread. `channel_cap` 0 is a rendezvous channel.
pub fn spawn_traversal(
    transport: Arc<dyn Transport>,
    plan: TraversalPlan,
    channel_cap: usize,
) -> Traversal {
    spawn_traversal_with_cancel(
        transport,
        plan,
        channel_cap,
        Arc::new(AtomicBool::new(false)),
    )
}

/// Like [`spawn_traversal`], but the walk stops once the caller-owned `cancel` is set
/// (e.g. from a signal handler installed before the walk starts).
pub fn spawn_traversal_with_cancel(
    transport: Arc<dyn Transport>,
    plan: TraversalPlan,
    channel_cap: usize,
    cancel: Arc<AtomicBool>,
) -> Traversal {
    let (leaf_tx, leaf_rx) = bounded::<Item>(channel_cap);
    let first_error = FirstError::default();

    let producer = spawn_producer(
        transport,
        plan,
        leaf_tx,
        first_error.clone(),
        Arc::clone(&cancel),
    );

    Traversal {
        leaf_rx: Some(leaf_rx),
        producer: Some(producer),
        first_error,
        cancel,
        finished: false,
    }
}

fn spawn_producer(
    transport: Arc<dyn Transport>,
    plan: TraversalPlan,
    leaf_tx: Sender<Item>,
    first_error: FirstError,
    cancel: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let outcome = traverse_with(transport.as_ref(), &plan, &cancel, |item| {
            // Send fails only when the consumer dropped the receiver.
            match leaf_tx.send(item) {
                Ok(()) => ControlFlow::Continue(()),
                Err(_) => ControlFlow::Break(()),
            }
        });
        match outcome {
            Ok(ControlFlow::Continue(())) => debug!("producer: root resource exhausted"),
            Ok(ControlFlow::Break(())) => debug!("producer: stopped before exhaustion"),
            Err(e) => {
                debug!("producer: terminal error: {}", e);
                first_error.record(e);
            }
        }
        // Error is recorded before the channel closes, so the consumer sees it on disconnect.
        drop(leaf_tx);
    })
}

impl Traversal {
    /// Flag checked before every request. Setting it ends the walk without an error.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Join the producer and take the terminal error, if any.
    fn finish(&mut self) -> Option<WalkError> {
        self.finished = true;
        self.leaf_rx = None;
        if let Some(handle) = self.producer.take()
            && handle.join().is_err()
        {
            self.first_error.record(WalkError::ProducerPanicked);
        }
        self.first_error.take()
    }
}

impl Iterator for Traversal {
    type Item = Result<Item, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let received = self.leaf_rx.as_ref().map(Receiver::recv);
        match received {
            Some(Ok(item)) => Some(Ok(item)),
            // Disconnected: the producer is done and buffered leaves are drained.
            _ => self.finish().map(Err),
        }
    }
}

impl FusedIterator for Traversal {}

impl Drop for Traversal {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.cancel.store(true, Ordering::Relaxed);
        // Dropping the receiver wakes a producer blocked in `send`.
        self.leaf_rx = None;
        if let Some(handle) = self.producer.take() {
            let _ = handle.join();
        }
    }
}
