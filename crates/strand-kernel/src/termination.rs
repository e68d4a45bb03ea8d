//! Termination signaling: first detection wins, everyone shuts down.
//!
//! Any cell task can detect a terminal configuration and fire the signal.
//! The signal is a watch channel carrying the verdict: the first `fire`
//! stores it, later fires are non-blocking no-ops, and every holder of a
//! receiver (the coordinator and all cell tasks) observes the change. The
//! same receiver doubles as the cancellation token the tasks select on at
//! their blocking points.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

/// Which terminal configuration ended the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// Every cell is dead (global sum reached 0)
    Starvation,
    /// Every cell is alive (global sum reached the colony size)
    Overcrowded,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Starvation => write!(f, "Starvation"),
            Verdict::Overcrowded => write!(f, "Overcrowded"),
        }
    }
}

/// Single-shot, multi-producer termination signal.
#[derive(Clone)]
pub struct TerminationSignal {
    tx: Arc<watch::Sender<Option<Verdict>>>,
}

impl TerminationSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Fire the signal with `verdict`. Only the first fire sticks; the
    /// return value says whether this call was the one that decided.
    pub fn fire(&self, verdict: Verdict) -> bool {
        self.tx.send_if_modified(|current| {
            if current.is_none() {
                *current = Some(verdict);
                true
            } else {
                false
            }
        })
    }

    /// Verdict fired so far, if any.
    pub fn verdict(&self) -> Option<Verdict> {
        *self.tx.borrow()
    }

    /// New receiver observing the (future or already-fired) verdict.
    pub fn subscribe(&self) -> watch::Receiver<Option<Verdict>> {
        self.tx.subscribe()
    }
}

impl Default for TerminationSignal {
    fn default() -> Self {
        Self::new()
    }
}
