//! The per-cell task: one independently paced update loop per index.
//!
//! Each task owns write access to exactly one slot of the shared lattice and
//! loops forever: update own slot under the colony-wide gate, publish a
//! snapshot if anyone is listening, check the terminal conditions against an
//! unlocked global sum, pause for a random interval. The loop leaves the
//! Running state only through the termination signal, either because this
//! cell detected a terminal configuration itself or because another one did.

use std::sync::Arc;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tokio::sync::watch;
use tokio::time::{sleep, Duration};
use tracing::{debug, info, trace};

use crate::events::{EventBus, SnapshotEvent};
use crate::lattice::Lattice;
use crate::render;
use crate::termination::{TerminationSignal, Verdict};

/// One cell's update loop, identified by its lattice index.
pub struct CellTask {
    index: usize,
    lattice: Arc<Lattice>,
    bus: EventBus,
    signal: TerminationSignal,
    shutdown: watch::Receiver<Option<Verdict>>,
    max_pause_ms: u64,
    rng: ChaCha8Rng,
}

impl CellTask {
    pub fn new(
        index: usize,
        lattice: Arc<Lattice>,
        bus: EventBus,
        signal: TerminationSignal,
        max_pause_ms: u64,
        seed: Option<u64>,
    ) -> Self {
        // Derive a per-cell stream from the run seed so reproducible runs
        // stay reproducible per cell.
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        let shutdown = signal.subscribe();
        Self {
            index,
            lattice,
            bus,
            signal,
            shutdown,
            max_pause_ms,
            rng,
        }
    }

    /// Run until a terminal configuration halts the colony.
    ///
    /// Returns the number of update cycles this cell completed. Every
    /// blocking point selects against the termination signal so the task
    /// halts promptly once any cell has fired it.
    pub async fn run(mut self) -> u64 {
        let colony = self.lattice.len();
        let mut cycles: u64 = 0;

        loop {
            // The watch only wakes us for future fires; a verdict that
            // landed before this iteration is picked up here.
            if self.shutdown.borrow().is_some() {
                break;
            }

            // Update own slot under the write gate, unless the colony is
            // already shutting down while we queue for it.
            let value = tokio::select! {
                value = self.lattice.update(self.index) => value,
                _ = self.shutdown.changed() => break,
            };
            cycles += 1;
            trace!(cell = self.index, value, cycles, "updated");

            // Snapshot rendering reads the lattice unlocked, so a frame may
            // mix pre- and post-update neighbor values. Skipped entirely
            // when nobody subscribes.
            if self.bus.has_subscribers() {
                self.bus.publish(SnapshotEvent {
                    cell: self.index,
                    frame: render::frame(&self.lattice.snapshot()),
                });
            }

            // Terminal-condition check on the unlocked sum. A miss here is
            // caught on a later cycle.
            let sum = self.lattice.sum_relaxed();
            let verdict = if sum == 0 {
                Some(Verdict::Starvation)
            } else if sum == colony {
                Some(Verdict::Overcrowded)
            } else {
                None
            };
            if let Some(verdict) = verdict {
                if self.signal.fire(verdict) {
                    info!(cell = self.index, %verdict, "terminal configuration detected");
                }
                break;
            }

            // Random pacing pause; purely to make transitions observable.
            if self.max_pause_ms > 0 {
                let pause = self.rng.random_range(0..self.max_pause_ms);
                tokio::select! {
                    _ = sleep(Duration::from_millis(pause)) => {}
                    _ = self.shutdown.changed() => break,
                }
            } else {
                tokio::task::yield_now().await;
            }
        }

        debug!(cell = self.index, cycles, "halted");
        cycles
    }
}
