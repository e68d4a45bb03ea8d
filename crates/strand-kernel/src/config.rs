//! Configuration types for the simulation.

use anyhow::{bail, Result};
use serde::Deserialize;

/// Top-level simulation configuration.
///
/// This defines the colony size, the initial-state seeding, the per-cycle
/// pacing, and the snapshot event bus capacity.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of cells in the colony
    pub cells: usize,

    /// Probability that a cell is seeded alive (Bernoulli draw per cell)
    pub alive_probability: f64,

    /// Upper bound (exclusive) for the random per-cycle pause, in milliseconds.
    ///
    /// The pause exists purely to make state transitions observable; it has
    /// no correctness role.
    pub max_pause_ms: u64,

    /// Capacity of the snapshot event bus. Slow subscribers lose the oldest
    /// events once they fall this far behind; publishers never block.
    pub event_capacity: usize,

    /// Random seed for reproducibility (None for random)
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cells: 10,
            alive_probability: 0.1,
            max_pause_ms: 1_000,
            event_capacity: 64,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Validate the configuration, failing fast before any task is spawned.
    pub fn validate(&self) -> Result<()> {
        if self.cells == 0 {
            bail!("colony must contain at least one cell");
        }
        if !(0.0..=1.0).contains(&self.alive_probability) {
            bail!(
                "alive probability must be within [0, 1], got {}",
                self.alive_probability
            );
        }
        if self.event_capacity == 0 {
            bail!("event bus capacity must be non-zero");
        }
        Ok(())
    }
}
