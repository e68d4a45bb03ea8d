//! The coordinator: seeds the colony, launches the cell tasks, and waits
//! for the termination signal.
//!
//! Shutdown is total and deterministic: once any cell fires the signal, the
//! coordinator joins every task (they all observe the same watch) before
//! reporting the verdict, so no task outlives the run.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::cell::CellTask;
use crate::config::SimConfig;
use crate::events::{EventBus, SnapshotEvent};
use crate::lattice::Lattice;
use crate::render;
use crate::seed;
use crate::termination::{TerminationSignal, Verdict};

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Which terminal configuration ended the run
    pub verdict: Verdict,
    /// Update cycles completed across all cells
    pub total_updates: u64,
    /// Cell values at the moment the colony halted
    pub final_cells: Vec<u8>,
}

impl RunReport {
    /// Final state rendered as a text frame.
    pub fn final_frame(&self) -> String {
        render::frame(&self.final_cells)
    }
}

/// A fully wired colony, ready to run.
pub struct Simulation {
    config: SimConfig,
    lattice: Arc<Lattice>,
    bus: EventBus,
    signal: TerminationSignal,
}

impl Simulation {
    /// Build a simulation with a randomized initial state drawn from the
    /// configured alive probability.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let cells = seed::bernoulli(config.cells, config.alive_probability, config.seed);
        Self::assemble(config, cells)
    }

    /// Build a simulation from explicit initial cell values.
    ///
    /// The colony size is taken from `cells`; the `cells` field of the
    /// config is ignored.
    pub fn with_cells(mut config: SimConfig, cells: Vec<u8>) -> Result<Self> {
        config.cells = cells.len();
        config.validate()?;
        Self::assemble(config, cells)
    }

    fn assemble(config: SimConfig, cells: Vec<u8>) -> Result<Self> {
        let lattice = Arc::new(Lattice::from_cells(cells)?);
        let bus = EventBus::new(config.event_capacity);
        Ok(Self {
            config,
            lattice,
            bus,
            signal: TerminationSignal::new(),
        })
    }

    /// Attach an observer to the snapshot event bus.
    pub fn subscribe(&self) -> broadcast::Receiver<SnapshotEvent> {
        self.bus.subscribe()
    }

    /// Current cell values.
    pub fn cells(&self) -> Vec<u8> {
        self.lattice.snapshot()
    }

    /// Launch every cell task and block until a terminal configuration is
    /// detected, then join all tasks and report the verdict.
    pub async fn run(self) -> Result<RunReport> {
        let colony = self.lattice.len();
        info!(
            cells = colony,
            frame = render::frame(&self.lattice.snapshot()),
            "colony started"
        );

        // Subscribe before spawning so a first-cycle detection cannot be
        // missed.
        let mut verdict_rx = self.signal.subscribe();

        let mut tasks = JoinSet::new();
        for index in 0..colony {
            tasks.spawn(
                CellTask::new(
                    index,
                    self.lattice.clone(),
                    self.bus.clone(),
                    self.signal.clone(),
                    self.config.max_pause_ms,
                    self.config.seed,
                )
                .run(),
            );
        }

        let verdict = *verdict_rx
            .wait_for(Option::is_some)
            .await
            .context("termination signal closed before any verdict fired")?;
        let verdict = verdict.context("termination watch resolved without a verdict")?;

        // Every task sees the fired watch and halts; wait for all of them.
        let mut total_updates = 0;
        while let Some(joined) = tasks.join_next().await {
            total_updates += joined.context("cell task panicked")?;
        }
        debug!(total_updates, "all cell tasks halted");

        let report = RunReport {
            verdict,
            total_updates,
            final_cells: self.lattice.snapshot(),
        };
        info!(%verdict, total_updates, frame = report.final_frame(), "colony halted");
        Ok(report)
    }
}
