//! Strand Kernel: an asynchronous one-dimensional cellular automaton.
//!
//! This crate implements a continuously-running 1D automaton in which every
//! cell is its own tokio task. There are no generations: each cell keeps
//! recomputing its binary value from its neighbors' current values, at its
//! own randomized pace, until the colony reaches a terminal configuration
//! (all dead or all alive).

pub mod cell;
pub mod config;
pub mod engine;
pub mod events;
pub mod lattice;
pub mod render;
pub mod rule;
pub mod seed;
pub mod termination;

pub use config::SimConfig;
pub use engine::{RunReport, Simulation};
pub use events::{EventBus, SnapshotEvent};
pub use lattice::Lattice;
pub use termination::{TerminationSignal, Verdict};
