//! The shared state vector and its consistency discipline.
//!
//! One `Lattice` is created by the coordinator and handed to every cell task
//! behind an `Arc`; there is no ambient/global state. Two access paths exist
//! by design:
//!
//! - `update` runs the read-neighbors/write-own-slot step under a single
//!   colony-wide write gate, so updates are serialized across all cells.
//! - `sum_relaxed` and `snapshot` read the cells without the gate. These are
//!   intentionally racy reads of evolving state: termination detection and
//!   snapshot rendering are eventually consistent, not snapshot-consistent.
//!
//! Cells are atomics, so the unlocked readers are well-defined and every
//! observed value is exactly the 0 or 1 some writer stored.

use std::sync::atomic::{AtomicU8, Ordering};

use anyhow::{bail, Result};
use tokio::sync::Mutex;

use crate::rule::{neighbors, next_state};

/// Fixed-length vector of binary cell values with a colony-wide write gate.
pub struct Lattice {
    cells: Box<[AtomicU8]>,
    gate: Mutex<()>,
}

impl Lattice {
    /// Build a lattice from explicit initial values.
    ///
    /// Fails on an empty vector or on any value outside {0, 1}.
    pub fn from_cells(values: Vec<u8>) -> Result<Self> {
        if values.is_empty() {
            bail!("lattice must contain at least one cell");
        }
        if let Some(bad) = values.iter().find(|&&v| v > 1) {
            bail!("cell values must be 0 or 1, got {bad}");
        }
        let cells = values.into_iter().map(AtomicU8::new).collect();
        Ok(Self {
            cells,
            gate: Mutex::new(()),
        })
    }

    /// Number of cells in the colony.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Current value of cell `index` (unlocked read).
    pub fn get(&self, index: usize) -> u8 {
        self.cells[index].load(Ordering::Relaxed)
    }

    /// Recompute cell `index` from its neighbors' current values and store
    /// the result, all under the colony-wide write gate.
    ///
    /// Returns the value written. Waiting on the gate is cancel-safe: a task
    /// that gives up while queued has touched nothing.
    pub async fn update(&self, index: usize) -> u8 {
        let _guard = self.gate.lock().await;
        let sum: u8 = neighbors(index, self.cells.len())
            .into_iter()
            .map(|j| self.cells[j].load(Ordering::Relaxed))
            .sum();
        let next = next_state(sum);
        self.cells[index].store(next, Ordering::Relaxed);
        next
    }

    /// Sum of all cell values, read without the write gate.
    ///
    /// This is the racy termination read: it may interleave with in-flight
    /// updates, so an exact terminal configuration can be missed on one
    /// cycle and caught on a later one.
    pub fn sum_relaxed(&self) -> usize {
        self.cells
            .iter()
            .map(|c| c.load(Ordering::Relaxed) as usize)
            .sum()
    }

    /// Copy of the current cell values, read without the write gate.
    pub fn snapshot(&self) -> Vec<u8> {
        self.cells
            .iter()
            .map(|c| c.load(Ordering::Relaxed))
            .collect()
    }
}

impl std::fmt::Debug for Lattice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lattice")
            .field("cells", &self.snapshot())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_vector() {
        assert!(Lattice::from_cells(Vec::new()).is_err());
    }

    #[test]
    fn rejects_non_binary_values() {
        assert!(Lattice::from_cells(vec![0, 1, 2]).is_err());
    }

    #[test]
    fn sum_and_snapshot_reflect_seed() {
        let lattice = Lattice::from_cells(vec![1, 0, 1, 1]).unwrap();
        assert_eq!(lattice.len(), 4);
        assert_eq!(lattice.sum_relaxed(), 3);
        assert_eq!(lattice.snapshot(), vec![1, 0, 1, 1]);
    }

    #[tokio::test]
    async fn update_applies_rule_to_own_slot() {
        // [1,0,1]: cell 1 sees sum 2 and dies; its neighbors then starve.
        let lattice = Lattice::from_cells(vec![1, 0, 1]).unwrap();
        assert_eq!(lattice.update(1).await, 0);
        assert_eq!(lattice.update(0).await, 0);
        assert_eq!(lattice.update(2).await, 0);
        assert_eq!(lattice.snapshot(), vec![0, 0, 0]);
        assert_eq!(lattice.sum_relaxed(), 0);
    }

    #[tokio::test]
    async fn all_ones_interior_flips_after_one_pass() {
        let lattice = Lattice::from_cells(vec![1, 1, 1, 1]).unwrap();
        for i in 0..lattice.len() {
            lattice.update(i).await;
        }
        // Interior cells saw two live neighbors and died, so the colony
        // cannot remain all-alive past the first full pass.
        assert_ne!(lattice.snapshot(), vec![1, 1, 1, 1]);
        assert_eq!(lattice.get(1), 0);
    }

    #[tokio::test]
    async fn concurrent_updates_keep_values_binary() {
        use std::sync::Arc;

        let lattice = Arc::new(Lattice::from_cells(vec![1, 0, 1, 0, 1, 0, 1, 0]).unwrap());
        let len = lattice.len();

        let mut handles = Vec::new();
        for i in 0..len {
            let lattice = lattice.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..200 {
                    let value = lattice.update(i).await;
                    assert!(value <= 1);
                    assert!(lattice.sum_relaxed() <= len);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(lattice.snapshot().into_iter().all(|v| v <= 1));
    }
}
