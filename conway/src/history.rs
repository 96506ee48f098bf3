// history.rs - Detects when the grid revisits a recent state

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tracing::debug;

use crate::grid::Grid;

/// How many recent generations are remembered.
pub const HISTORY_LEN: usize = 10;

/// Ring of the last [`HISTORY_LEN`] grid hashes. Catches still lifes and
/// oscillators with a period up to that length.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    history: [u64; HISTORY_LEN],
    count: usize,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything, e.g. after the grid was edited.
    pub fn reset(&mut self) {
        self.history = [0; HISTORY_LEN];
        self.count = 0;
    }

    /// Records the grid's current state. Returns `true` if the same state
    /// was already seen within the remembered window.
    pub fn observe(&mut self, grid: &Grid) -> bool {
        let current = state_hash(grid);
        let filled = self.count.min(HISTORY_LEN);
        if self.history[..filled].contains(&current) {
            debug!(generation = grid.generation(), "Cycle detected");
            return true;
        }
        self.history[self.count % HISTORY_LEN] = current;
        self.count += 1;
        false
    }
}

pub fn state_hash(grid: &Grid) -> u64 {
    let mut hasher = DefaultHasher::new();
    grid.rows().hash(&mut hasher);
    grid.columns().hash(&mut hasher);
    grid.alive_plane().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blinker_cycles_within_two_generations() {
        let mut grid = Grid::from_live_cells(6, 6, &[(1, 2), (2, 2), (3, 2)]).unwrap();
        let mut detector = CycleDetector::new();
        assert!(!detector.observe(&grid));
        grid.advance();
        assert!(!detector.observe(&grid));
        grid.advance();
        assert!(detector.observe(&grid));
    }

    #[test]
    fn reset_forgets_history() {
        let grid = Grid::from_live_cells(4, 4, &[(0, 0)]).unwrap();
        let mut detector = CycleDetector::new();
        detector.observe(&grid);
        detector.reset();
        assert!(!detector.observe(&grid));
    }

    #[test]
    fn fresh_detector_ignores_unfilled_slots() {
        // An all-dead grid must not match the zero-initialized history.
        let grid = Grid::empty(4, 4).unwrap();
        let mut detector = CycleDetector::new();
        assert!(!detector.observe(&grid));
    }
}
