// grid.rs - Double-buffered toroidal grid for Conway's Game of Life

use std::ops::Range;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::error::{LifeError, MIN_SIDE};

/// One cell as seen by readers. Produced in row-major order by [`Grid::cells`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub alive: bool,
}

/// Fixed-size Life grid whose edges wrap around (a torus).
///
/// Two alive-planes are kept: `front` holds generation N and is what
/// readers see, `back` is scratch space that [`Grid::advance`] fills with
/// generation N+1 before the planes are swapped. Neighbour counts are only
/// ever read from `front`, so no cell can observe a partially updated
/// generation.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    columns: usize,
    pub(crate) front: Vec<bool>,
    pub(crate) back: Vec<bool>,
    /// Per-band staging buffers, kept between banded steps.
    pub(crate) band_scratch: Vec<Vec<bool>>,
    generation: u64,
}

impl Grid {
    /// Builds a grid where each cell is independently alive with
    /// probability `threshold`. The same `seed` always yields the same grid.
    ///
    /// Grids smaller than 2x2 are rejected because the wraparound would
    /// count the same cell as more than one neighbour. A `threshold`
    /// outside `[0, 1]` (or NaN) is rejected rather than clamped.
    pub fn new(rows: usize, columns: usize, threshold: f64, seed: u64) -> Result<Self, LifeError> {
        check_threshold(threshold)?;
        let mut grid = Self::empty(rows, columns)?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for cell in grid.front.iter_mut() {
            *cell = rng.gen_bool(threshold);
        }

        info!(
            rows,
            columns,
            threshold,
            seed,
            live = grid.live_count(),
            "Seeded grid"
        );
        Ok(grid)
    }

    /// An all-dead grid.
    pub fn empty(rows: usize, columns: usize) -> Result<Self, LifeError> {
        check_dimensions(rows, columns)?;
        Ok(Self {
            rows,
            columns,
            front: vec![false; rows * columns],
            back: vec![false; rows * columns],
            band_scratch: Vec::new(),
            generation: 0,
        })
    }

    /// A grid with exactly the listed cells alive. Coordinates wrap.
    pub fn from_live_cells(rows: usize, columns: usize, cells: &[(usize, usize)]) -> Result<Self, LifeError> {
        let mut grid = Self::empty(rows, columns)?;
        for &(x, y) in cells {
            grid.set_alive(x % rows, y % columns, true);
        }
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of generations advanced since construction or the last [`Grid::clear`].
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current generation as a row-major plane (`x * columns + y`).
    pub fn alive_plane(&self) -> &[bool] {
        &self.front
    }

    /// # Panics
    /// If `x >= rows` or `y >= columns`.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.front[self.index(x, y)]
    }

    /// # Panics
    /// If `x >= rows` or `y >= columns`.
    pub fn set_alive(&mut self, x: usize, y: usize, alive: bool) {
        let i = self.index(x, y);
        self.front[i] = alive;
    }

    /// Flips one cell. Returns the new state, or `None` when the
    /// coordinates are outside the grid.
    pub fn toggle(&mut self, x: usize, y: usize) -> Option<bool> {
        if x >= self.rows || y >= self.columns {
            return None;
        }
        let i = self.index(x, y);
        self.front[i] = !self.front[i];
        Some(self.front[i])
    }

    /// Kills every cell and resets the generation counter.
    pub fn clear(&mut self) {
        self.front.fill(false);
        self.generation = 0;
    }

    pub fn live_count(&self) -> usize {
        self.front.iter().filter(|&&alive| alive).count()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let columns = self.columns;
        self.front.iter().enumerate().map(move |(i, &alive)| Cell {
            x: i / columns,
            y: i % columns,
            alive,
        })
    }

    /// Live cells among the 8 toroidal neighbours of `(x, y)`.
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let (up, down) = (wrap_prev(x, self.rows), wrap_next(x, self.rows));
        let (left, right) = (wrap_prev(y, self.columns), wrap_next(y, self.columns));
        [
            (up, left), (up, y), (up, right),
            (x, left),           (x, right),
            (down, left), (down, y), (down, right),
        ]
        .iter()
        .filter(|&&(nx, ny)| self.is_alive(nx, ny))
        .count() as u8
    }

    /// Advances one generation under B3/S23.
    ///
    /// Every cell is staged into the back plane from the front plane first,
    /// then the planes are swapped in one step.
    pub fn advance(&mut self) {
        stage_rows(&self.front, self.rows, self.columns, 0..self.rows, &mut self.back);
        self.commit();
    }

    /// Makes the staged back plane current.
    pub(crate) fn commit(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
        self.generation += 1;
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.rows && y < self.columns,
            "cell ({x}, {y}) outside {}x{} grid",
            self.rows,
            self.columns
        );
        x * self.columns + y
    }
}

/// B3/S23 transition for one cell.
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    match (alive, live_neighbors) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    }
}

/// Computes the next state of every cell in `band` (a range of rows) from
/// `front`, writing row-major into `out`, which holds exactly those rows.
pub(crate) fn stage_rows(front: &[bool], rows: usize, columns: usize, band: Range<usize>, out: &mut [bool]) {
    debug_assert_eq!(out.len(), band.len() * columns);

    let row = |x: usize| &front[x * columns..(x + 1) * columns];

    for (staged, x) in out.chunks_exact_mut(columns).zip(band) {
        let above = row(wrap_prev(x, rows));
        let here = row(x);
        let below = row(wrap_next(x, rows));

        for (y, next) in staged.iter_mut().enumerate() {
            let (left, right) = (wrap_prev(y, columns), wrap_next(y, columns));
            let count = above[left] as u8 + above[y] as u8 + above[right] as u8
                + here[left] as u8 + here[right] as u8
                + below[left] as u8 + below[y] as u8 + below[right] as u8;
            *next = next_state(here[y], count);
        }
    }
}

#[inline]
fn wrap_prev(i: usize, n: usize) -> usize {
    if i == 0 { n - 1 } else { i - 1 }
}

#[inline]
fn wrap_next(i: usize, n: usize) -> usize {
    if i + 1 == n { 0 } else { i + 1 }
}

pub(crate) fn check_dimensions(rows: usize, columns: usize) -> Result<(), LifeError> {
    if rows < MIN_SIDE || columns < MIN_SIDE {
        return Err(LifeError::TooSmall { rows, columns });
    }
    Ok(())
}

pub(crate) fn check_threshold(threshold: f64) -> Result<(), LifeError> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(LifeError::InvalidThreshold(threshold));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Centre of a 3x3 torus with `k` of its 8 neighbours alive.
    fn neighbourhood(center_alive: bool, k: usize) -> Grid {
        let ring = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)];
        let mut grid = Grid::from_live_cells(3, 3, &ring[..k]).unwrap();
        grid.set_alive(1, 1, center_alive);
        grid
    }

    #[test]
    fn rules_hold_for_every_neighbour_count() {
        for center_alive in [false, true] {
            for k in 0..=8 {
                let mut grid = neighbourhood(center_alive, k);
                assert_eq!(grid.live_neighbors(1, 1) as usize, k);
                grid.advance();
                let expected = (center_alive && (k == 2 || k == 3)) || (!center_alive && k == 3);
                assert_eq!(grid.is_alive(1, 1), expected, "alive={center_alive} k={k}");
            }
        }
    }

    #[test]
    fn corner_sees_wrapped_neighbours() {
        let n = 6;
        let grid = Grid::from_live_cells(n, n, &[(n - 1, n - 1)]).unwrap();
        assert_eq!(grid.live_neighbors(0, 0), 1);

        let grid = Grid::from_live_cells(n, n, &[(n - 1, 0), (0, n - 1)]).unwrap();
        assert_eq!(grid.live_neighbors(0, 0), 2);
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(matches!(Grid::empty(0, 5), Err(LifeError::TooSmall { rows: 0, columns: 5 })));
        assert!(matches!(Grid::empty(5, 1), Err(LifeError::TooSmall { .. })));
        assert!(Grid::empty(2, 2).is_ok());
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        assert!(matches!(Grid::new(4, 4, 1.5, 0), Err(LifeError::InvalidThreshold(_))));
        assert!(matches!(Grid::new(4, 4, -0.1, 0), Err(LifeError::InvalidThreshold(_))));
        assert!(matches!(Grid::new(4, 4, f64::NAN, 0), Err(LifeError::InvalidThreshold(_))));
    }

    #[test]
    fn threshold_extremes() {
        assert_eq!(Grid::new(8, 8, 0.0, 3).unwrap().live_count(), 0);
        assert_eq!(Grid::new(8, 8, 1.0, 3).unwrap().live_count(), 64);
    }

    #[test]
    fn toggle_is_checked() {
        let mut grid = Grid::empty(4, 4).unwrap();
        assert_eq!(grid.toggle(1, 2), Some(true));
        assert_eq!(grid.toggle(1, 2), Some(false));
        assert_eq!(grid.toggle(4, 0), None);
    }

    #[test]
    fn clear_resets_generation() {
        let mut grid = Grid::new(10, 10, 0.5, 9).unwrap();
        grid.advance();
        grid.advance();
        assert_eq!(grid.generation(), 2);
        grid.clear();
        assert_eq!(grid.generation(), 0);
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn cells_are_row_major() {
        let grid = Grid::from_live_cells(2, 3, &[(1, 0)]).unwrap();
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[3], Cell { x: 1, y: 0, alive: true });
        assert!(cells.iter().filter(|c| c.alive).count() == 1);
    }
}
