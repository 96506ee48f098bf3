// patterns.rs - Named seed shapes that can be stamped onto a grid

use tracing::debug;

use crate::grid::Grid;

/// A shape given as `(dx, dy)` offsets of its live cells from its
/// lower-left corner.
#[derive(Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub static PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "Toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10), (2, 0), (2, 5),
            (2, 7), (2, 12), (3, 0), (3, 5), (3, 7), (3, 12), (4, 0), (4, 5),
            (4, 7), (4, 12), (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10), (8, 0), (8, 5),
            (8, 7), (8, 12), (9, 0), (9, 5), (9, 7), (9, 12), (10, 0), (10, 5),
            (10, 7), (10, 12), (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (0, 4), (1, 4), (0, 5), (1, 5), (10, 4), (10, 5), (10, 6), (11, 3),
            (11, 7), (12, 2), (12, 8), (13, 2), (13, 8), (14, 5), (15, 3), (15, 7),
            (16, 4), (16, 5), (16, 6), (17, 5), (20, 2), (20, 3), (20, 4), (21, 2),
            (21, 3), (21, 4), (22, 1), (22, 5), (24, 0), (24, 1), (24, 5), (24, 6),
            (34, 2), (34, 3), (35, 2), (35, 3),
        ],
    },
];

/// Index into [`PATTERNS`], case-insensitive.
pub fn position(name: &str) -> Option<usize> {
    PATTERNS.iter().position(|p| p.name.eq_ignore_ascii_case(name))
}

/// Case-insensitive lookup by name.
pub fn find(name: &str) -> Option<&'static Pattern> {
    position(name).map(|i| &PATTERNS[i])
}

impl Pattern {
    /// Bounding box as `(width, height)` in cells.
    pub fn extent(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(w, h), &(dx, dy)| (w.max(dx + 1), h.max(dy + 1)))
    }

    /// Sets the pattern's cells alive with its corner at `origin`. Cells
    /// past an edge wrap around. Other cells are left untouched.
    pub fn place(&self, grid: &mut Grid, origin: (usize, usize)) {
        let (rows, columns) = (grid.rows(), grid.columns());
        for &(dx, dy) in self.cells {
            grid.set_alive((origin.0 + dx) % rows, (origin.1 + dy) % columns, true);
        }
        debug!(pattern = self.name, x = origin.0, y = origin.1, "Placed pattern");
    }

    /// Clears the grid and places the pattern in the middle of it.
    pub fn apply_centered(&self, grid: &mut Grid) {
        grid.clear();
        let (w, h) = self.extent();
        let origin = (
            grid.rows().saturating_sub(w) / 2,
            grid.columns().saturating_sub(h) / 2,
        );
        self.place(grid, origin);
    }
}
