// batch.rs - Builds one triangle-list vertex buffer per frame from the live cells

use crate::grid::Grid;

/// Floats per vertex (x, y, z).
pub const FLOATS_PER_VERTEX: usize = 3;
/// Two triangles per cell.
pub const VERTICES_PER_CELL: usize = 6;
pub const FLOATS_PER_CELL: usize = VERTICES_PER_CELL * FLOATS_PER_VERTEX;

/// Reusable per-frame buffer of `(x, y, z)` triples in normalized device
/// coordinates. Sized up front for a fully alive grid so that filling it
/// never reallocates.
#[derive(Debug, Clone)]
pub struct VertexBatch {
    data: Vec<f32>,
}

impl VertexBatch {
    /// Reserves `cells * 18` floats.
    pub fn with_cells(cells: usize) -> Self {
        Self {
            data: Vec::with_capacity(cells * FLOATS_PER_CELL),
        }
    }

    pub fn for_grid(grid: &Grid) -> Self {
        Self::with_cells(grid.rows() * grid.columns())
    }

    /// Drops the contents, keeps the allocation.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn vertex_count(&self) -> usize {
        self.data.len() / FLOATS_PER_VERTEX
    }

    pub fn byte_size(&self) -> usize {
        std::mem::size_of_val(self.data.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Capacity in floats.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Appends the rectangle `[px, px + w] x [py, py + h]` as two triangles
    /// sharing the top-left/bottom-right diagonal.
    #[inline]
    fn push_quad(&mut self, px: f32, py: f32, w: f32, h: f32) {
        self.data.extend_from_slice(&[
            px,     py + h, 0.0, // Top-Left
            px,     py,     0.0, // Bottom-Left
            px + w, py,     0.0, // Bottom-Right

            px,     py + h, 0.0, // Top-Left
            px + w, py + h, 0.0, // Top-Right
            px + w, py,     0.0, // Bottom-Right
        ]);
    }
}

/// Converts a grid's live cells into a [`VertexBatch`] for a single draw call.
///
/// Cell size is fixed by the grid dimensions, so it is computed once here:
/// `2 / columns` wide and `2 / rows` high. A cell at `(x, y)` has its
/// lower-left corner at `(-1 + x * width, -1 + y * height)`.
#[derive(Debug, Clone, Copy)]
pub struct BatchBuilder {
    rows: usize,
    columns: usize,
    cell_w: f32,
    cell_h: f32,
}

impl BatchBuilder {
    pub fn new(grid: &Grid) -> Self {
        Self {
            rows: grid.rows(),
            columns: grid.columns(),
            cell_w: 2.0 / grid.columns() as f32,
            cell_h: 2.0 / grid.rows() as f32,
        }
    }

    /// Width and height of one cell in NDC units.
    pub fn cell_size(&self) -> (f32, f32) {
        (self.cell_w, self.cell_h)
    }

    /// Refills `batch` with six vertices per live cell, visiting cells in
    /// row-major order. Returns the vertex count, always a multiple of 6.
    pub fn build(&self, grid: &Grid, batch: &mut VertexBatch) -> usize {
        debug_assert_eq!(
            (grid.rows(), grid.columns()),
            (self.rows, self.columns),
            "builder used with a grid of different dimensions"
        );
        batch.clear();

        for (x, row) in grid.alive_plane().chunks_exact(self.columns).enumerate() {
            let px = -1.0 + x as f32 * self.cell_w;
            for (y, _) in row.iter().enumerate().filter(|&(_, &alive)| alive) {
                let py = -1.0 + y as f32 * self.cell_h;
                batch.push_quad(px, py, self.cell_w, self.cell_h);
            }
        }

        batch.vertex_count()
    }
}
