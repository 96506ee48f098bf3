// sim.rs - Per-frame driver: advance, build the vertex batch, present it

use tokio::runtime::{Builder, Runtime};
use tracing::{info, trace};

use crate::batch::{BatchBuilder, VERTICES_PER_CELL, VertexBatch};
use crate::error::LifeError;
use crate::grid::Grid;
use crate::history::CycleDetector;
use crate::patterns::Pattern;
use crate::render::{RenderSink, present};

/// What one frame produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub generation: u64,
    pub live_cells: usize,
    pub vertex_count: usize,
    /// The grid repeated a recently seen state this frame.
    pub cycle: bool,
}

enum Stepper {
    Sequential,
    Banded { runtime: Runtime, bands: usize },
}

/// Owns the grid and the frame's vertex batch for the lifetime of the
/// render loop.
pub struct Simulation {
    grid: Grid,
    builder: BatchBuilder,
    batch: VertexBatch,
    cycles: CycleDetector,
    stepper: Stepper,
}

impl Simulation {
    pub fn new(grid: Grid) -> Self {
        let builder = BatchBuilder::new(&grid);
        let batch = VertexBatch::for_grid(&grid);
        let mut cycles = CycleDetector::new();
        cycles.observe(&grid);
        Self {
            grid,
            builder,
            batch,
            cycles,
            stepper: Stepper::Sequential,
        }
    }

    /// Steps generations on `bands` concurrent row bands. One band keeps
    /// stepping on the calling thread.
    pub fn with_bands(mut self, bands: usize) -> Result<Self, LifeError> {
        self.stepper = if bands <= 1 {
            Stepper::Sequential
        } else {
            let runtime = Builder::new_multi_thread()
                .thread_name("conway-band")
                .build()
                .map_err(LifeError::Runtime)?;
            info!(bands, "Stepping generations on concurrent bands");
            Stepper::Banded { runtime, bands }
        };
        Ok(self)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn batch(&self) -> &VertexBatch {
        &self.batch
    }

    /// Advances one generation. Returns `true` if the new state repeats a
    /// recent one.
    pub fn step(&mut self) -> Result<bool, LifeError> {
        match &self.stepper {
            Stepper::Sequential => self.grid.advance(),
            Stepper::Banded { runtime, bands } => self.grid.advance_banded(runtime, *bands)?,
        }
        Ok(self.cycles.observe(&self.grid))
    }

    /// Rebuilds the batch from the current grid and hands it to `sink`
    /// without advancing.
    pub fn render<S: RenderSink + ?Sized>(&mut self, sink: &mut S) -> FrameStats {
        let vertex_count = self.builder.build(&self.grid, &mut self.batch);
        present(sink, &self.batch);
        let stats = FrameStats {
            generation: self.grid.generation(),
            live_cells: vertex_count / VERTICES_PER_CELL,
            vertex_count,
            cycle: false,
        };
        trace!(
            generation = stats.generation,
            live = stats.live_cells,
            vertices = stats.vertex_count,
            "Frame built"
        );
        stats
    }

    /// One full frame: advance, build, present.
    pub fn frame<S: RenderSink + ?Sized>(&mut self, sink: &mut S) -> Result<FrameStats, LifeError> {
        let cycle = self.step()?;
        Ok(FrameStats {
            cycle,
            ..self.render(sink)
        })
    }

    /// Flips one cell. Returns the new state, `None` if out of range.
    pub fn toggle(&mut self, x: usize, y: usize) -> Option<bool> {
        let state = self.grid.toggle(x, y);
        if state.is_some() {
            self.restart_history();
        }
        state
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        self.restart_history();
    }

    pub fn apply_pattern(&mut self, pattern: &Pattern) {
        pattern.apply_centered(&mut self.grid);
        self.restart_history();
    }

    /// Replaces the grid with a fresh random fill of the same size.
    pub fn reseed(&mut self, threshold: f64, seed: u64) -> Result<(), LifeError> {
        self.grid = Grid::new(self.grid.rows(), self.grid.columns(), threshold, seed)?;
        self.restart_history();
        Ok(())
    }

    /// Edits invalidate old history; the edited state becomes the first entry.
    fn restart_history(&mut self) {
        self.cycles.reset();
        self.cycles.observe(&self.grid);
    }
}
