//! End-to-end checks of the engine and batching through the public API.

use conway::batch::FLOATS_PER_CELL;
use conway::{BatchBuilder, Grid, RenderSink, Simulation, VertexBatch, present};

#[derive(Default)]
struct CountingSink {
    submits: usize,
    draws: Vec<usize>,
}

impl RenderSink for CountingSink {
    fn submit_vertices(&mut self, _vertices: &[f32], _byte_size: usize) {
        self.submits += 1;
    }

    fn draw(&mut self, vertex_count: usize) {
        self.draws.push(vertex_count);
    }
}

fn live_cells(grid: &Grid) -> Vec<(usize, usize)> {
    grid.cells().filter(|c| c.alive).map(|c| (c.x, c.y)).collect()
}

#[test]
fn blinker_flips_orientation_each_generation() {
    let horizontal: [(usize, usize); 3] = [(1, 2), (2, 2), (3, 2)];
    let vertical: [(usize, usize); 3] = [(2, 1), (2, 2), (2, 3)];
    let mut grid = Grid::from_live_cells(5, 5, &horizontal).unwrap();

    grid.advance();
    assert_eq!(live_cells(&grid), vertical);

    grid.advance();
    assert_eq!(live_cells(&grid), horizontal);
}

#[test]
fn blinker_across_the_seam() {
    // Same oscillator straddling the wrap edge in both axes.
    let mut grid = Grid::from_live_cells(6, 6, &[(5, 0), (0, 0), (1, 0)]).unwrap();
    grid.advance();
    let vertical: Vec<(usize, usize)> = vec![(0, 0), (0, 1), (0, 5)];
    assert_eq!(live_cells(&grid), vertical);
}

#[test]
fn same_seed_same_history() {
    let mut a = Grid::new(64, 64, 0.37, 0xC0FFEE).unwrap();
    let mut b = Grid::new(64, 64, 0.37, 0xC0FFEE).unwrap();
    assert_eq!(a.alive_plane(), b.alive_plane());

    for _ in 0..25 {
        a.advance();
        b.advance();
    }
    assert_eq!(a.alive_plane(), b.alive_plane());
    assert_eq!(a.generation(), 25);

    let c = Grid::new(64, 64, 0.37, 0xBEEF).unwrap();
    assert_ne!(Grid::new(64, 64, 0.37, 0xC0FFEE).unwrap().alive_plane(), c.alive_plane());
}

#[test]
fn vertex_count_is_six_per_live_cell() {
    let mut grid = Grid::new(40, 40, 0.5, 11).unwrap();
    let builder = BatchBuilder::new(&grid);
    let mut batch = VertexBatch::for_grid(&grid);

    for _ in 0..15 {
        let count = builder.build(&grid, &mut batch);
        assert_eq!(count, 6 * grid.live_count());
        assert_eq!(count % 6, 0);
        assert_eq!(batch.as_slice().len(), count * 3);
        grid.advance();
    }
}

#[test]
fn batch_never_reallocates() {
    let grid = Grid::new(32, 48, 0.5, 2).unwrap();
    let builder = BatchBuilder::new(&grid);
    let mut batch = VertexBatch::for_grid(&grid);
    let capacity = batch.capacity();
    assert!(capacity >= 32 * 48 * FLOATS_PER_CELL);

    let full = Grid::new(32, 48, 1.0, 0).unwrap();
    let empty = Grid::empty(32, 48).unwrap();
    let mut sparse = grid;

    builder.build(&full, &mut batch);
    let storage = batch.as_slice().as_ptr();
    assert_eq!(batch.capacity(), capacity);

    for _ in 0..10 {
        builder.build(&sparse, &mut batch);
        assert_eq!(batch.capacity(), capacity);
        builder.build(&empty, &mut batch);
        assert_eq!(batch.capacity(), capacity);
        builder.build(&full, &mut batch);
        assert_eq!(batch.capacity(), capacity);
        assert_eq!(batch.as_slice().as_ptr(), storage);
        sparse.advance();
    }
}

#[test]
fn empty_frame_is_a_no_op_for_the_backend() {
    let grid = Grid::empty(10, 10).unwrap();
    let mut batch = VertexBatch::for_grid(&grid);
    assert_eq!(BatchBuilder::new(&grid).build(&grid, &mut batch), 0);

    let mut sink = CountingSink::default();
    assert_eq!(present(&mut sink, &batch), 0);
    assert_eq!(sink.submits, 0);
    assert!(sink.draws.is_empty());
}

#[test]
fn one_draw_call_per_frame() {
    let mut sim = Simulation::new(Grid::new(50, 50, 0.5, 99).unwrap());
    let mut sink = CountingSink::default();
    let mut drawn_frames = 0;

    for _ in 0..20 {
        let stats = sim.frame(&mut sink).unwrap();
        if stats.vertex_count > 0 {
            drawn_frames += 1;
        }
        assert_eq!(stats.vertex_count, 6 * sim.grid().live_count());
        assert_eq!(sim.batch().vertex_count(), stats.vertex_count);
    }
    assert_eq!(sink.draws.len(), drawn_frames);
    assert_eq!(sink.submits, drawn_frames);
}
