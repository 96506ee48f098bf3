// sink.rs - Draws the frame's vertex batch as a single egui mesh

use conway::RenderSink;
use egui::epaint::{Vertex, WHITE_UV};
use egui::{Color32, Mesh, Painter, Pos2, Rect, Shape};

/// Maps NDC triangles into `rect` (y up) and paints them as one mesh.
pub struct PainterSink<'p> {
    painter: &'p Painter,
    rect: Rect,
    color: Color32,
    mesh: Mesh,
}

impl<'p> PainterSink<'p> {
    pub fn new(painter: &'p Painter, rect: Rect, color: Color32) -> Self {
        Self { painter, rect, color, mesh: Mesh::default() }
    }

    fn to_screen(&self, x: f32, y: f32) -> Pos2 {
        Pos2::new(
            self.rect.left() + (x + 1.0) * 0.5 * self.rect.width(),
            self.rect.bottom() - (y + 1.0) * 0.5 * self.rect.height(),
        )
    }
}

impl RenderSink for PainterSink<'_> {
    fn submit_vertices(&mut self, vertices: &[f32], _byte_size: usize) {
        self.mesh.clear();
        self.mesh.reserve_vertices(vertices.len() / 3);
        for v in vertices.chunks_exact(3) {
            let pos = self.to_screen(v[0], v[1]);
            self.mesh.vertices.push(Vertex { pos, uv: WHITE_UV, color: self.color });
        }
    }

    fn draw(&mut self, vertex_count: usize) {
        let count = vertex_count.min(self.mesh.vertices.len());
        if count == 0 {
            return;
        }
        self.mesh.indices.clear();
        self.mesh.indices.extend(0..count as u32);
        self.painter.add(Shape::mesh(std::mem::take(&mut self.mesh)));
    }
}

/// Grid cell under a screen position, inverse of the NDC layout used by
/// `conway::BatchBuilder` (x across, y up).
pub fn cell_at(rect: Rect, pos: Pos2, rows: usize, columns: usize) -> Option<(usize, usize)> {
    if !rect.contains(pos) {
        return None;
    }
    let fx = (pos.x - rect.left()) / rect.width();
    let fy = (rect.bottom() - pos.y) / rect.height();
    let x = (fx * columns as f32) as usize;
    let y = (fy * rows as f32) as usize;
    (x < rows && y < columns).then_some((x, y))
}
