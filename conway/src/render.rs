// render.rs - Boundary to the graphics backend

use tracing::trace;

use crate::batch::VertexBatch;

/// What the core needs from a graphics backend: upload a flat buffer of
/// `(x, y, z)` floats, then draw it as a triangle list.
pub trait RenderSink {
    /// `byte_size` is the size of `vertices` in bytes.
    fn submit_vertices(&mut self, vertices: &[f32], byte_size: usize);

    fn draw(&mut self, vertex_count: usize);
}

/// Uploads `batch` and issues exactly one draw call for it. An empty batch
/// reaches neither method. Returns the number of vertices drawn.
pub fn present<S: RenderSink + ?Sized>(sink: &mut S, batch: &VertexBatch) -> usize {
    let vertex_count = batch.vertex_count();
    if vertex_count == 0 {
        trace!("Empty frame, nothing to draw");
        return 0;
    }
    sink.submit_vertices(batch.as_slice(), batch.byte_size());
    sink.draw(vertex_count);
    vertex_count
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every call for assertions.
    #[derive(Default)]
    pub(crate) struct RecordingSink {
        pub submitted: Vec<(usize, usize)>,
        pub draws: Vec<usize>,
    }

    impl RenderSink for RecordingSink {
        fn submit_vertices(&mut self, vertices: &[f32], byte_size: usize) {
            self.submitted.push((vertices.len(), byte_size));
        }

        fn draw(&mut self, vertex_count: usize) {
            self.draws.push(vertex_count);
        }
    }

    #[test]
    fn empty_batch_is_skipped() {
        let batch = VertexBatch::with_cells(4);
        let mut sink = RecordingSink::default();
        assert_eq!(present(&mut sink, &batch), 0);
        assert!(sink.submitted.is_empty());
        assert!(sink.draws.is_empty());
    }
}
