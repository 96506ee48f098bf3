// bands.rs - Concurrent generation step, one tokio task per band of rows

use std::sync::Arc;

use tokio::runtime::Runtime;
use tracing::trace;

use crate::error::LifeError;
use crate::grid::{Grid, stage_rows};

impl Grid {
    /// Same result as [`Grid::advance`], with the rows split into `bands`
    /// contiguous bands staged concurrently on `runtime`.
    ///
    /// The front plane is shared read-only with every band for the duration
    /// of the step and handed back afterwards. Band buffers are kept on the
    /// grid and reused. Nothing is committed until every band has finished;
    /// if any band fails the grid is left at generation N.
    ///
    /// Must not be called from inside an async context of `runtime`.
    pub fn advance_banded(&mut self, runtime: &Runtime, bands: usize) -> Result<(), LifeError> {
        let (rows, columns) = (self.rows(), self.columns());
        let band_rows = rows.div_ceil(bands.clamp(1, rows));
        let band_count = rows.div_ceil(band_rows);

        let front = Arc::new(std::mem::take(&mut self.front));
        let mut scratch = std::mem::take(&mut self.band_scratch);
        scratch.resize_with(band_count, Vec::new);

        let staged = runtime.block_on(async {
            let handles: Vec<_> = scratch
                .drain(..)
                .zip((0..rows).step_by(band_rows))
                .map(|(mut out, start)| {
                    let front = Arc::clone(&front);
                    let band = start..(start + band_rows).min(rows);
                    tokio::spawn(async move {
                        out.resize(band.len() * columns, false);
                        stage_rows(&front, rows, columns, band.clone(), &mut out);
                        (band.start, out)
                    })
                })
                .collect();

            // Wait for every band and collect results with row identification
            let mut staged = Vec::with_capacity(handles.len());
            for handle in handles {
                staged.push(handle.await?);
            }
            Ok::<_, tokio::task::JoinError>(staged)
        });

        // Bands still running after a failure hold a reference; copy back then.
        self.front = Arc::try_unwrap(front).unwrap_or_else(|shared| shared.to_vec());
        let staged = staged?;

        trace!(bands = staged.len(), band_rows, "Bands staged");
        for (start, band) in staged {
            let offset = start * columns;
            self.back[offset..offset + band.len()].copy_from_slice(&band);
            self.band_scratch.push(band);
        }
        self.commit();
        Ok(())
    }
}
