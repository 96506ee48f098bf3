// lib.rs - Conway's Game of Life on a torus, batched into one draw call per frame
// Frame flow: Simulation::frame advances the Grid, BatchBuilder refills the
// VertexBatch, and the batch goes to a RenderSink

mod bands;
pub mod batch;
pub mod config;
pub mod error;
pub mod grid;
pub mod history;
pub mod patterns;
pub mod render;
pub mod sim;

pub use batch::{BatchBuilder, VertexBatch};
pub use config::{LifeConfig, WindowConfig};
pub use error::{ConfigError, LifeError};
pub use grid::{Cell, Grid, next_state};
pub use history::CycleDetector;
pub use patterns::{PATTERNS, Pattern};
pub use render::{RenderSink, present};
pub use sim::{FrameStats, Simulation};
