// error.rs - Error types for grid construction, concurrent stepping and config loading

use thiserror::Error;

/// Smallest side length the toroidal neighbour lookup supports.
pub const MIN_SIDE: usize = 2;

#[derive(Debug, Error)]
pub enum LifeError {
    #[error("grid must be at least {min}x{min}, got {rows}x{columns}", min = MIN_SIDE)]
    TooSmall { rows: usize, columns: usize },
    #[error("live threshold {0} must be between 0.0 and 1.0")]
    InvalidThreshold(f64),
    #[error("band worker failed, generation not committed: {0}")]
    BandTask(#[from] tokio::task::JoinError),
    #[error("failed to start band worker runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read or write config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
