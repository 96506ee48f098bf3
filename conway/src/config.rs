// config.rs - Startup configuration, loadable from YAML
// Read once when the process starts; the engine only sees the plain values

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, LifeError};
use crate::grid::{check_dimensions, check_threshold};
use crate::patterns;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    /// Grid rows (x axis, drawn horizontally)
    pub rows: usize,
    /// Grid columns (y axis, drawn vertically)
    pub columns: usize,
    /// Probability that a cell starts alive (0.0 - 1.0)
    pub threshold: f64,
    /// Target generations per second
    pub fps: u32,
    /// RNG seed; `None` means seed from the wall clock at startup
    pub seed: Option<u64>,
    /// Row bands stepped concurrently; 1 steps on the calling thread
    pub bands: usize,
    /// Start from this named pattern instead of a random fill
    pub pattern: Option<String>,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            rows: 250,
            columns: 250,
            threshold: 0.5,
            fps: 60,
            seed: None,
            bands: 1,
            pattern: None,
            window: WindowConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
        }
    }
}

impl LifeConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: LifeConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dimensions(self.rows, self.columns).map_err(invalid)?;
        check_threshold(self.threshold).map_err(invalid)?;
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be > 0".to_string()));
        }
        if self.bands == 0 {
            return Err(ConfigError::Invalid("bands must be > 0".to_string()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window must be at least 1x1".to_string()));
        }
        if let Some(name) = &self.pattern {
            if patterns::find(name).is_none() {
                return Err(ConfigError::Invalid(format!("unknown pattern '{name}'")));
            }
        }
        if self.rows != self.columns {
            warn!(
                rows = self.rows,
                columns = self.columns,
                "Non-square grid: cells are laid out x by column width, part of it may fall outside the view"
            );
        }
        Ok(())
    }

    /// Time budget for one frame at the configured rate.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

fn invalid(err: LifeError) -> ConfigError {
    ConfigError::Invalid(err.to_string())
}
