//! Engine configuration.
//!
//! Every field has a default, so a partial JSON object (or `{}`) is a valid
//! configuration.

use rd_core::geometry::{DEFAULT_GRID_SIZE, DEFAULT_WALL_MARGIN};
use rd_core::history::DEFAULT_MAX_HISTORY;
use rd_core::registry::DEFAULT_SPAWN_INSET;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid engine config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot read engine config: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for `SceneEngine`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Quiescence window before a burst of edits is committed to history.
    /// Default: **300** ms.
    pub debounce_ms: u64,

    /// Distance kept between an item's origin and each wall. Default: **0.5**.
    pub wall_margin: f64,

    /// Snap grid cell size. Default: **1.0**.
    pub grid_size: f64,

    /// Initial snap-to-grid state. Default: **false**.
    pub snap_to_grid: bool,

    /// New items spawn uniformly over `(width - inset) × (length - inset)`.
    /// Default: **4.0**.
    pub spawn_inset: f64,

    /// Maximum stored history entries; `0` keeps everything. Default: **100**.
    pub max_history: usize,

    /// Fixed RNG seed for spawn points. Default: none (OS entropy).
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            wall_margin: DEFAULT_WALL_MARGIN,
            grid_size: DEFAULT_GRID_SIZE,
            snap_to_grid: false,
            spawn_inset: DEFAULT_SPAWN_INSET,
            max_history: DEFAULT_MAX_HISTORY,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// # Errors
    /// Returns `Parse` if the JSON is malformed or a field has the wrong type.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// # Errors
    /// Returns `Io` if the file cannot be read, otherwise as [`Self::from_json`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
