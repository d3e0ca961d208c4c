use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BASELINE_SCORE: f64 = 70.0;
pub const POINTS_PER_STD: f64 = 10.0;
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;
/// Absolute tolerance under which a measured std counts as zero.
pub const ZERO_STD_TOLERANCE: f64 = 1e-8;

pub const DEFAULT_MIN_STD_FLOOR: f64 = 5.0;
pub const RECOMMENDED_FLOOR_RANGE: (f64, f64) = (1.0, 20.0);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("min_std_floor must be a finite positive number, got {0}")]
    InvalidFloor(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Measured space std below this value is replaced by it.
    #[serde(default = "default_floor")]
    pub min_std_floor: f64,
}

fn default_floor() -> f64 {
    DEFAULT_MIN_STD_FLOOR
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_std_floor: DEFAULT_MIN_STD_FLOOR,
        }
    }
}

impl ScoringConfig {
    pub fn with_floor(min_std_floor: f64) -> Self {
        Self { min_std_floor }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_std_floor.is_finite() || self.min_std_floor <= 0.0 {
            return Err(ConfigError::InvalidFloor(self.min_std_floor));
        }
        let (lo, hi) = RECOMMENDED_FLOOR_RANGE;
        if self.min_std_floor < lo || self.min_std_floor > hi {
            tracing::warn!(
                min_std_floor = self.min_std_floor,
                "min_std_floor is outside the recommended range {lo}..={hi}"
            );
        }
        Ok(())
    }
}
