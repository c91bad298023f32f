//! Configuration management for the limiter.

use serde::{Deserialize, Serialize};

use crate::error::{LimiterError, Result};

/// Configuration for a [`Limiter`](crate::Limiter).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimiterConfig {
    /// Maximum points any single consumer may accumulate per reset window
    pub max_points: u64,

    /// Interval between periodic budget resets, in milliseconds.
    ///
    /// A value of 0 is treated as unset and replaced with the default.
    #[serde(default = "default_reset_interval_ms")]
    pub reset_interval_ms: u64,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            max_points: default_max_points(),
            reset_interval_ms: default_reset_interval_ms(),
        }
    }
}

fn default_max_points() -> u64 {
    1000
}

fn default_reset_interval_ms() -> u64 {
    1000
}

impl LimiterConfig {
    /// Create a configuration with the given maximum and the default
    /// reset interval.
    pub fn new(max_points: u64) -> Self {
        Self {
            max_points,
            reset_interval_ms: default_reset_interval_ms(),
        }
    }

    /// Load configuration from a YAML file path.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| LimiterError::Config(e.to_string()))?;
        let config: LimiterConfig =
            serde_yaml::from_str(&contents).map_err(|e| LimiterError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration, substituting the default reset interval
    /// for an unset (zero) value first.
    ///
    /// Returns the normalized configuration on success.
    pub fn validated(mut self) -> Result<Self> {
        if self.reset_interval_ms == 0 {
            self.reset_interval_ms = default_reset_interval_ms();
        }

        if self.max_points < 1 {
            return Err(LimiterError::Config(
                "max_points must be at least 1".to_string(),
            ));
        }

        Ok(self)
    }
}
