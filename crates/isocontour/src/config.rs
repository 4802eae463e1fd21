//! Configuration for level selection and contour generation.

use crate::error::{ContourError, Result};
use crate::levels::{BinOptions, MAX_BIN_COUNT};
use serde::{Deserialize, Serialize};

/// Default number of contour bins.
pub const DEFAULT_BIN_COUNT: usize = 10;

/// Configuration for [`ContourGenerator`](crate::ContourGenerator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourConfig {
    /// Number of bins between the minimum and maximum of the field.
    pub bin_count: usize,

    /// Bin width. When set, the bin count is derived from it.
    pub bin_width: Option<f64>,

    /// Process levels on the rayon thread pool.
    pub parallel: bool,
}

impl Default for ContourConfig {
    fn default() -> Self {
        Self {
            bin_count: DEFAULT_BIN_COUNT,
            bin_width: None,
            parallel: true,
        }
    }
}

impl ContourConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("CONTOUR_BIN_COUNT") {
            if let Ok(count) = val.parse() {
                config.bin_count = count;
            }
        }

        if let Ok(val) = std::env::var("CONTOUR_BIN_WIDTH") {
            if let Ok(width) = val.parse() {
                config.bin_width = Some(width);
            }
        }

        if let Ok(val) = std::env::var("CONTOUR_PARALLEL") {
            config.parallel = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Parse configuration from a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.bin_count == 0 {
            return Err(ContourError::Config("bin_count must be > 0".to_string()));
        }

        if self.bin_count > MAX_BIN_COUNT {
            return Err(ContourError::Config(format!(
                "bin_count must be <= {}",
                MAX_BIN_COUNT
            )));
        }

        if let Some(width) = self.bin_width {
            if !width.is_finite() || width <= 0.0 {
                return Err(ContourError::Config(format!(
                    "bin_width must be a positive number (was {})",
                    width
                )));
            }
        }

        Ok(())
    }

    /// Bin options for level selection.
    pub fn bin_options(&self) -> BinOptions {
        BinOptions::new(self.bin_count, self.bin_width)
    }
}
