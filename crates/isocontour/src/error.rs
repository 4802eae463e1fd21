//! Error types for contour computation.

use thiserror::Error;

/// Errors that can occur while computing isolines or isobands.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContourError {
    /// Column or row count could not be inferred, or is below 2.
    #[error("invalid grid shape: {0}")]
    InvalidGridShape(String),

    /// The scalar field is malformed (ragged, non-finite, bad ranges).
    #[error("invalid scalar field: {0}")]
    InvalidField(String),

    /// Levels are not finite or not strictly increasing.
    #[error("invalid levels: {0}")]
    InvalidLevels(String),

    /// An explicit level lies outside the field's value range.
    #[error("level {level} is outside the data range [{min}, {max}]")]
    LevelOutOfRange { level: f64, min: f64, max: f64 },

    /// Boundary stitching left a band polygon open. Always a defect.
    #[error("isoband polygon could not be closed: {0}")]
    UnclosedPolygon(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ContourError {
    /// Create an InvalidGridShape error.
    pub fn invalid_grid_shape(msg: impl Into<String>) -> Self {
        Self::InvalidGridShape(msg.into())
    }

    /// Create an InvalidField error.
    pub fn invalid_field(msg: impl Into<String>) -> Self {
        Self::InvalidField(msg.into())
    }

    /// Create an InvalidLevels error.
    pub fn invalid_levels(msg: impl Into<String>) -> Self {
        Self::InvalidLevels(msg.into())
    }

    /// Create an UnclosedPolygon error.
    pub fn unclosed_polygon(msg: impl Into<String>) -> Self {
        Self::UnclosedPolygon(msg.into())
    }
}

impl From<serde_json::Error> for ContourError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for contour operations.
pub type Result<T> = std::result::Result<T, ContourError>;
