//! Error types for Mandala operations.

use thiserror::Error;

use mandala_core::quadrant::QuadrantError;

/// The main error type for Mandala operations.
#[derive(Debug, Error)]
pub enum MandalaError {
    #[error("Quadrant table error: {0}")]
    Quadrant(#[from] QuadrantError),

    #[error("Canvas {width}x{height} is not drawable")]
    InvalidCanvas { width: f32, height: f32 },

    #[error("Configuration error: {0}")]
    Config(String),
}
