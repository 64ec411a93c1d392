//! Error types for pixmend-core
//!
//! Provides a unified error type for grid construction and access.
//! Each variant captures enough context for diagnostics without exposing
//! the internal row-major layout.

use thiserror::Error;

/// pixmend-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid grid dimensions
    #[error("invalid grid dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Coordinate outside the grid
    #[error("coordinate ({x}, {y}) out of bounds for {width}x{height} grid")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Grid dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for pixmend-core operations
pub type Result<T> = std::result::Result<T, Error>;
