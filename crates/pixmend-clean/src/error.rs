//! Error types for pixmend-clean
//!
//! Every failure is detected before the corrected image is handed back, so
//! an error never comes with a partially patched frame.

use thiserror::Error;

/// Errors that can occur during a cleaning run
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CleanError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixmend_core::Error),

    /// A mask does not have the image's shape
    #[error("{} mask is {}x{}, image is {}x{}", .mask, .actual.0, .actual.1, .expected.0, .expected.1)]
    ShapeMismatch {
        /// Which mask disagreed ("defect", "exclusion", "ineligible")
        mask: &'static str,
        /// Image dimensions
        expected: (u32, u32),
        /// Mask dimensions
        actual: (u32, u32),
    },

    /// Window size is zero or even
    #[error("invalid window size {0}: must be odd and at least 1")]
    InvalidWindowSize(u32),

    /// No eligible sample exists anywhere for a flagged pixel
    #[error("no eligible sample for flagged pixel ({x}, {y}): every pixel is masked")]
    AllMasked { x: u32, y: u32 },

    /// The run was cancelled before every flagged pixel was scheduled
    #[error("cleaning cancelled")]
    Cancelled,
}

/// Result type for cleaning operations
pub type CleanResult<T> = Result<T, CleanError>;
