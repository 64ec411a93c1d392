//! pixmend-clean - Bad-pixel correction
//!
//! This crate replaces flagged detector pixels with a robust local
//! estimate so later astrometric and photometric steps do not see them:
//!
//! - [`combine`] - Union of defect and exclusion masks
//! - [`estimate`] - Median of eligible neighbors in a growing window
//! - [`patch`] - Apply estimates to a copy of the image
//! - [`clean`] - Full pass with validation and a [`CleanReport`]
//!
//! Estimates always read the original samples, so the result does not
//! depend on the order in which pixels are processed, and large runs are
//! spread over rayon's thread pool.

pub mod clean;
pub mod combine;
mod error;
pub mod estimate;
pub mod options;
pub mod patch;
pub mod report;

pub use error::{CleanError, CleanResult};

// Re-export commonly used functions
pub use clean::{clean, clean_with_options};
pub use combine::{check_shape, combine};
pub use estimate::{Estimate, WindowBounds, estimate, median, window_bounds};
pub use options::{CancelToken, CleanOptions, DEFAULT_WINDOW_SIZE, Execution, PARALLEL_THRESHOLD};
pub use patch::{patch, patch_coords, patch_with_options};
pub use report::CleanReport;
