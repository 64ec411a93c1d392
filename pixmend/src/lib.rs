//! pixmend - Bad-pixel correction for scientific image arrays
//!
//! Replaces known-defective detector pixels with a local median estimate
//! so downstream astrometry and photometry are not corrupted by them.
//!
//! The caller reads the frame and its masks from whatever container it
//! uses, hands them over as an [`Image`] and [`Mask`]s, and persists the
//! corrected image and [`CleanReport`](clean::CleanReport) afterwards.
//!
//! # Example
//!
//! ```
//! use pixmend::{Image, Mask, clean};
//!
//! let mut image = Image::new_with_value(32, 32, 1200.0).unwrap();
//! image.set_pixel(4, 4, 0.0).unwrap();
//! let defect = Mask::from_coords(32, 32, &[(4, 4)]).unwrap();
//!
//! let (corrected, report) = clean::clean(&image, &defect, None, clean::DEFAULT_WINDOW_SIZE).unwrap();
//! assert_eq!(corrected.get_pixel(4, 4).unwrap(), 1200.0);
//! assert_eq!(report.count_grown, 0);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pixmend_core::*;

// Re-export the correction crate as a module
pub use pixmend_clean as clean;
