//! pixmend-core - Basic data structures for bad-pixel correction
//!
//! This crate provides the grids the correction pass works on:
//!
//! - [`Image`] - Floating-point sample grid
//! - [`Mask`] - Boolean grid of flagged pixels, same shape as an image
//!
//! Reading and writing the container format (FITS or otherwise) is left to
//! the caller; it hands these grids in and takes the corrected image back.

pub mod error;
pub mod image;
pub mod mask;

pub use error::{Error, Result};
pub use image::Image;
pub use mask::Mask;
