//! Image - Floating-point sample grid
//!
//! `Image` is a 2D array of `f64` samples, the form in which detector
//! frames reach the correction pass. The external reader converts whatever
//! container it decodes into this grid; the writer takes it back out.
//!
//! # Examples
//!
//! ```
//! use pixmend_core::Image;
//!
//! let mut image = Image::new(100, 100).unwrap();
//!
//! image.set_pixel(10, 20, 0.5).unwrap();
//! assert_eq!(image.get_pixel(10, 20).unwrap(), 0.5);
//! ```

use crate::error::{Error, Result};

/// Floating-point image
///
/// A 2D array of `f64` values, `height` rows of `width` samples.
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The sample at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Sample data (row-major, no padding)
    data: Vec<f64>,
}

impl Image {
    /// Create a new image with all samples set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use pixmend_core::Image;
    ///
    /// let image = Image::new(640, 480).unwrap();
    /// assert_eq!(image.dimensions(), (640, 480));
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new image with all samples set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: f64) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(Image {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create an image from raw row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }

        Ok(Image {
            width,
            height,
            data,
        })
    }

    /// Create an image from a slice of rows.
    ///
    /// All rows must have the same, non-zero length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.len()) as u32;
        if rows.iter().any(|r| r.len() as u32 != width) {
            return Err(Error::InvalidParameter(
                "rows must all have the same length".to_string(),
            ));
        }
        Self::from_data(width, height, rows.concat())
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Get the sample at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f64> {
        self.check_bounds(x, y)?;
        Ok(self.data[self.index(x, y)])
    }

    /// Set the sample at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f64) -> Result<()> {
        self.check_bounds(x, y)?;
        let idx = self.index(x, y);
        self.data[idx] = value;
        Ok(())
    }

    /// Get the sample at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the data.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f64 {
        self.data[self.index(x, y)]
    }

    /// Set the sample at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the data.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f64) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Get raw access to the sample data
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Get a row of samples
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f64] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + self.width as usize]
    }

    /// Check that `other` has the same dimensions as `self`.
    pub fn check_same_size(&self, other: &Image) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(())
    }

    /// Count samples whose bit patterns differ between two images.
    ///
    /// Bitwise rather than numeric comparison: `NaN` equals an identical
    /// `NaN`, and `0.0` differs from `-0.0`.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if the shapes differ.
    pub fn count_different(&self, other: &Image) -> Result<usize> {
        self.check_same_size(other)?;
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .filter(|(a, b)| a.to_bits() != b.to_bits())
            .count())
    }
}

// ============================================================================
// Tests
// ============================================================================
