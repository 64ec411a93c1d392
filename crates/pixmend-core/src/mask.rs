//! Mask - Boolean pixel grid
//!
//! A `Mask` flags pixels of an [`Image`](crate::Image) with the same shape.
//! Defect maps, exclusion regions and their union are all masks.
//!
//! # Examples
//!
//! ```
//! use pixmend_core::Mask;
//!
//! let defects = Mask::from_coords(64, 64, &[(10, 20), (11, 20)]).unwrap();
//! assert_eq!(defects.count(), 2);
//! assert!(defects.get(11, 20).unwrap());
//! ```

use crate::error::{Error, Result};

/// Boolean grid, row-major, `true` meaning "flagged"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl Mask {
    /// Create a mask with every pixel clear
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, false)
    }

    /// Create a mask with every pixel set to `value`
    pub fn new_with_value(width: u32, height: u32, value: bool) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let size = (width as usize) * (height as usize);
        Ok(Mask {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a mask from raw row-major data
    pub fn from_data(width: u32, height: u32, data: Vec<bool>) -> Result<Self> {
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
        Ok(Mask {
            width,
            height,
            data,
        })
    }

    /// Create a mask with the listed `(x, y)` coordinates set.
    ///
    /// This is the usual import path for bad-pixel lists. Duplicate
    /// coordinates are harmless.
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` for a coordinate outside the grid.
    pub fn from_coords(width: u32, height: u32, coords: &[(u32, u32)]) -> Result<Self> {
        let mut mask = Self::new(width, height)?;
        for &(x, y) in coords {
            mask.set(x, y, true)?;
        }
        Ok(mask)
    }

    /// Get the mask width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the mask height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the mask dimensions as (width, height)
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

    /// Get the flag at (x, y)
    pub fn get(&self, x: u32, y: u32) -> Result<bool> {
        self.check_bounds(x, y)?;
        Ok(self.data[self.index(x, y)])
    }

    /// Set the flag at (x, y)
    pub fn set(&mut self, x: u32, y: u32, value: bool) -> Result<()> {
        self.check_bounds(x, y)?;
        let idx = self.index(x, y);
        self.data[idx] = value;
        Ok(())
    }

    /// Get the flag at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the data.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> bool {
        self.data[self.index(x, y)]
    }

    /// Get raw access to the flags
    #[inline]
    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// Set every pixel of a rectangle, clipped to the mask.
    ///
    /// The rectangle starts at `(x, y)` and spans `w` x `h` pixels; parts
    /// falling outside the grid are ignored.
    pub fn set_rect(&mut self, x: u32, y: u32, w: u32, h: u32) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for yy in y..y_end {
            for xx in x..x_end {
                let idx = self.index(xx, yy);
                self.data[idx] = true;
            }
        }
    }

    /// Number of set pixels
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }

    /// True if no pixel is set
    pub fn is_empty(&self) -> bool {
        !self.data.iter().any(|&b| b)
    }

    /// True if every pixel is set
    pub fn is_full(&self) -> bool {
        self.data.iter().all(|&b| b)
    }

    /// Iterate the set coordinates as `(x, y)` in row-major order.
    pub fn iter_set(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width as usize;
        self.data
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(move |(i, _)| ((i % width) as u32, (i / width) as u32))
    }

    /// Pixelwise OR of two masks.
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if the shapes differ.
    pub fn or(&self, other: &Mask) -> Result<Mask> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| a || b)
            .collect();
        Ok(Mask {
            width: self.width,
            height: self.height,
            data,
        })
    }
}
