//! Adaptive local-median estimator
//!
//! The replacement value for a flagged pixel is the median of the eligible
//! samples in a square window centered on it. The window starts at the
//! configured size and grows by 2 (one pixel on every side) until it holds
//! at least one eligible sample.
//!
//! Windows are clipped to the image, so near a border they are asymmetric
//! and smaller than `size x size`. Growth stops once the clipped window
//! covers the whole image; if it is still empty then, every pixel is
//! ineligible and the run fails with [`CleanError::AllMasked`].
//!
//! Only samples from the original image are read, never patched values,
//! so each estimate is independent of every other one.

use crate::options::check_window_size;
use crate::{CleanError, CleanResult};
use log::trace;
use pixmend_core::{Image, Mask};
use std::ops::RangeInclusive;

/// Inclusive pixel bounds of a clipped window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBounds {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl WindowBounds {
    /// Number of columns in the window
    pub fn width(&self) -> u32 {
        self.x1 - self.x0 + 1
    }

    /// Number of rows in the window
    pub fn height(&self) -> u32 {
        self.y1 - self.y0 + 1
    }

    /// Number of pixels in the window
    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// True if the window spans a whole `width` x `height` image
    pub fn covers(&self, width: u32, height: u32) -> bool {
        self.x0 == 0 && self.y0 == 0 && self.x1 + 1 >= width && self.y1 + 1 >= height
    }
}

/// Square window of side `size` centered on (x, y), clipped to the image.
///
/// The half-extent is `size / 2`.
///
/// # Panics
///
/// Panics in debug builds if `(x, y)` lies outside a `width` x `height`
/// image, which also rules out an empty image.
pub fn window_bounds(x: u32, y: u32, size: u32, width: u32, height: u32) -> WindowBounds {
    debug_assert!(
        x < width && y < height,
        "window center ({x}, {y}) outside {width}x{height} image"
    );
    let half = size / 2;
    WindowBounds {
        x0: x.saturating_sub(half),
        y0: y.saturating_sub(half),
        x1: x.saturating_add(half).min(width - 1),
        y1: y.saturating_add(half).min(height - 1),
    }
}

/// Median of `values`, reordering the slice in place.
///
/// For an even count the result is the mean of the two middle values.
/// Samples are ordered with [`f64::total_cmp`], so `NaN` and infinities
/// take a fixed place in the ordering and the result is reproducible.
/// Returns `None` for an empty slice.
pub fn median(values: &mut [f64]) -> Option<f64> {
    let n = values.len();
    if n == 0 {
        return None;
    }

    let mid = n / 2;
    let (lower, upper, _) = values.select_nth_unstable_by(mid, f64::total_cmp);
    let upper = *upper;
    if n % 2 == 1 {
        return Some(upper);
    }

    let lower = lower.iter().copied().max_by(f64::total_cmp)?;
    Some((lower + upper) / 2.0)
}

/// Result of estimating one flagged pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    /// Replacement value
    pub value: f64,
    /// Window size the value was taken from
    pub window_size: u32,
    /// True if the window had to grow past the initial size
    pub grew: bool,
}

/// Estimate the value at (x, y) from its eligible neighbors.
///
/// # Arguments
///
/// * `image` - Original samples
/// * `ineligible` - Pixels that may not contribute evidence
/// * `x`, `y` - Pixel to estimate
/// * `size` - Window size to start from (odd)
/// * `initial_size` - Configured initial size; `grew` is `window_size > initial_size`
///
/// # Errors
///
/// Returns `CleanError::InvalidWindowSize` for an even or zero `size`,
/// `CleanError::ShapeMismatch` if `ineligible` differs in shape from
/// `image`, a core bounds error if (x, y) lies outside the image, and
/// `CleanError::AllMasked` if no pixel of the image is eligible.
pub fn estimate(
    image: &Image,
    ineligible: &Mask,
    x: u32,
    y: u32,
    size: u32,
    initial_size: u32,
) -> CleanResult<Estimate> {
    check_window_size(size)?;
    crate::combine::check_shape(image, ineligible, "ineligible")?;
    // bounds check with the core error type
    ineligible.get(x, y)?;

    estimate_unchecked(image, ineligible, x, y, size, initial_size)
}

/// [`estimate`] without argument validation; the patcher checks once per run.
pub(crate) fn estimate_unchecked(
    image: &Image,
    ineligible: &Mask,
    x: u32,
    y: u32,
    size: u32,
    initial_size: u32,
) -> CleanResult<Estimate> {
    let (width, height) = image.dimensions();
    let mut size = size;
    let mut bounds = window_bounds(x, y, size, width, height);
    let mut previous: Option<WindowBounds> = None;

    while !has_eligible(ineligible, &bounds, previous.as_ref()) {
        if bounds.covers(width, height) {
            return Err(CleanError::AllMasked { x, y });
        }
        trace!("no eligible sample around ({x}, {y}) at size {size}, growing");
        previous = Some(bounds);
        size += 2;
        bounds = window_bounds(x, y, size, width, height);
    }

    let mut samples = gather(image, ineligible, &bounds);
    let value = median(&mut samples).ok_or(CleanError::AllMasked { x, y })?;

    Ok(Estimate {
        value,
        window_size: size,
        grew: size > initial_size,
    })
}

/// Look for an eligible pixel in `bounds`, skipping the part already
/// searched in `previous` (which lies inside `bounds`).
fn has_eligible(ineligible: &Mask, bounds: &WindowBounds, previous: Option<&WindowBounds>) -> bool {
    for y in bounds.y0..=bounds.y1 {
        let eligible_in = |mut xs: RangeInclusive<u32>| xs.any(|x| !ineligible.get_unchecked(x, y));
        let found = match previous {
            Some(p) if (p.y0..=p.y1).contains(&y) => {
                // left and right strips of the new ring
                (p.x0 > bounds.x0 && eligible_in(bounds.x0..=p.x0 - 1))
                    || (p.x1 < bounds.x1 && eligible_in(p.x1 + 1..=bounds.x1))
            }
            _ => eligible_in(bounds.x0..=bounds.x1),
        };
        if found {
            return true;
        }
    }
    false
}

fn gather(image: &Image, ineligible: &Mask, bounds: &WindowBounds) -> Vec<f64> {
    let mut samples = Vec::with_capacity(bounds.area());
    for y in bounds.y0..=bounds.y1 {
        for x in bounds.x0..=bounds.x1 {
            if !ineligible.get_unchecked(x, y) {
                samples.push(image.get_pixel_unchecked(x, y));
            }
        }
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(width: u32, height: u32) -> Image {
        let data = (0..width * height).map(|v| v as f64).collect();
        Image::from_data(width, height, data).unwrap()
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&mut []), None);
        assert_eq!(median(&mut [3.0]), Some(3.0));
        assert_eq!(median(&mut [5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&mut [4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&mut [7.0, 7.0, 1.0, 9.0]), Some(7.0));
    }

    #[test]
    fn test_median_with_non_finite_values() {
        // total ordering puts positive NaN above +inf
        assert_eq!(median(&mut [f64::NAN, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&mut [f64::NEG_INFINITY, 1.0, 2.0]), Some(1.0));
    }

    #[test]
    fn test_window_bounds_clipping() {
        let b = window_bounds(5, 5, 3, 10, 10);
        assert_eq!(
            b,
            WindowBounds {
                x0: 4,
                y0: 4,
                x1: 6,
                y1: 6
            }
        );
        assert_eq!(b.area(), 9);

        let corner = window_bounds(0, 9, 5, 10, 10);
        assert_eq!(
            corner,
            WindowBounds {
                x0: 0,
                y0: 7,
                x1: 2,
                y1: 9
            }
        );
        assert_eq!((corner.width(), corner.height()), (3, 3));

        assert!(window_bounds(1, 1, 5, 3, 3).covers(3, 3));
        assert!(!window_bounds(1, 1, 1, 3, 3).covers(3, 3));
    }

    #[test]
    #[should_panic(expected = "outside 5x5 image")]
    fn test_window_bounds_center_outside_image() {
        window_bounds(10, 0, 3, 5, 5);
    }

    #[test]
    #[should_panic(expected = "outside 0x4 image")]
    fn test_window_bounds_empty_image() {
        window_bounds(0, 0, 3, 0, 4);
    }

    #[test]
    fn test_estimate_median_of_initial_window() {
        let image = ramp(7, 7);
        let ineligible = Mask::from_coords(7, 7, &[(3, 3)]).unwrap();
        let est = estimate(&image, &ineligible, 3, 3, 3, 3).unwrap();
        // neighbours 16,17,18,23,25,30,31,32 -> (23 + 25) / 2
        assert_eq!(est.value, 24.0);
        assert_eq!(est.window_size, 3);
        assert!(!est.grew);
    }

    #[test]
    fn test_estimate_grows_past_masked_block() {
        let image = Image::new_with_value(9, 9, 100.0).unwrap();
        let mut ineligible = Mask::new(9, 9).unwrap();
        ineligible.set_rect(2, 2, 5, 5);
        let est = estimate(&image, &ineligible, 4, 4, 3, 3).unwrap();
        assert_eq!(est.value, 100.0);
        assert_eq!(est.window_size, 7);
        assert!(est.grew);
    }

    #[test]
    fn test_estimate_reaches_far_corner() {
        let mut image = Image::new_with_value(6, 4, 1.0).unwrap();
        image.set_pixel(5, 3, 42.0).unwrap();
        let mut ineligible = Mask::new_with_value(6, 4, true).unwrap();
        ineligible.set(5, 3, false).unwrap();

        let est = estimate(&image, &ineligible, 0, 0, 1, 1).unwrap();
        assert_eq!(est.value, 42.0);
        assert!(est.grew);
        assert_eq!(est.window_size % 2, 1);
        // half-extent 5 is the first to reach column 5
        assert_eq!(est.window_size, 11);
    }

    #[test]
    fn test_estimate_all_masked() {
        let image = Image::new(4, 4).unwrap();
        let ineligible = Mask::new_with_value(4, 4, true).unwrap();
        assert_eq!(
            estimate(&image, &ineligible, 1, 2, 5, 5),
            Err(CleanError::AllMasked { x: 1, y: 2 })
        );
    }

    #[test]
    fn test_estimate_rejects_bad_arguments() {
        let image = Image::new(4, 4).unwrap();
        let ineligible = Mask::new(4, 4).unwrap();
        assert_eq!(
            estimate(&image, &ineligible, 1, 1, 4, 5),
            Err(CleanError::InvalidWindowSize(4))
        );
        assert!(matches!(
            estimate(&image, &ineligible, 4, 0, 5, 5),
            Err(CleanError::Core(_))
        ));
        let other = Mask::new(5, 4).unwrap();
        assert!(matches!(
            estimate(&image, &other, 1, 1, 5, 5),
            Err(CleanError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_has_eligible_scans_only_new_ring() {
        // eligible pixel at the center must not count once the center
        // region has been searched
        let ineligible = Mask::from_data(5, 5, (0..25).map(|i| i != 12).collect()).unwrap();
        let inner = window_bounds(2, 2, 3, 5, 5);
        let outer = window_bounds(2, 2, 5, 5, 5);
        assert!(has_eligible(&ineligible, &inner, None));
        assert!(!has_eligible(&ineligible, &outer, Some(&inner)));
    }
}
