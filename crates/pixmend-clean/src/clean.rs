//! Clean driver
//!
//! Entry point for the correction pass: validates the inputs, builds the
//! ineligible mask once, then patches every flagged pixel.

use crate::CleanResult;
use crate::combine::{check_shape, combine};
use crate::options::CleanOptions;
use crate::patch::patch_coords;
use crate::report::CleanReport;
use log::debug;
use pixmend_core::{Image, Mask};

/// Replace every pixel flagged in `defect` with the median of its eligible
/// neighbors.
///
/// # Arguments
///
/// * `image` - Input image, left untouched
/// * `defect` - Pixels to replace
/// * `exclusion` - Optional pixels that are never used as evidence
/// * `initial_window_size` - Starting window size, odd and at least 1
///   (see [`DEFAULT_WINDOW_SIZE`](crate::DEFAULT_WINDOW_SIZE))
///
/// # Errors
///
/// * `InvalidWindowSize` - zero or even `initial_window_size`
/// * `ShapeMismatch` - a mask does not match the image
/// * `AllMasked` - pixels are flagged but no pixel is eligible
///
/// Nothing is returned on error; there is no partial output.
///
/// # Examples
///
/// ```
/// use pixmend_clean::clean;
/// use pixmend_core::{Image, Mask};
///
/// let mut image = Image::new_with_value(16, 16, 100.0).unwrap();
/// image.set_pixel(8, 8, 65535.0).unwrap();
/// let defect = Mask::from_coords(16, 16, &[(8, 8)]).unwrap();
///
/// let (corrected, report) = clean(&image, &defect, None, 5).unwrap();
/// assert_eq!(corrected.get_pixel(8, 8).unwrap(), 100.0);
/// assert_eq!(report.count_corrected, 1);
/// ```
pub fn clean(
    image: &Image,
    defect: &Mask,
    exclusion: Option<&Mask>,
    initial_window_size: u32,
) -> CleanResult<(Image, CleanReport)> {
    clean_with_options(
        image,
        defect,
        exclusion,
        &CleanOptions::new(initial_window_size),
    )
}

/// [`clean`] with explicit options.
pub fn clean_with_options(
    image: &Image,
    defect: &Mask,
    exclusion: Option<&Mask>,
    options: &CleanOptions,
) -> CleanResult<(Image, CleanReport)> {
    options.validate()?;
    check_shape(image, defect, "defect")?;
    if let Some(exclusion) = exclusion {
        check_shape(image, exclusion, "exclusion")?;
    }

    let ineligible = combine(defect, exclusion)?;
    let coords: Vec<(u32, u32)> = defect.iter_set().collect();
    debug!(
        "cleaning {}x{} image: {} flagged, {} ineligible, initial window {}",
        image.width(),
        image.height(),
        coords.len(),
        ineligible.count(),
        options.initial_window_size
    );

    let (corrected, report) = patch_coords(image, &ineligible, &coords, options)?;
    debug!("{report}");

    Ok((corrected, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CleanError;

    #[test]
    fn test_clean_window_size_checked_first() {
        let image = Image::new(4, 4).unwrap();
        let defect = Mask::new(5, 5).unwrap();
        assert_eq!(
            clean(&image, &defect, None, 2).unwrap_err(),
            CleanError::InvalidWindowSize(2)
        );
    }

    #[test]
    fn test_clean_shape_mismatch() {
        let image = Image::new(4, 4).unwrap();
        let defect = Mask::new(4, 4).unwrap();
        let exclusion = Mask::new(4, 3).unwrap();
        assert_eq!(
            clean(&image, &defect, Some(&exclusion), 5).unwrap_err(),
            CleanError::ShapeMismatch {
                mask: "exclusion",
                expected: (4, 4),
                actual: (4, 3),
            }
        );
        assert!(matches!(
            clean(&image, &Mask::new(3, 4).unwrap(), None, 5),
            Err(CleanError::ShapeMismatch { mask: "defect", .. })
        ));
    }

    #[test]
    fn test_clean_excluded_pixels_not_evidence() {
        let image = Image::from_rows(&[
            vec![50.0, 50.0, 50.0],
            vec![50.0, 0.0, 1.0],
            vec![1.0, 1.0, 1.0],
        ])
        .unwrap();
        let defect = Mask::from_coords(3, 3, &[(1, 1)]).unwrap();

        let (corrected, _) = clean(&image, &defect, None, 3).unwrap();
        assert_eq!(corrected.get_pixel(1, 1).unwrap(), 25.5);

        let exclusion = Mask::from_coords(3, 3, &[(0, 0), (1, 0), (2, 0)]).unwrap();
        let (corrected, _) = clean(&image, &defect, Some(&exclusion), 3).unwrap();
        assert_eq!(corrected.get_pixel(1, 1).unwrap(), 1.0);
        // excluded pixels are never rewritten
        assert_eq!(corrected.get_pixel(0, 0).unwrap(), 50.0);
    }

    #[test]
    fn test_clean_all_masked_by_exclusion() {
        let image = Image::new(3, 3).unwrap();
        let defect = Mask::from_coords(3, 3, &[(2, 1)]).unwrap();
        let exclusion = Mask::new_with_value(3, 3, true).unwrap();
        assert_eq!(
            clean(&image, &defect, Some(&exclusion), 3).unwrap_err(),
            CleanError::AllMasked { x: 2, y: 1 }
        );
    }

    #[test]
    fn test_clean_nothing_flagged() {
        let image = Image::new_with_value(4, 4, 3.0).unwrap();
        let defect = Mask::new(4, 4).unwrap();
        let exclusion = Mask::new_with_value(4, 4, true).unwrap();
        let (corrected, report) = clean(&image, &defect, Some(&exclusion), 5).unwrap();
        assert_eq!(corrected, image);
        assert_eq!(report.count_corrected, 0);
    }
}
