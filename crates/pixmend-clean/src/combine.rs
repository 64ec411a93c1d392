//! Ineligible-mask construction
//!
//! Pixels in the defect mask are targets and pixels in the exclusion mask
//! are off limits; neither may serve as evidence for a neighbor's value.
//! Their union is computed once per run, before any pixel is patched, and
//! stays read-only afterwards.

use crate::{CleanError, CleanResult};
use pixmend_core::{Image, Mask};

/// Merge the defect mask with an optional exclusion mask.
///
/// Without an exclusion mask the result is a copy of `defect`.
///
/// # Errors
///
/// Returns `CleanError::ShapeMismatch` if the exclusion mask differs in
/// shape from the defect mask.
pub fn combine(defect: &Mask, exclusion: Option<&Mask>) -> CleanResult<Mask> {
    match exclusion {
        None => Ok(defect.clone()),
        Some(exclusion) => {
            check_mask_shape(defect.dimensions(), exclusion, "exclusion")?;
            Ok(defect.or(exclusion)?)
        }
    }
}

/// Check that `mask` has the shape of `image`.
pub fn check_shape(image: &Image, mask: &Mask, name: &'static str) -> CleanResult<()> {
    check_mask_shape(image.dimensions(), mask, name)
}

fn check_mask_shape(expected: (u32, u32), mask: &Mask, name: &'static str) -> CleanResult<()> {
    if mask.dimensions() != expected {
        return Err(CleanError::ShapeMismatch {
            mask: name,
            expected,
            actual: mask.dimensions(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_without_exclusion() {
        let defect = Mask::from_coords(4, 4, &[(1, 1), (2, 3)]).unwrap();
        let ineligible = combine(&defect, None).unwrap();
        assert_eq!(ineligible, defect);
    }

    #[test]
    fn test_combine_is_union() {
        let defect = Mask::from_coords(4, 4, &[(1, 1), (2, 3)]).unwrap();
        let exclusion = Mask::from_coords(4, 4, &[(2, 3), (0, 0)]).unwrap();
        let ineligible = combine(&defect, Some(&exclusion)).unwrap();
        assert_eq!(ineligible.count(), 3);
        assert!(ineligible.get(0, 0).unwrap());
        assert!(ineligible.get(1, 1).unwrap());
        assert!(!ineligible.get(3, 3).unwrap());
    }

    #[test]
    fn test_combine_shape_mismatch() {
        let defect = Mask::new(4, 4).unwrap();
        let exclusion = Mask::new(4, 5).unwrap();
        assert_eq!(
            combine(&defect, Some(&exclusion)),
            Err(CleanError::ShapeMismatch {
                mask: "exclusion",
                expected: (4, 4),
                actual: (4, 5),
            })
        );
    }

    #[test]
    fn test_check_shape() {
        let image = Image::new(6, 3).unwrap();
        assert!(check_shape(&image, &Mask::new(6, 3).unwrap(), "defect").is_ok());
        assert!(matches!(
            check_shape(&image, &Mask::new(3, 6).unwrap(), "defect"),
            Err(CleanError::ShapeMismatch { mask: "defect", .. })
        ));
    }
}
