//! Image patching
//!
//! Runs the estimator for every flagged pixel and writes the results into
//! a copy of the input. Estimates read the original image and a fixed
//! ineligible mask only, so they can be computed in any order or in
//! parallel; writes go to distinct pixels after all estimates are in.

use crate::combine::check_shape;
use crate::estimate::{Estimate, estimate_unchecked};
use crate::options::CleanOptions;
use crate::report::CleanReport;
use crate::{CleanError, CleanResult};
use log::warn;
use pixmend_core::{Error, Image, Mask};
use rayon::prelude::*;

/// Replace every pixel flagged in `defect`.
///
/// # Arguments
///
/// * `image` - Input image, left untouched
/// * `defect` - Pixels to replace
/// * `ineligible` - Pixels that may not serve as evidence
/// * `initial_size` - Starting window size (odd)
///
/// # Returns
///
/// The corrected copy and the run's report.
pub fn patch(
    image: &Image,
    defect: &Mask,
    ineligible: &Mask,
    initial_size: u32,
) -> CleanResult<(Image, CleanReport)> {
    patch_with_options(image, defect, ineligible, &CleanOptions::new(initial_size))
}

/// [`patch`] with explicit options.
pub fn patch_with_options(
    image: &Image,
    defect: &Mask,
    ineligible: &Mask,
    options: &CleanOptions,
) -> CleanResult<(Image, CleanReport)> {
    check_shape(image, defect, "defect")?;
    let coords: Vec<(u32, u32)> = defect.iter_set().collect();
    patch_coords(image, ineligible, &coords, options)
}

/// Replace the pixels at `coords`, estimated in the given order.
///
/// The output does not depend on the order of `coords` or on the
/// execution mode. A coordinate listed twice is estimated and counted
/// twice.
///
/// # Errors
///
/// Fails before estimating anything on an invalid window size, a
/// mismatched `ineligible` shape, a coordinate outside the image, or a
/// fully ineligible image (`AllMasked` at the first coordinate). Returns
/// `CleanError::Cancelled` if the options' cancel token fires.
pub fn patch_coords(
    image: &Image,
    ineligible: &Mask,
    coords: &[(u32, u32)],
    options: &CleanOptions,
) -> CleanResult<(Image, CleanReport)> {
    options.validate()?;
    check_shape(image, ineligible, "ineligible")?;

    let (width, height) = image.dimensions();
    if let Some(&(x, y)) = coords.iter().find(|&&(x, y)| x >= width || y >= height) {
        return Err(Error::IndexOutOfBounds {
            x,
            y,
            width,
            height,
        }
        .into());
    }
    if let Some(&(x, y)) = coords.first().filter(|_| ineligible.is_full()) {
        return Err(CleanError::AllMasked { x, y });
    }

    let initial_size = options.initial_window_size;
    let estimate_at = |&(x, y): &(u32, u32)| -> CleanResult<((u32, u32), Estimate)> {
        if options.is_cancelled() {
            return Err(CleanError::Cancelled);
        }
        let est = estimate_unchecked(image, ineligible, x, y, initial_size, initial_size)?;
        Ok(((x, y), est))
    };

    let parallel = options.execution.is_parallel(coords.len());
    let estimates: CleanResult<Vec<_>> = if parallel {
        coords.par_iter().map(estimate_at).collect()
    } else {
        coords.iter().map(estimate_at).collect()
    };
    let estimates = estimates.inspect_err(|e| {
        if *e == CleanError::Cancelled {
            warn!("cleaning cancelled with {} pixels flagged", coords.len());
        }
    })?;

    let mut corrected = image.clone();
    for ((x, y), est) in &estimates {
        corrected.set_pixel_unchecked(*x, *y, est.value);
    }
    let report = if parallel {
        // per-worker partial reports, merged in any order
        estimates
            .par_iter()
            .fold(
                || CleanReport::new(initial_size),
                |mut report, (_, est)| {
                    report.record(est);
                    report
                },
            )
            .reduce(
                || CleanReport::new(initial_size),
                |mut a, b| {
                    a.merge(&b);
                    a
                },
            )
    } else {
        let mut report = CleanReport::new(initial_size);
        for (_, est) in &estimates {
            report.record(est);
        }
        report
    };

    Ok((corrected, report))
}
