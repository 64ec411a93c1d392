//! Image and mask grid regression test
//!
//! Tests construction, pixel access, and mask algebra on the grids the
//! correction pass consumes.

use pixmend_core::{Error, Image, Mask};
use pixmend_test::{RegParams, random_image, random_mask};

// ==========================================================================
// Test 1: Image creation and access
// ==========================================================================

#[test]
fn grid_reg_image() {
    let mut rp = RegParams::new("grid_image");

    let image = Image::new_with_value(640, 480, 42.5).expect("Image::new_with_value failed");
    rp.compare_values(640.0, image.width() as f64, 0.0);
    rp.compare_values(480.0, image.height() as f64, 0.0);
    let all_match = image.data().iter().all(|&v| v == 42.5);
    rp.compare_values(1.0, if all_match { 1.0 } else { 0.0 }, 0.0);

    let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let image = Image::from_data(3, 2, data).expect("Image::from_data failed");
    rp.compare_values(1.0, image.get_pixel(0, 0).unwrap(), 0.0);
    rp.compare_values(6.0, image.get_pixel(2, 1).unwrap(), 0.0);

    let out_of_range = image.get_pixel(3, 0);
    rp.compare_values(
        1.0,
        if matches!(out_of_range, Err(Error::IndexOutOfBounds { .. })) {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    let a = random_image(50, 40, -100.0, 100.0, 11).expect("random_image");
    let mut b = a.clone();
    b.set_pixel(10, 10, 1.0e6).unwrap();
    b.set_pixel(49, 39, 1.0e6).unwrap();
    rp.compare_values(2.0, a.count_different(&b).unwrap() as f64, 0.0);
    rp.compare_images(&a, &a.clone());

    assert!(rp.cleanup(), "grid_reg image tests failed");
}

// ==========================================================================
// Test 2: Mask algebra
// ==========================================================================

#[test]
fn grid_reg_mask() {
    let mut rp = RegParams::new("grid_mask");

    let a = random_mask(64, 48, 0.05, 1).expect("random_mask");
    let b = random_mask(64, 48, 0.05, 2).expect("random_mask");
    let union = a.or(&b).expect("or");

    let expected = a
        .data()
        .iter()
        .zip(b.data())
        .filter(|&(&p, &q)| p || q)
        .count();
    rp.compare_values(expected as f64, union.count() as f64, 0.0);

    // OR with itself and with an empty mask is the identity
    rp.compare_masks(&a, &a.or(&a).unwrap());
    rp.compare_masks(&a, &a.or(&Mask::new(64, 48).unwrap()).unwrap());

    // iter_set round-trips through from_coords
    let coords: Vec<_> = union.iter_set().collect();
    let rebuilt = Mask::from_coords(64, 48, &coords).expect("from_coords");
    rp.compare_masks(&union, &rebuilt);

    let mut full = Mask::new(5, 4).unwrap();
    full.set_rect(0, 0, 5, 4);
    rp.compare_values(1.0, if full.is_full() { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "grid_reg mask tests failed");
}
