//! pixmend-test - Regression test framework for pixmend
//!
//! This crate provides a small regression harness: each check bumps an
//! index, failures are recorded with that index, and `cleanup` reports
//! the run.
//!
//! # Usage
//!
//! ```ignore
//! use pixmend_test::RegParams;
//!
//! let mut rp = RegParams::new("clean_basic");
//! rp.compare_values(1.0, report.count_corrected as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! Fixtures are synthesized in code with [`random_image`], so no data
//! files are needed.

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::RegParams;

use pixmend_core::{Image, Mask};

/// Build a reproducible image with samples uniformly spread over
/// `[low, high)`.
///
/// The same `seed` always yields the same image.
pub fn random_image(
    width: u32,
    height: u32,
    low: f64,
    high: f64,
    seed: u64,
) -> TestResult<Image> {
    let mut rng = SimpleRng::new(seed);
    let size = (width as usize) * (height as usize);
    let data = (0..size)
        .map(|_| low + (high - low) * rng.next_f64())
        .collect();
    Image::from_data(width, height, data).map_err(|source| TestError::Fixture {
        name: "random_image",
        source,
    })
}

/// Build a reproducible mask with roughly `fraction` of its pixels set.
pub fn random_mask(width: u32, height: u32, fraction: f64, seed: u64) -> TestResult<Mask> {
    let mut rng = SimpleRng::new(seed);
    let size = (width as usize) * (height as usize);
    let data = (0..size).map(|_| rng.next_f64() < fraction).collect();
    Mask::from_data(width, height, data).map_err(|source| TestError::Fixture {
        name: "random_mask",
        source,
    })
}

/// Simple linear congruential generator for reproducible fixtures
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }

    /// Uniform value in `[0, 1)`
    pub fn next_f64(&mut self) -> f64 {
        // top 53 bits keep the result strictly below 1.0
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = (self.next_u64() % (i as u64 + 1)) as usize;
            items.swap(i, j);
        }
    }
}
