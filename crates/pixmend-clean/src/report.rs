//! Cleaning statistics
//!
//! A [`CleanReport`] summarizes one run: how many pixels were replaced,
//! how many needed a window larger than the initial one, and how large the
//! windows got. Reports from independent workers merge into the same
//! result whatever the order.

use crate::estimate::Estimate;
use std::collections::BTreeMap;
use std::fmt;

/// Summary of a cleaning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanReport {
    /// Number of pixels replaced
    pub count_corrected: usize,
    /// Number of replacements that needed window growth
    pub count_grown: usize,
    /// Largest window size used; the initial size if nothing grew or nothing
    /// was flagged
    pub max_window_seen: u32,
    /// Initial window size of the run
    pub initial_window_size: u32,
    /// Window size -> number of replacements resolved at that size
    pub window_histogram: BTreeMap<u32, usize>,
}

impl CleanReport {
    /// Empty report for a run starting at `initial_window_size`
    pub fn new(initial_window_size: u32) -> Self {
        Self {
            count_corrected: 0,
            count_grown: 0,
            max_window_seen: initial_window_size,
            initial_window_size,
            window_histogram: BTreeMap::new(),
        }
    }

    /// Account for one replaced pixel.
    pub fn record(&mut self, estimate: &Estimate) {
        self.count_corrected += 1;
        if estimate.grew {
            self.count_grown += 1;
        }
        self.max_window_seen = self.max_window_seen.max(estimate.window_size);
        *self
            .window_histogram
            .entry(estimate.window_size)
            .or_insert(0) += 1;
    }

    /// Fold another partial report into this one.
    pub fn merge(&mut self, other: &CleanReport) {
        self.count_corrected += other.count_corrected;
        self.count_grown += other.count_grown;
        self.max_window_seen = self.max_window_seen.max(other.max_window_seen);
        for (&size, &count) in &other.window_histogram {
            *self.window_histogram.entry(size).or_insert(0) += count;
        }
    }
}

impl fmt::Display for CleanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "corrected {} pixels, {} needed window growth beyond {}x{}, largest window {}x{}",
            self.count_corrected,
            self.count_grown,
            self.initial_window_size,
            self.initial_window_size,
            self.max_window_seen,
            self.max_window_seen
        )
    }
}
