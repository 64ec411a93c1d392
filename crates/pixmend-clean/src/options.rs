//! Cleaning options
//!
//! The only tunable of the estimator is the starting window size; the rest
//! controls how the flagged pixels are scheduled.

use crate::{CleanError, CleanResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Default starting window size (5x5)
pub const DEFAULT_WINDOW_SIZE: u32 = 5;

/// Flagged-pixel count at which [`Execution::Auto`] switches to rayon
pub const PARALLEL_THRESHOLD: usize = 4_096;

/// How flagged pixels are scheduled
///
/// The corrected image and report do not depend on this choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// Parallel once the flagged count reaches [`PARALLEL_THRESHOLD`]
    #[default]
    Auto,
    /// One pixel after another on the calling thread
    Sequential,
    /// Spread over the rayon thread pool
    Parallel,
}

impl Execution {
    /// Resolve `Auto` for a run with `count` flagged pixels.
    pub fn is_parallel(self, count: usize) -> bool {
        match self {
            Execution::Auto => count >= PARALLEL_THRESHOLD,
            Execution::Sequential => false,
            Execution::Parallel => true,
        }
    }
}

/// Cooperative cancellation flag shared between a caller and a run
///
/// Cloning shares the flag. Once cancelled, no further pixel is scheduled
/// and the run returns [`CleanError::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Options for a cleaning run
#[derive(Debug, Clone)]
pub struct CleanOptions {
    /// Starting window size; odd, at least 1
    pub initial_window_size: u32,
    /// Scheduling of flagged pixels
    pub execution: Execution,
    /// Optional cancellation flag
    pub cancel: Option<CancelToken>,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            initial_window_size: DEFAULT_WINDOW_SIZE,
            execution: Execution::Auto,
            cancel: None,
        }
    }
}

impl CleanOptions {
    /// Create options with the given starting window size
    pub fn new(initial_window_size: u32) -> Self {
        Self {
            initial_window_size,
            ..Self::default()
        }
    }

    /// Set the scheduling mode
    pub fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Attach a cancellation flag
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Check the starting window size.
    ///
    /// # Errors
    ///
    /// Returns `CleanError::InvalidWindowSize` for zero or even sizes.
    pub fn validate(&self) -> CleanResult<()> {
        check_window_size(self.initial_window_size)
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

/// Window sizes are odd so the window has a center pixel.
pub(crate) fn check_window_size(size: u32) -> CleanResult<()> {
    if size == 0 || size % 2 == 0 {
        return Err(CleanError::InvalidWindowSize(size));
    }
    Ok(())
}
