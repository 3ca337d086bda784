//! Scan tuning: worker-pool size and per-date retry window.

use std::time::Duration;

use crate::retry::JitterWindow;
use crate::ValidationError;

pub const DEFAULT_CONCURRENCY: usize = 10;
pub const MIN_CONCURRENCY: usize = 5;
pub const MAX_CONCURRENCY: usize = 40;

pub const DEFAULT_RETRY_WINDOW_SECS: u64 = 120;
/// Retry windows offered to users, in seconds.
pub const RETRY_WINDOW_CHOICES: [u64; 4] = [60, 120, 180, 300];

/// Validated settings for one month scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSettings {
    concurrency: usize,
    retry_window: Duration,
    jitter: JitterWindow,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            retry_window: Duration::from_secs(DEFAULT_RETRY_WINDOW_SECS),
            jitter: JitterWindow::default(),
        }
    }
}

impl ScanSettings {
    /// Library-level constructor: any pool size of at least one and any
    /// retry window.
    pub fn new(concurrency: usize, retry_window: Duration) -> Result<Self, ValidationError> {
        if concurrency == 0 {
            return Err(ValidationError::ConcurrencyOutOfRange {
                value: concurrency,
                min: 1,
                max: usize::MAX,
            });
        }

        Ok(Self {
            concurrency,
            retry_window,
            jitter: JitterWindow::default(),
        })
    }

    /// Constructor for user-supplied options, restricted to the offered
    /// ranges: concurrency 5..=40 and a retry window of 60/120/180/300s.
    pub fn from_options(
        concurrency: usize,
        retry_window_secs: u64,
    ) -> Result<Self, ValidationError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(ValidationError::ConcurrencyOutOfRange {
                value: concurrency,
                min: MIN_CONCURRENCY,
                max: MAX_CONCURRENCY,
            });
        }
        if !RETRY_WINDOW_CHOICES.contains(&retry_window_secs) {
            return Err(ValidationError::UnsupportedRetryWindow {
                value: retry_window_secs,
            });
        }

        Self::new(concurrency, Duration::from_secs(retry_window_secs))
    }

    pub fn with_jitter(mut self, jitter: JitterWindow) -> Self {
        self.jitter = jitter;
        self
    }

    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub const fn retry_window(&self) -> Duration {
        self.retry_window
    }

    pub const fn jitter(&self) -> JitterWindow {
        self.jitter
    }
}
