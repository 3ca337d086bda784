//! Retry-until-deadline budget with a fixed random jitter between attempts.

use std::time::Duration;

use crate::ValidationError;

/// Window a pause between attempts is drawn from, uniformly, `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JitterWindow {
    min: Duration,
    max: Duration,
}

impl Default for JitterWindow {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(500),
            max: Duration::from_millis(1_000),
        }
    }
}

impl JitterWindow {
    pub fn new(min: Duration, max: Duration) -> Result<Self, ValidationError> {
        let min_ms = u64::try_from(min.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
        if min_ms == 0 || max_ms <= min_ms {
            return Err(ValidationError::InvalidJitterWindow { min_ms, max_ms });
        }
        Ok(Self { min, max })
    }

    pub const fn min(self) -> Duration {
        self.min
    }

    pub const fn max(self) -> Duration {
        self.max
    }

    /// Draws a pause with millisecond resolution.
    pub fn sample(self) -> Duration {
        let min_ms = u64::try_from(self.min.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(self.max.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(fastrand::u64(min_ms..max_ms))
    }
}

/// Time budget for one date's poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    deadline: Duration,
    jitter: JitterWindow,
}

impl RetryBudget {
    pub fn new(deadline: Duration) -> Self {
        Self {
            deadline,
            jitter: JitterWindow::default(),
        }
    }

    pub fn with_jitter(mut self, jitter: JitterWindow) -> Self {
        self.jitter = jitter;
        self
    }

    pub const fn deadline(self) -> Duration {
        self.deadline
    }

    /// Pause before the next attempt, or `None` once `elapsed` has reached
    /// the deadline. Pauses never extend past the deadline.
    pub fn next_delay(self, elapsed: Duration) -> Option<Duration> {
        let remaining = self.deadline.checked_sub(elapsed)?;
        if remaining.is_zero() {
            return None;
        }
        Some(self.jitter.sample().min(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_jitter_stays_within_half_to_one_second() {
        let jitter = JitterWindow::default();
        for _ in 0..200 {
            let pause = jitter.sample();
            assert!(pause >= Duration::from_millis(500), "pause={pause:?}");
            assert!(pause < Duration::from_millis(1_000), "pause={pause:?}");
        }
    }

    #[test]
    fn jitter_window_rejects_empty_or_zero_ranges() {
        assert!(JitterWindow::new(Duration::ZERO, Duration::from_millis(10)).is_err());
        assert!(JitterWindow::new(Duration::from_millis(10), Duration::from_millis(10)).is_err());
        assert!(JitterWindow::new(Duration::from_millis(10), Duration::from_millis(20)).is_ok());
    }

    #[test]
    fn budget_is_exhausted_at_deadline() {
        let budget = RetryBudget::new(Duration::from_secs(60));

        assert!(budget.next_delay(Duration::from_secs(59)).is_some());
        assert_eq!(budget.next_delay(Duration::from_secs(60)), None);
        assert_eq!(budget.next_delay(Duration::from_secs(61)), None);
    }

    #[test]
    fn pause_is_clamped_to_remaining_time() {
        let budget = RetryBudget::new(Duration::from_secs(1));

        let pause = budget
            .next_delay(Duration::from_millis(900))
            .expect("time remains");
        assert_eq!(pause, Duration::from_millis(100));
    }

    #[test]
    fn zero_deadline_allows_no_retry() {
        assert_eq!(RetryBudget::new(Duration::ZERO).next_delay(Duration::ZERO), None);
    }
}
