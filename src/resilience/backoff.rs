//! Exponential backoff between failed refresh cycles.

use std::time::Duration;
use rand::Rng;

use crate::config::ScheduleConfig;

/// Tracks consecutive failures and hands out growing retry delays.
///
/// Delay for the n-th consecutive failure (zero-based) is
/// `min * factor^n`, capped at `max`. A success calls [`reset`](Self::reset)
/// so the next failure starts over from `min`.
#[derive(Debug, Clone)]
pub struct BackoffScheduler {
    min: Duration,
    max: Duration,
    factor: f64,
    jitter: bool,
    attempt: u32,
}

impl BackoffScheduler {
    pub fn new(min: Duration, max: Duration, factor: f64) -> Self {
        Self {
            min: min.min(max),
            max,
            factor: factor.max(1.0),
            jitter: false,
            attempt: 0,
        }
    }

    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self::new(config.min_backoff(), config.max_backoff(), config.factor)
            .with_jitter(config.jitter)
    }

    /// Randomize each delay uniformly between `min` and the computed delay.
    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Return the delay for the current failure and advance to the next one.
    pub fn next(&mut self) -> Duration {
        let delay = self.delay_for(self.attempt);
        self.attempt = self.attempt.saturating_add(1);

        if self.jitter && delay > self.min {
            let lo = self.min.as_secs_f64();
            let hi = delay.as_secs_f64();
            return Duration::from_secs_f64(rand::thread_rng().gen_range(lo..=hi));
        }
        delay
    }

    /// Forget previous failures.
    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    /// Consecutive failures recorded since the last reset.
    pub fn attempts(&self) -> u32 {
        self.attempt
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        let scaled = self.min.as_secs_f64() * self.factor.powi(attempt.min(i32::MAX as u32) as i32);
        if !scaled.is_finite() || scaled >= self.max.as_secs_f64() {
            return self.max;
        }
        Duration::from_secs_f64(scaled).clamp(self.min, self.max)
    }
}

impl Default for BackoffScheduler {
    fn default() -> Self {
        Self::from_config(&ScheduleConfig::default())
    }
}
