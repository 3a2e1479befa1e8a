// src/api/retry.rs

use crate::api::ApiError;
use rand::Rng;
use std::time::Duration;

/// Bounded retry with capped exponential backoff and random jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(4),
            jitter: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// No waiting between attempts.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            jitter: Duration::ZERO,
        }
    }

    /// Backoff before attempt `attempt + 1`, jitter excluded.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }

    fn jittered(&self, attempt: u32) -> Duration {
        let jitter_ms = self.jitter.as_millis() as u64;
        let extra = if jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..=jitter_ms)
        };
        self.delay_after(attempt) + Duration::from_millis(extra)
    }

    pub fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnMut(u32) -> Result<T, ApiError>,
    {
        self.run_with(std::thread::sleep, op)
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or the
    /// attempt budget is spent. `op` receives the 1-based attempt number.
    pub fn run_with<T, S, F>(&self, mut sleep: S, mut op: F) -> Result<T, ApiError>
    where
        S: FnMut(Duration),
        F: FnMut(u32) -> Result<T, ApiError>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < max_attempts => {
                    let delay = self.jittered(attempt);
                    tracing::warn!(attempt, max_attempts, ?delay, error = %err, "retrying backend call");
                    sleep(delay);
                    attempt += 1;
                }
                Err(err) => {
                    if err.is_retryable() {
                        tracing::warn!(attempt, error = %err, "giving up after final attempt");
                    }
                    return Err(err);
                }
            }
        }
    }
}
