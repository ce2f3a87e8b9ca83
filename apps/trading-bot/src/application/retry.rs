//! Bounded retry with exponential backoff for idempotent exchange queries.
//!
//! Only read-only calls go through [`retry_read_only`]. Order placement and
//! cancellation are never repeated by this layer, since an ambiguous network
//! failure could otherwise submit the same order twice.
//!
//! # Example
//!
//! ```rust,ignore
//! use trading_bot::application::{ExponentialBackoffCalculator, RetryPolicy};
//!
//! let policy = RetryPolicy::default();
//! let mut backoff = ExponentialBackoffCalculator::new(&policy);
//!
//! let delay1 = backoff.next_backoff(); // ~1s with jitter
//! let delay2 = backoff.next_backoff(); // ~2s with jitter
//! let delay3 = backoff.next_backoff(); // None: three attempts in total
//! ```

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Retry policy for read-only exchange queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first (default: 3).
    pub max_attempts: u32,
    /// Delay before the first retry (default: 1s).
    pub initial_backoff: Duration,
    /// Upper bound on any single delay (default: 10s).
    pub max_backoff: Duration,
    /// Growth factor between delays (default: 2.0).
    pub backoff_multiplier: f64,
    /// Jitter factor for randomization (default: 0.1 = ±10%).
    pub jitter_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(10),
            backoff_multiplier: 2.0,
            jitter_factor: 0.1,
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy with custom settings.
    #[must_use]
    pub const fn new(
        max_attempts: u32,
        initial_backoff: Duration,
        max_backoff: Duration,
        backoff_multiplier: f64,
        jitter_factor: f64,
    ) -> Self {
        Self {
            max_attempts,
            initial_backoff,
            max_backoff,
            backoff_multiplier,
            jitter_factor,
        }
    }

    /// Retry up to `max_attempts` in total without waiting between attempts.
    #[must_use]
    pub const fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            backoff_multiplier: 1.0,
            jitter_factor: 0.0,
        }
    }

    /// Disable retries: every call is attempted exactly once.
    #[must_use]
    pub const fn none() -> Self {
        Self::immediate(1)
    }
}

/// Calculator for exponential backoff with jitter.
#[derive(Debug)]
pub struct ExponentialBackoffCalculator {
    current_retry: u32,
    max_retries: u32,
    initial_backoff_ms: u64,
    max_backoff_ms: u64,
    backoff_multiplier: f64,
    jitter_factor: f64,
}

impl ExponentialBackoffCalculator {
    /// Create a new backoff calculator from a retry policy.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(policy: &RetryPolicy) -> Self {
        Self {
            current_retry: 0,
            max_retries: policy.max_attempts.saturating_sub(1),
            initial_backoff_ms: policy.initial_backoff.as_millis() as u64,
            max_backoff_ms: policy.max_backoff.as_millis() as u64,
            backoff_multiplier: policy.backoff_multiplier,
            jitter_factor: policy.jitter_factor,
        }
    }

    /// Get the delay before the next retry.
    ///
    /// Returns `None` once the policy's attempts are used up.
    pub fn next_backoff(&mut self) -> Option<Duration> {
        if self.current_retry >= self.max_retries {
            return None;
        }

        let base_backoff_ms = self.calculate_base_backoff_ms();
        let jittered_ms = self.apply_jitter(base_backoff_ms);
        let capped_ms = jittered_ms.min(self.max_backoff_ms);

        self.current_retry += 1;

        Some(Duration::from_millis(capped_ms))
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        clippy::cast_possible_wrap
    )]
    fn calculate_base_backoff_ms(&self) -> u64 {
        let multiplier = self.backoff_multiplier.powi(self.current_retry as i32);
        let backoff = (self.initial_backoff_ms as f64 * multiplier) as u64;
        backoff.min(self.max_backoff_ms)
    }

    /// Random value in [backoff * (1 - jitter), backoff * (1 + jitter)].
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn apply_jitter(&self, backoff_ms: u64) -> u64 {
        if backoff_ms == 0 || self.jitter_factor <= 0.0 {
            return backoff_ms;
        }

        let jitter_range = backoff_ms as f64 * self.jitter_factor;
        let min = (backoff_ms as f64 - jitter_range).max(0.0);
        let max = backoff_ms as f64 + jitter_range;

        rand::rng().random_range(min..=max) as u64
    }

    /// Number of retries handed out so far.
    #[must_use]
    pub const fn retries(&self) -> u32 {
        self.current_retry
    }
}

/// Run an idempotent `call`, repeating it while `should_retry` accepts the
/// error and the policy allows another attempt.
///
/// The last error is returned unchanged once attempts run out or the error
/// is not retryable.
pub async fn retry_read_only<T, E, F, Fut>(
    policy: &RetryPolicy,
    operation: &'static str,
    should_retry: impl Fn(&E) -> bool,
    mut call: F,
) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut backoff = ExponentialBackoffCalculator::new(policy);

    loop {
        let error = match call().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        if !should_retry(&error) {
            return Err(error);
        }
        let Some(delay) = backoff.next_backoff() else {
            tracing::warn!(
                operation,
                attempts = backoff.retries() + 1,
                error = %error,
                "Retries exhausted"
            );
            return Err(error);
        };

        tracing::warn!(
            operation,
            attempt = backoff.retries(),
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %error,
            "Retrying after transient failure"
        );
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
