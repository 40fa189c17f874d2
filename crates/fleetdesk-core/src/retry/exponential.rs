//! Exponential backoff retry policy.

use super::cancel::CancelToken;
use super::executor::{execute_with_cancel, execute_with_retry};
use super::strategy::BackoffStrategy;
use crate::failure::{AsFailure, Failure};
use std::collections::BTreeSet;
use std::future::Future;
use std::time::Duration;

/// Default number of retries after the initial attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay before the first retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Status codes retried by default.
pub const DEFAULT_RETRYABLE_STATUS_CODES: [u16; 4] = [500, 502, 503, 504];

/// Bounded exponential backoff.
///
/// The delay before retry `n` (0-indexed) is `base_delay * 2^n`. With the
/// defaults the executor waits 1s, 2s and 4s, so a call that keeps failing
/// gives up after 7s of backoff and 4 invocations.
///
/// # Formula
///
/// ```text
/// delay      = base_delay * 2^n
/// jittered   = delay + delay * jitter * random(-1.0, +1.0)
/// final      = min(jittered, max_delay)
/// ```
///
/// Jitter and the ceiling are off by default.
///
/// # Examples
///
/// ```rust
/// use fleetdesk_core::prelude::*;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Failure> {
/// let policy = RetryPolicy::builder()
///     .max_retries(5)
///     .base_delay(Duration::from_millis(200))
///     .retryable_status_codes([429, 503])
///     .build();
///
/// let value = policy.execute(|| async { Ok::<_, Failure>(42) }).await?;
/// assert_eq!(value, 42);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
    retryable_status_codes: BTreeSet<u16>,
    jitter: f64,
    max_delay: Option<Duration>,
}

impl RetryPolicy {
    /// Create a builder starting from the defaults.
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::default()
    }

    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self::builder().max_retries(0).build()
    }

    /// Maximum number of retries after the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay before the first retry.
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Status codes that trigger a retry.
    pub fn retryable_status_codes(&self) -> &BTreeSet<u16> {
        &self.retryable_status_codes
    }

    /// Jitter factor in `[0, 1]`.
    pub fn jitter(&self) -> f64 {
        self.jitter
    }

    /// Ceiling applied to every delay, if any.
    pub fn max_delay(&self) -> Option<Duration> {
        self.max_delay
    }

    /// Whether a failure matches this policy's retry rules.
    ///
    /// Network failures and HTTP failures with a listed status are retryable.
    pub fn is_retryable(&self, failure: &Failure) -> bool {
        match failure {
            Failure::Http { status, .. } => self.retryable_status_codes.contains(status),
            Failure::Network { .. } => true,
            Failure::Other { .. } | Failure::Cancelled => false,
        }
    }

    /// Run `operation` under this policy.
    ///
    /// Shorthand for [`execute_with_retry`].
    pub async fn execute<F, Fut, T, E>(&self, operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: AsFailure,
    {
        execute_with_retry(operation, self).await
    }

    /// Run `operation` under this policy until it finishes or `cancel` fires.
    ///
    /// Shorthand for [`execute_with_cancel`].
    pub async fn execute_with_cancel<F, Fut, T, E>(
        &self,
        operation: F,
        cancel: &CancelToken,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: AsFailure,
    {
        execute_with_cancel(operation, self, cancel).await
    }
}

impl Default for RetryPolicy {
    /// 3 retries, 1s base delay, retry on 500/502/503/504, no jitter, no ceiling.
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
            retryable_status_codes: DEFAULT_RETRYABLE_STATUS_CODES.into_iter().collect(),
            jitter: 0.0,
            max_delay: None,
        }
    }
}

impl BackoffStrategy for RetryPolicy {
    fn should_retry(&self, failure: &Failure, _retry: u32) -> bool {
        self.is_retryable(failure)
    }

    fn next_delay(&self, retry: u32) -> Option<Duration> {
        let delay = 2u32
            .checked_pow(retry)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .unwrap_or(Duration::MAX);

        let delay = if self.jitter > 0.0 {
            let secs = delay.as_secs_f64();
            let offset = secs * self.jitter * (rand::random::<f64>() - 0.5) * 2.0;
            Duration::try_from_secs_f64((secs + offset).max(0.0)).unwrap_or(Duration::MAX)
        } else {
            delay
        };

        Some(match self.max_delay {
            Some(ceiling) => delay.min(ceiling),
            None => delay,
        })
    }

    fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

/// Builder for [`RetryPolicy`].
///
/// Unset fields fall back to the defaults documented on
/// [`RetryPolicy::default`].
#[derive(Debug, Default, Clone)]
pub struct RetryPolicyBuilder {
    max_retries: Option<u32>,
    base_delay: Option<Duration>,
    retryable_status_codes: Option<BTreeSet<u16>>,
    jitter: Option<f64>,
    max_delay: Option<Duration>,
}

impl RetryPolicyBuilder {
    /// Retries after the initial attempt. Default: 3.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Delay before the first retry. Default: 1s.
    ///
    /// A zero delay is raised to one millisecond.
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = Some(delay.max(Duration::from_millis(1)));
        self
    }

    /// Replace the set of retryable status codes.
    pub fn retryable_status_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.retryable_status_codes = Some(codes.into_iter().collect());
        self
    }

    /// Jitter factor, clamped to `[0, 1]`. Default: 0.
    pub fn jitter(mut self, jitter: f64) -> Self {
        self.jitter = Some(if jitter.is_nan() {
            0.0
        } else {
            jitter.clamp(0.0, 1.0)
        });
        self
    }

    /// Upper bound for any single delay. Default: none.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = Some(delay);
        self
    }

    /// Build the policy.
    pub fn build(self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        RetryPolicy {
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
            base_delay: self.base_delay.unwrap_or(defaults.base_delay),
            retryable_status_codes: self
                .retryable_status_codes
                .unwrap_or(defaults.retryable_status_codes),
            jitter: self.jitter.unwrap_or(defaults.jitter),
            max_delay: self.max_delay.or(defaults.max_delay),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.max_retries(), 3);
        assert_eq!(policy.base_delay(), Duration::from_millis(1000));
        assert_eq!(
            policy.retryable_status_codes().iter().copied().collect::<Vec<_>>(),
            vec![500, 502, 503, 504]
        );
        assert_eq!(policy.jitter(), 0.0);
        assert_eq!(policy.max_delay(), None);
        assert_eq!(RetryPolicy::builder().build(), policy);
    }

    #[test]
    fn test_exponential_delay_calculation() {
        let policy = RetryPolicy::builder()
            .base_delay(Duration::from_millis(100))
            .build();

        assert_eq!(policy.next_delay(0), Some(Duration::from_millis(100)));
        assert_eq!(policy.next_delay(1), Some(Duration::from_millis(200)));
        assert_eq!(policy.next_delay(2), Some(Duration::from_millis(400)));
        assert_eq!(policy.next_delay(3), Some(Duration::from_millis(800)));
    }

    #[test]
    fn test_delay_saturates_instead_of_overflowing() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.next_delay(200), Some(Duration::MAX));
    }

    #[test]
    fn test_delay_keeps_doubling_until_it_overflows() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.next_delay(31), Some(Duration::from_secs(1 << 31)));
        assert_eq!(policy.next_delay(32), Some(Duration::MAX));
        assert!(policy.next_delay(31) < policy.next_delay(32));
    }

    #[test]
    fn test_jitter_on_overflowed_delay_stays_finite() {
        let policy = RetryPolicy::builder().jitter(0.5).build();
        let delay = policy.next_delay(64).unwrap();
        assert!(delay > Duration::from_secs(1 << 62));
    }

    #[test]
    fn test_max_delay_cap() {
        let policy = RetryPolicy::builder()
            .base_delay(Duration::from_secs(1))
            .max_delay(Duration::from_secs(5))
            .build();

        assert_eq!(policy.next_delay(2), Some(Duration::from_secs(4)));
        for retry in 3..10 {
            assert_eq!(policy.next_delay(retry), Some(Duration::from_secs(5)));
        }
    }

    #[test]
    fn test_jitter_variation() {
        let policy = RetryPolicy::builder()
            .base_delay(Duration::from_secs(1))
            .jitter(0.5)
            .build();

        let delays: Vec<_> = (0..20).filter_map(|_| policy.next_delay(0)).collect();

        for delay in &delays {
            let millis = delay.as_millis();
            assert!(
                (500..=1500).contains(&millis),
                "delay with 50% jitter out of range: {millis}ms"
            );
        }
        assert!(delays.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_builder_clamps() {
        assert_eq!(RetryPolicy::builder().jitter(2.0).build().jitter(), 1.0);
        assert_eq!(RetryPolicy::builder().jitter(-0.5).build().jitter(), 0.0);
        assert_eq!(RetryPolicy::builder().jitter(f64::NAN).build().jitter(), 0.0);
        assert_eq!(
            RetryPolicy::builder()
                .base_delay(Duration::ZERO)
                .build()
                .base_delay(),
            Duration::from_millis(1)
        );
    }

    #[test]
    fn test_retryability() {
        let policy = RetryPolicy::default();

        for status in [500, 502, 503, 504] {
            assert!(policy.is_retryable(&Failure::http(status, b"")), "{status}");
        }
        for status in [400, 401, 403, 404, 409, 422, 501, 505] {
            assert!(!policy.is_retryable(&Failure::http(status, b"")), "{status}");
        }
        assert!(policy.is_retryable(&Failure::network("connection reset")));
        assert!(!policy.is_retryable(&Failure::other("bad json")));
        assert!(!policy.is_retryable(&Failure::Cancelled));

        let custom = RetryPolicy::builder().retryable_status_codes([429]).build();
        assert!(custom.is_retryable(&Failure::http(429, b"")));
        assert!(!custom.is_retryable(&Failure::http(503, b"")));
    }

    #[test]
    fn test_no_retry() {
        assert_eq!(RetryPolicy::no_retry().max_retries(), 0);
    }
}
