//! The retry decision surface consulted by the executor.

use crate::failure::Failure;
use std::time::Duration;

/// Decides when a failed attempt is retried and how long to wait first.
///
/// The executor owns the loop (see [`execute_with_retry`]). A strategy only
/// answers three questions, so alternative policies can be plugged in without
/// reimplementing attempt bookkeeping or cancellation.
///
/// [`execute_with_retry`]: super::execute_with_retry
///
/// # Examples
///
/// ```rust
/// use fleetdesk_core::prelude::*;
/// use std::time::Duration;
///
/// /// Retries network failures only, once, without waiting.
/// struct NetworkOnce;
///
/// impl BackoffStrategy for NetworkOnce {
///     fn should_retry(&self, failure: &Failure, _retry: u32) -> bool {
///         failure.is_network()
///     }
///
///     fn next_delay(&self, _retry: u32) -> Option<Duration> {
///         Some(Duration::ZERO)
///     }
///
///     fn max_retries(&self) -> u32 {
///         1
///     }
/// }
///
/// # async fn example() {
/// let result = execute_with_retry(
///     || async { Err::<(), _>(Failure::http(400, b"{}")) },
///     &NetworkOnce,
/// )
/// .await;
/// assert!(result.is_err());
/// # }
/// ```
pub trait BackoffStrategy: Send + Sync {
    /// Whether `failure` is worth another attempt.
    ///
    /// `retry` is the 0-indexed number of the retry that would follow. It is
    /// consulted before the retry budget, so a `false` here always ends the
    /// loop after the current attempt.
    fn should_retry(&self, failure: &Failure, retry: u32) -> bool;

    /// Delay before retry number `retry` (0-indexed).
    ///
    /// `None` stops retrying even if the budget is not spent.
    fn next_delay(&self, retry: u32) -> Option<Duration>;

    /// Retries allowed after the initial attempt.
    ///
    /// `max_retries() == 3` means at most 4 invocations in total.
    fn max_retries(&self) -> u32;
}
