//! Bounded exponential-backoff retry.
//!
//! - [`BackoffStrategy`] decides whether and when to retry
//! - [`RetryPolicy`] is the standard exponential policy
//! - [`execute_with_retry`] / [`execute_with_cancel`] run the loop
//! - [`CancelToken`] stops a loop between attempts
//!
//! Only failures the strategy accepts are retried. With [`RetryPolicy`] that
//! means network failures and HTTP statuses in its retryable set; client
//! errors and generic failures propagate on first occurrence.
//!
//! # Examples
//!
//! ```rust
//! use fleetdesk_core::retry::{RetryPolicy, execute_with_retry};
//! use fleetdesk_core::Failure;
//!
//! # async fn example() -> Result<(), Failure> {
//! let policy = RetryPolicy::default();
//! let users = execute_with_retry(|| async { Ok::<_, Failure>(vec!["ada"]) }, &policy).await?;
//! assert_eq!(users.len(), 1);
//! # Ok(())
//! # }
//! ```

mod cancel;
mod executor;
mod exponential;
mod strategy;

pub use cancel::CancelToken;
pub use executor::{execute_with_cancel, execute_with_retry};
pub use exponential::{
    DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRIES, DEFAULT_RETRYABLE_STATUS_CODES, RetryPolicy,
    RetryPolicyBuilder,
};
pub use strategy::BackoffStrategy;
