#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Failure handling shared by every FleetDesk crate.
//!
//! - **Failure taxonomy**: [`Failure`] is built once at the transport boundary
//!   and tells later layers what went wrong without inspecting error strings
//! - **Retry executor**: [`retry::execute_with_retry`] runs an async operation
//!   under a [`retry::RetryPolicy`] with exponential backoff
//! - **Error classifier**: [`classify()`] turns any failure into a
//!   [`ClassifiedError`] whose message can be shown to a user
//!
//! Enable the `tracing` feature to get retry and classification events.
//!
//! # Examples
//!
//! ```rust
//! use fleetdesk_core::prelude::*;
//!
//! # async fn example() {
//! let result = RetryPolicy::default()
//!     .execute(|| async { Err::<(), _>(Failure::http(404, br#"{}"#)) })
//!     .await;
//!
//! let error = classify(&result.unwrap_err());
//! assert_eq!(error.message, "resource not found");
//! assert!(error.is_client_error);
//! # }
//! ```

pub mod classify;
pub mod failure;
pub mod retry;

pub use classify::{ClassifiedError, ErrorCategory, classify, classify_with};
pub use failure::{AsFailure, Failure};

/// Convenient re-exports of commonly used items.
///
/// ```rust
/// use fleetdesk_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::classify::{ClassifiedError, ErrorCategory, classify, classify_with};
    pub use crate::failure::{AsFailure, Failure};
    pub use crate::retry::{
        BackoffStrategy, CancelToken, RetryPolicy, RetryPolicyBuilder, execute_with_cancel,
        execute_with_retry,
    };
}
