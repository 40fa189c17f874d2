//! Tracing events for API calls
//!
//! A [`CallTrace`] follows one logical call across all of its attempts and
//! emits a single outcome event when the retry loop is done. Field names:
//! `method`, `path`, `request_bytes`, `response_bytes`, `status`,
//! `retries`, `category`, `elapsed_ms`.

use fleetdesk_core::{ErrorCategory, Failure, classify};
use fleetdesk_transport::{HttpRequest, HttpResponse};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// How a traced call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// A 2xx response came back.
    Completed {
        /// Response status
        status: u16,
    },
    /// The retry loop gave up on a failure of this category.
    GaveUp {
        /// Category of the last failure
        category: ErrorCategory,
        /// Status of the last response, if any
        status: Option<u16>,
    },
    /// A cancel token stopped the call.
    Cancelled,
}

/// Tracks one call from dispatch to outcome.
///
/// Elapsed time is read from tokio's clock, so paused-time tests see the
/// simulated backoff.
#[derive(Debug)]
pub struct CallTrace {
    method: String,
    path: String,
    started: Instant,
    attempts: u32,
}

impl CallTrace {
    /// Start tracing `request` and emit the dispatch event.
    pub fn begin(request: &HttpRequest) -> Self {
        let trace = Self {
            method: request.method.to_string(),
            path: request.path().to_string(),
            started: Instant::now(),
            attempts: 0,
        };
        debug!(
            method = %trace.method,
            path = %trace.path,
            request_bytes = request.body.as_ref().map(Vec::len),
            "dispatching call"
        );
        trace
    }

    /// Count one attempt against the server.
    pub fn attempt(&mut self) {
        self.attempts += 1;
    }

    /// Attempts beyond the first.
    pub fn retries(&self) -> u32 {
        self.attempts.saturating_sub(1)
    }

    /// Time since [`begin`](Self::begin), backoff included.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Emit the outcome event for a successful call.
    pub fn completed(&self, response: &HttpResponse) -> CallOutcome {
        info!(
            method = %self.method,
            path = %self.path,
            status = response.status,
            response_bytes = response.body.len(),
            retries = self.retries(),
            elapsed_ms = millis(self.elapsed()),
            "call completed"
        );
        CallOutcome::Completed {
            status: response.status,
        }
    }

    /// Emit the outcome event for a call the retry loop gave up on.
    pub fn gave_up(&self, failure: &Failure) -> CallOutcome {
        if failure.is_cancelled() {
            debug!(
                method = %self.method,
                path = %self.path,
                retries = self.retries(),
                elapsed_ms = millis(self.elapsed()),
                "call cancelled"
            );
            return CallOutcome::Cancelled;
        }

        let category = classify(failure).category();
        warn!(
            method = %self.method,
            path = %self.path,
            status = failure.status(),
            category = category.as_str(),
            retries = self.retries(),
            elapsed_ms = millis(self.elapsed()),
            failure = %failure,
            "call gave up"
        );
        CallOutcome::GaveUp {
            category,
            status: failure.status(),
        }
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use pretty_assertions::assert_eq;

    fn get(path: &str) -> HttpRequest {
        HttpRequest::new(Method::GET, format!("https://fleet.example.com{path}"))
    }

    #[test]
    fn test_retries_count_attempts_after_the_first() {
        let mut trace = CallTrace::begin(&get("/v1/admin/users?limit=10"));
        assert_eq!(trace.retries(), 0);
        trace.attempt();
        assert_eq!(trace.retries(), 0);
        trace.attempt();
        trace.attempt();
        assert_eq!(trace.retries(), 2);
    }

    #[test]
    fn test_outcome_carries_failure_category() {
        let trace = CallTrace::begin(&get("/v1/admin/vehicles"));

        assert_eq!(
            trace.gave_up(&Failure::http(503, b"")),
            CallOutcome::GaveUp {
                category: ErrorCategory::Server,
                status: Some(503),
            }
        );
        assert_eq!(
            trace.gave_up(&Failure::network("connection refused")),
            CallOutcome::GaveUp {
                category: ErrorCategory::Network,
                status: None,
            }
        );
        assert_eq!(trace.gave_up(&Failure::Cancelled), CallOutcome::Cancelled);
    }

    #[test]
    fn test_millis_saturates() {
        assert_eq!(millis(Duration::from_millis(1500)), 1500);
        assert_eq!(millis(Duration::MAX), u64::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn test_elapsed_follows_tokio_clock() {
        let trace = CallTrace::begin(&get("/v1/admin/locations"));
        tokio::time::sleep(Duration::from_millis(1500)).await;
        let elapsed = trace.elapsed();
        assert!(elapsed >= Duration::from_millis(1500) && elapsed < Duration::from_millis(1505));
    }
}
