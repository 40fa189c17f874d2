//! The retry loop.

use super::cancel::CancelToken;
use super::strategy::BackoffStrategy;
use crate::failure::AsFailure;
use std::future::Future;

/// Run `operation` until it succeeds, fails with a non-retryable failure, or
/// the strategy's retry budget is spent.
///
/// Attempts are strictly sequential. The first attempt runs immediately; each
/// retry waits for [`BackoffStrategy::next_delay`]. The error returned is
/// always the one produced by the last attempt.
///
/// # Examples
///
/// ```rust
/// use fleetdesk_core::prelude::*;
/// use std::time::Duration;
///
/// # async fn example() {
/// let policy = RetryPolicy::builder()
///     .base_delay(Duration::from_millis(10))
///     .build();
///
/// let mut calls = 0;
/// let result = execute_with_retry(
///     || {
///         calls += 1;
///         let attempt = calls;
///         async move {
///             if attempt < 3 {
///                 Err(Failure::http(503, b""))
///             } else {
///                 Ok("done")
///             }
///         }
///     },
///     &policy,
/// )
/// .await;
///
/// assert_eq!(result, Ok("done"));
/// assert_eq!(calls, 3);
/// # }
/// ```
pub async fn execute_with_retry<S, F, Fut, T, E>(operation: F, strategy: &S) -> Result<T, E>
where
    S: BackoffStrategy + ?Sized,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: AsFailure,
{
    run(operation, strategy, None).await
}

/// Like [`execute_with_retry`], but stops as soon as `cancel` fires.
///
/// The token is checked before every attempt and raced against every backoff
/// delay. A cancelled loop returns `E::cancelled()` and never invokes the
/// operation again. An attempt already in flight is allowed to finish.
pub async fn execute_with_cancel<S, F, Fut, T, E>(
    operation: F,
    strategy: &S,
    cancel: &CancelToken,
) -> Result<T, E>
where
    S: BackoffStrategy + ?Sized,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: AsFailure,
{
    run(operation, strategy, Some(cancel)).await
}

async fn run<S, F, Fut, T, E>(
    mut operation: F,
    strategy: &S,
    cancel: Option<&CancelToken>,
) -> Result<T, E>
where
    S: BackoffStrategy + ?Sized,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: AsFailure,
{
    let mut retry = 0u32;

    loop {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(E::cancelled());
        }

        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        let failure = error.as_failure();
        if !strategy.should_retry(failure, retry) {
            #[cfg(feature = "tracing")]
            tracing::debug!(attempt = retry + 1, failure = %failure, "not retryable");
            return Err(error);
        }

        if retry >= strategy.max_retries() {
            #[cfg(feature = "tracing")]
            tracing::warn!(attempts = retry + 1, failure = %failure, "retries exhausted");
            return Err(error);
        }

        let Some(delay) = strategy.next_delay(retry) else {
            return Err(error);
        };

        #[cfg(feature = "tracing")]
        tracing::warn!(
            attempt = retry + 1,
            max_retries = strategy.max_retries(),
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            failure = %failure,
            "attempt failed, retrying"
        );

        match cancel {
            Some(token) => {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = token.cancelled() => return Err(E::cancelled()),
                }
            }
            None => tokio::time::sleep(delay).await,
        }

        retry += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::Failure;
    use crate::retry::RetryPolicy;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::time::Instant;

    /// Records when each invocation happened, relative to `start`.
    #[derive(Clone)]
    struct Recorder {
        start: Instant,
        calls: Arc<Mutex<Vec<Duration>>>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                start: Instant::now(),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Record a call and return its 0-indexed number.
        fn record(&self) -> usize {
            let mut calls = self.calls.lock().unwrap();
            calls.push(self.start.elapsed());
            calls.len() - 1
        }

        fn offsets_ms(&self) -> Vec<u128> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(Duration::as_millis)
                .collect()
        }

        fn count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    fn assert_offsets(actual: &[u128], expected: &[u128]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!(
                *a >= *e && *a < *e + 5,
                "offset {a}ms, expected {e}ms ({actual:?})"
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_success_runs_once() {
        let recorder = Recorder::new();
        let result = execute_with_retry(
            || {
                recorder.record();
                async { Ok::<_, Failure>(42) }
            },
            &RetryPolicy::default(),
        )
        .await;

        assert_eq!(result, Ok(42));
        assert_eq!(recorder.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_errors_then_success() {
        let recorder = Recorder::new();
        let policy = RetryPolicy::default();

        let result = execute_with_retry(
            || {
                let call = recorder.record();
                async move {
                    if call < 3 {
                        Err(Failure::http(503, b""))
                    } else {
                        Ok("recovered")
                    }
                }
            },
            &policy,
        )
        .await;

        assert_eq!(result, Ok("recovered"));
        assert_offsets(&recorder.offsets_ms(), &[0, 1000, 3000, 7000]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_retryable_failure_exhausts_budget() {
        for max_retries in [0, 1, 2, 5] {
            let recorder = Recorder::new();
            let policy = RetryPolicy::builder()
                .max_retries(max_retries)
                .base_delay(Duration::from_millis(10))
                .build();

            let result = execute_with_retry(
                || {
                    let call = recorder.record();
                    async move { Err::<(), _>(Failure::network(format!("refused #{call}"))) }
                },
                &policy,
            )
            .await;

            assert_eq!(recorder.count(), max_retries as usize + 1);
            assert_eq!(
                result,
                Err(Failure::network(format!("refused #{max_retries}")))
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_doubles_per_retry() {
        let recorder = Recorder::new();
        let policy = RetryPolicy::builder()
            .max_retries(4)
            .base_delay(Duration::from_millis(250))
            .build();

        let _ = execute_with_retry(
            || {
                recorder.record();
                async { Err::<(), _>(Failure::http(500, b"")) }
            },
            &policy,
        )
        .await;

        assert_offsets(&recorder.offsets_ms(), &[0, 250, 750, 1750, 3750]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_client_error_is_not_retried() {
        let recorder = Recorder::new();
        let start = Instant::now();

        let result = execute_with_retry(
            || {
                recorder.record();
                async { Err::<(), _>(Failure::http(400, br#"{"message":"bad"}"#)) }
            },
            &RetryPolicy::builder().max_retries(10).build(),
        )
        .await;

        assert_eq!(recorder.count(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert!(matches!(result, Err(Failure::Http { status: 400, .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generic_failure_is_not_retried() {
        let attempts = AtomicU32::new(0);
        let result = execute_with_retry(
            || {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err::<(), _>(Failure::other("decode error")) }
            },
            &RetryPolicy::default(),
        )
        .await;

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(result, Err(Failure::other("decode error")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_caller_error_type_is_preserved() {
        #[derive(Debug, PartialEq)]
        struct ApiError {
            failure: Failure,
            attempt: u32,
        }

        impl AsFailure for ApiError {
            fn as_failure(&self) -> &Failure {
                &self.failure
            }

            fn cancelled() -> Self {
                Self {
                    failure: Failure::Cancelled,
                    attempt: 0,
                }
            }
        }

        let attempts = AtomicU32::new(0);
        let result: Result<(), ApiError> = execute_with_retry(
            || {
                let attempt = attempts.fetch_add(1, Ordering::SeqCst);
                async move {
                    Err(ApiError {
                        failure: Failure::http(502, b""),
                        attempt,
                    })
                }
            },
            &RetryPolicy::builder().max_retries(2).build(),
        )
        .await;

        assert_eq!(
            result,
            Err(ApiError {
                failure: Failure::http(502, b""),
                attempt: 2,
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_backoff() {
        let recorder = Recorder::new();
        let token = CancelToken::new();
        let policy = RetryPolicy::default();
        let start = Instant::now();

        let run = execute_with_cancel(
            || {
                recorder.record();
                async { Err::<(), _>(Failure::http(503, b"")) }
            },
            &policy,
            &token,
        );
        let canceller = async {
            tokio::time::sleep(Duration::from_millis(1500)).await;
            token.cancel();
        };

        let (result, ()) = tokio::join!(run, canceller);

        assert_eq!(result, Err(Failure::Cancelled));
        assert_offsets(&recorder.offsets_ms(), &[0, 1000]);
        let elapsed = start.elapsed().as_millis();
        assert!((1500..1505).contains(&elapsed), "elapsed {elapsed}ms");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_token_skips_operation() {
        let token = CancelToken::new();
        token.cancel();
        let attempts = AtomicU32::new(0);

        let result = execute_with_cancel(
            || {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, Failure>(()) }
            },
            &RetryPolicy::default(),
            &token,
        )
        .await;

        assert_eq!(result, Err(Failure::Cancelled));
        assert_eq!(attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_uncancelled_token_behaves_like_plain_retry() {
        let token = CancelToken::new();
        let recorder = Recorder::new();

        let result = RetryPolicy::default()
            .execute_with_cancel(
                || {
                    let call = recorder.record();
                    async move {
                        if call == 0 {
                            Err(Failure::network("reset"))
                        } else {
                            Ok(call)
                        }
                    }
                },
                &token,
            )
            .await;

        assert_eq!(result, Ok(1));
        assert_offsets(&recorder.offsets_ms(), &[0, 1000]);
    }
}
