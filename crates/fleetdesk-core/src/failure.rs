//! The failure taxonomy shared by the retry executor and the classifier.
//!
//! A [`Failure`] is built once, at the transport boundary, from whatever went
//! wrong during a single attempt. Later layers never have to sniff the shape of
//! an error to decide what it is.

use serde_json::Value;
use thiserror::Error;

/// One failed attempt of a remote operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Failure {
    /// The server answered with a non-success status code.
    #[error("HTTP {status}")]
    Http {
        /// Status code of the response.
        status: u16,
        /// Parsed JSON body, or `Null` when the body was empty or not JSON.
        body: Value,
    },

    /// The request never produced a response (connect, DNS, timeout, send).
    #[error("network failure: {message}")]
    Network {
        /// Transport-level description, for logs only.
        message: String,
    },

    /// Anything else: decode errors, programming errors, unknown values.
    #[error("{}", .message.as_deref().unwrap_or("unknown failure"))]
    Other {
        /// The failure's own message, if it carried one.
        message: Option<String>,
    },

    /// The retry loop was asked to stop.
    #[error("operation cancelled")]
    Cancelled,
}

impl Failure {
    /// Build an HTTP failure from a status code and a raw response body.
    ///
    /// Bodies that are empty or not valid JSON become [`Value::Null`].
    pub fn http(status: u16, body: &[u8]) -> Self {
        let body = serde_json::from_slice(body).unwrap_or(Value::Null);
        Self::Http { status, body }
    }

    /// Build a network failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Build a generic failure carrying a message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: Some(message.into()),
        }
    }

    /// Wrap any error value as a generic failure.
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        Self::other(error.to_string())
    }

    /// Status code, for HTTP failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` for transport-level failures.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Returns `true` when the failure came from a cancellation request.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Self::other(message)
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Self::other(message)
    }
}

impl From<Option<String>> for Failure {
    fn from(message: Option<String>) -> Self {
        Self::Other { message }
    }
}

impl From<serde_json::Error> for Failure {
    fn from(error: serde_json::Error) -> Self {
        Self::other(error.to_string())
    }
}

/// Errors that can expose the [`Failure`] behind them.
///
/// The retry executor only needs to look at the failure to decide whether
/// another attempt is worth it. The caller keeps its own error type.
pub trait AsFailure {
    /// The failure this error represents.
    fn as_failure(&self) -> &Failure;

    /// Build the error the executor returns when it is cancelled.
    fn cancelled() -> Self
    where
        Self: Sized;
}

impl AsFailure for Failure {
    fn as_failure(&self) -> &Failure {
        self
    }

    fn cancelled() -> Self {
        Failure::Cancelled
    }
}
