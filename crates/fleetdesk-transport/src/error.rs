//! Transport error types

use fleetdesk_core::Failure;
use thiserror::Error;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors raised before a complete HTTP response was received.
///
/// A response with an error status is not a transport error; see
/// [`HttpResponse::error_for_status`](crate::HttpResponse::error_for_status).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Could not connect or the connection broke while sending
    #[error("connection error: {0}")]
    Connection(String),

    /// The request did not complete in time
    #[error("request timed out")]
    Timeout,

    /// The request could not be built (bad URL, bad header)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A body could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Any other HTTP-level failure
    #[error("HTTP error: {0}")]
    Http(String),
}

impl TransportError {
    /// Whether the request failed before reaching the server.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() || err.is_request() || err.is_body() {
            Self::Connection(err.to_string())
        } else if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            Self::Serialization(err.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<TransportError> for Failure {
    fn from(err: TransportError) -> Self {
        if err.is_network() {
            Failure::network(err.to_string())
        } else {
            Failure::other(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_errors_become_network_failures() {
        let failure = Failure::from(TransportError::Connection("refused".into()));
        assert_eq!(failure, Failure::network("connection error: refused"));

        assert!(Failure::from(TransportError::Timeout).is_network());
    }

    #[test]
    fn test_other_errors_become_generic_failures() {
        let failure = Failure::from(TransportError::InvalidRequest("relative URL".into()));
        assert_eq!(failure, Failure::other("invalid request: relative URL"));

        let failure = Failure::from(TransportError::Serialization("eof".into()));
        assert!(!failure.is_network());
    }

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(
            TransportError::from(err),
            TransportError::Serialization(_)
        ));
    }
}
