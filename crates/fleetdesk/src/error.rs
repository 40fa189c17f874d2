//! Error types for the FleetDesk client
//!
//! Every remote failure arrives as [`Error::Request`] carrying the
//! [`Failure`] observed on the last attempt. Local problems (bad
//! configuration, undecodable bodies, token storage) get their own variants.
//! A rejected sign-in is [`Error::Login`] so it can be worded for the
//! person typing the password.
//! [`Error::classify`] turns any of them into a message fit for an end user.

use fleetdesk_core::{ClassifiedError, Failure, classify, classify_with};
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the FleetDesk client.
#[derive(Debug, Error)]
pub enum Error {
    /// The request failed after the retry policy gave up.
    #[error("Request failed: {0}")]
    Request(#[from] Failure),

    /// The login endpoint refused the credentials or failed.
    #[error("Login failed: {0}")]
    Login(Failure),

    /// A successful response could not be decoded.
    #[error("Failed to decode response from {path}: {message}")]
    Decode {
        /// Request path
        path: String,
        /// Decoder message
        message: String,
    },

    /// A request body could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Missing required configuration.
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// Invalid HTTP header name.
    #[error("Invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// Token storage failed.
    #[error("Token store error: {0}")]
    TokenStore(#[from] std::io::Error),
}

impl Error {
    /// Normalize this error for display.
    ///
    /// Remote failures go through the classifier as-is. Local errors are
    /// classified as generic failures carrying their own message.
    pub fn classify(&self) -> ClassifiedError {
        match self {
            Error::Request(failure) => classify(failure),
            Error::Login(failure) => classify_with(failure, login_message),
            other => classify(&Failure::other(other.to_string())),
        }
    }

    /// The underlying failure, for remote errors.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Error::Request(failure) | Error::Login(failure) => Some(failure),
            _ => None,
        }
    }

    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<u16> {
        self.failure().and_then(Failure::status)
    }

    /// Whether the request was stopped by a cancel token.
    pub fn is_cancelled(&self) -> bool {
        self.failure().is_some_and(Failure::is_cancelled)
    }

    pub(crate) fn decode(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Error::Decode {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Shown when the login endpoint answers 401 without a message.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid email or password";

/// Shown for any other HTTP failure of the login endpoint.
pub const LOGIN_FAILED_MESSAGE: &str = "login failed";

fn login_message(status: u16) -> Option<&'static str> {
    Some(if status == 401 {
        INVALID_CREDENTIALS_MESSAGE
    } else {
        LOGIN_FAILED_MESSAGE
    })
}
