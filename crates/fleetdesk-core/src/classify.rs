//! Normalization of failures into a single user-facing error value.
//!
//! [`classify`] is the one place where a [`Failure`] becomes something a
//! person can read. It is pure and total: every failure shape maps to a
//! well-formed [`ClassifiedError`] with a non-empty message.

use crate::failure::Failure;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Message used when an HTTP failure carries nothing better.
pub const DEFAULT_MESSAGE: &str = "an error occurred";

/// Message used for failures that never reached a server.
pub const NETWORK_MESSAGE: &str = "connection error, check your network";

/// Message used for generic failures without a message of their own.
pub const UNEXPECTED_MESSAGE: &str = "an unexpected error occurred";

/// Coarse category of a classified failure, used to tag log events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// 5xx responses.
    Server,
    /// 4xx responses.
    Client,
    /// The transport never reached a server.
    Network,
    /// Everything else.
    #[default]
    Generic,
}

impl ErrorCategory {
    /// Tag used in log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Server => "SERVER",
            Self::Client => "CLIENT",
            Self::Network => "NETWORK",
            Self::Generic => "GENERIC",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure normalized for presentation.
///
/// When `status_code` is in `400..=599` exactly one of `is_client_error` and
/// `is_server_error` is set; otherwise both are `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ClassifiedError {
    /// Message safe to show verbatim to an end user. Never empty.
    pub message: String,
    /// HTTP status code, when the failure came from a response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// `true` for 4xx responses.
    pub is_client_error: bool,
    /// `true` for 5xx responses.
    pub is_server_error: bool,
    /// Set from the failure shape by [`classify`]; not part of the wire form.
    #[serde(skip)]
    category: ErrorCategory,
}

impl ClassifiedError {
    /// Category of the failure this error was classified from.
    ///
    /// Deserialized values report [`ErrorCategory::Generic`].
    pub fn category(&self) -> ErrorCategory {
        self.category
    }
}

/// Classify a failure.
///
/// Emits one `error` event (with the `tracing` feature) tagged with the
/// category, the status code and the final message.
pub fn classify(failure: &Failure) -> ClassifiedError {
    classify_with(failure, |_| None)
}

/// Like [`classify`], but `canned` can replace the built-in message for a
/// status. A message carried in the response body still wins.
pub fn classify_with<F>(failure: &Failure, canned: F) -> ClassifiedError
where
    F: Fn(u16) -> Option<&'static str>,
{
    let classified = match failure {
        Failure::Http { status, body } => classify_http(*status, body, canned),
        Failure::Network { .. } => ClassifiedError {
            message: NETWORK_MESSAGE.to_string(),
            status_code: None,
            is_client_error: false,
            is_server_error: false,
            category: ErrorCategory::Network,
        },
        Failure::Other { message } => generic(non_blank(message.as_deref())),
        Failure::Cancelled => generic(Some(&failure.to_string())),
    };

    log_classified(&classified);
    classified
}

fn classify_http<F>(status: u16, body: &Value, canned: F) -> ClassifiedError
where
    F: Fn(u16) -> Option<&'static str>,
{
    let status = if (100..=599).contains(&status) {
        status
    } else {
        500
    };
    let is_client_error = (400..500).contains(&status);
    let is_server_error = status >= 500;

    let message = extract_body_message(body)
        .or_else(|| canned(status))
        .unwrap_or_else(|| canned_message(status))
        .to_string();

    let category = if is_server_error {
        ErrorCategory::Server
    } else if is_client_error {
        ErrorCategory::Client
    } else {
        ErrorCategory::Generic
    };

    ClassifiedError {
        message,
        status_code: Some(status),
        is_client_error,
        is_server_error,
        category,
    }
}

/// `body.message`, else `body.error`, when either is a non-blank string.
fn extract_body_message(body: &Value) -> Option<&str> {
    let object = body.as_object()?;
    ["message", "error"]
        .iter()
        .find_map(|key| non_blank(object.get(*key).and_then(Value::as_str)))
}

fn canned_message(status: u16) -> &'static str {
    match status {
        401 => "unauthorized, please sign in",
        403 => "access denied, administrative rights required",
        404 => "resource not found",
        409 => "resource already exists (conflict)",
        422 => "invalid data",
        500..=599 => "server error, please retry later",
        _ => DEFAULT_MESSAGE,
    }
}

fn generic(message: Option<&str>) -> ClassifiedError {
    ClassifiedError {
        message: message.unwrap_or(UNEXPECTED_MESSAGE).to_string(),
        status_code: None,
        is_client_error: false,
        is_server_error: false,
        category: ErrorCategory::Generic,
    }
}

fn non_blank(message: Option<&str>) -> Option<&str> {
    message.filter(|m| !m.trim().is_empty())
}

#[cfg(feature = "tracing")]
fn log_classified(classified: &ClassifiedError) {
    tracing::error!(
        category = %classified.category,
        status = classified.status_code,
        message = %classified.message,
        "request failed"
    );
}

#[cfg(not(feature = "tracing"))]
fn log_classified(_classified: &ClassifiedError) {}
