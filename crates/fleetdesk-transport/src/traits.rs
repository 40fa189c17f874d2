//! Transport trait and the request/response values it exchanges.

use crate::error::{Result, TransportError};
use async_trait::async_trait;
use fleetdesk_core::Failure;
use ::http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// An outgoing HTTP request
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,

    /// Absolute request URL, query string included
    pub url: String,

    /// Request headers
    pub headers: HashMap<String, String>,

    /// Request body (optional)
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Create a new HTTP request
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Add a header to the request
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `value` as the JSON body and set `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Serialization`] if `value` cannot be encoded.
    pub fn with_json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        let body = serde_json::to_vec(value)?;
        Ok(self
            .with_header("Content-Type", "application/json")
            .with_body(body))
    }

    /// Path and query of the URL, for logging.
    pub fn path(&self) -> &str {
        self.url
            .find("://")
            .and_then(|scheme_end| {
                let rest = &self.url[scheme_end + 3..];
                rest.find('/').map(|i| &rest[i..])
            })
            .unwrap_or("/")
    }
}

/// HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Response headers
    pub headers: HashMap<String, String>,

    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new HTTP response
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if the server answered 204 No Content
    pub fn is_no_content(&self) -> bool {
        self.status == 204
    }

    /// Turn a non-2xx response into [`Failure::Http`].
    ///
    /// The body is parsed as JSON when possible so the classifier can pick up
    /// a server-provided `message` or `error` field.
    pub fn error_for_status(self) -> std::result::Result<Self, Failure> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Failure::http(self.status, &self.body))
        }
    }

    /// Parse response body as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the response body cannot be parsed as valid JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| TransportError::Serialization(e.to_string()))
    }

    /// Get a header value by name (case-insensitive)
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Something that can deliver an [`HttpRequest`].
///
/// Implementations make exactly one attempt per call. Retrying is the
/// caller's job, which lets tests count attempts with a scripted transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an HTTP request and receive a response
    ///
    /// Any status code, including 4xx and 5xx, is returned as `Ok`.
    async fn send_http(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: &[u8]) -> HttpResponse {
        HttpResponse::new(status, HashMap::new(), body.to_vec())
    }

    #[test]
    fn test_error_for_status_passes_success_through() {
        let ok = response(200, b"[]").error_for_status().unwrap();
        assert_eq!(ok.body, b"[]");

        let empty = response(204, b"").error_for_status().unwrap();
        assert!(empty.is_no_content());
    }

    #[test]
    fn test_error_for_status_builds_http_failure() {
        let err = response(409, br#"{"message":"email already in use"}"#)
            .error_for_status()
            .unwrap_err();
        assert_eq!(
            err,
            Failure::Http {
                status: 409,
                body: json!({"message": "email already in use"}),
            }
        );

        let err = response(502, b"Bad Gateway").error_for_status().unwrap_err();
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_with_json_sets_content_type() {
        let request = HttpRequest::new(Method::POST, "http://localhost:3001/v1/admin/vehicles")
            .with_json(&json!({"brand": "Volvo"}))
            .unwrap();

        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(request.body.as_deref(), Some(br#"{"brand":"Volvo"}"#.as_slice()));
    }

    #[test]
    fn test_path() {
        let request = HttpRequest::new(Method::GET, "http://localhost:3001/v1/admin/users?limit=10");
        assert_eq!(request.path(), "/v1/admin/users?limit=10");

        let request = HttpRequest::new(Method::GET, "http://localhost:3001");
        assert_eq!(request.path(), "/");
    }

    #[test]
    fn test_get_header_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        let response = HttpResponse::new(200, headers, Vec::new());

        assert_eq!(response.get_header("Content-Type"), Some("application/json"));
        assert_eq!(response.get_header("x-missing"), None);
    }

    #[test]
    fn test_json_decode_error() {
        let result: Result<Vec<u32>> = response(200, b"not json").json();
        assert!(matches!(result, Err(TransportError::Serialization(_))));
    }
}
