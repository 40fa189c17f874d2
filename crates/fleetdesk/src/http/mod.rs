//! Request building and sending
//!
//! [`RequestBuilder`] resolves a path against the client's base URL,
//! attaches credentials and default headers, and runs the single-attempt
//! transport under the client's retry policy.

mod request;

pub use request::RequestBuilder;

// Re-export HTTP types from the http crate for convenience
pub use ::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
