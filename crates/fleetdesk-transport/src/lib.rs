//! Transport layer for the FleetDesk admin client
//!
//! - **Transport trait**: one request in, one response out
//! - **HTTP transport**: pooled reqwest client
//! - **Error handling**: [`TransportError`] for failures before a response,
//!   [`HttpResponse::error_for_status`] for error statuses; both convert into
//!   [`fleetdesk_core::Failure`]
//!
//! # Usage
//!
//! ```no_run
//! use fleetdesk_transport::{HttpRequest, HttpTransport, Transport};
//! use http::Method;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new()?;
//! let request = HttpRequest::new(Method::GET, "http://localhost:3001/v1/admin/vehicles");
//! let response = transport.send_http(request).await?.error_for_status()?;
//! println!("{} bytes", response.body.len());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod traits;

pub use error::{Result, TransportError};
pub use http::{HttpTransport, HttpTransportConfig};
pub use traits::{HttpRequest, HttpResponse, Transport};
