//! # FleetDesk
//!
//! Rust client for the FleetDesk fleet administration API:
//! - Typed CRUD for users, vehicles, categories, transport locations and favorites
//! - Login with token persistence
//! - Automatic retries with exponential backoff for network errors and 5xx
//! - Error classification into messages fit for end users
//! - Pagination and debounced search helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fleetdesk::{Client, ListParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new()?;
//!     let credentials = client.auth().login("admin@example.com", "secret").await?;
//!     let client = client.with_credentials(credentials);
//!
//!     match client.vehicles().list(ListParams::page(1, 10)).await {
//!         Ok(page) => {
//!             for vehicle in &page.items {
//!                 println!("{} {}", vehicle.brand, vehicle.model);
//!             }
//!         }
//!         Err(err) => eprintln!("{}", err.classify().message),
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use auth::{Credentials, FileTokenStore, MemoryTokenStore, TokenStore};
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, INVALID_CREDENTIALS_MESSAGE, LOGIN_FAILED_MESSAGE, Result};
pub use pagination::{DEFAULT_PAGE_SIZE, ListParams, PAGE_SIZE_OPTIONS, Page, Pagination};
pub use types::*;

pub use fleetdesk_core::retry::{CancelToken, RetryPolicy};
pub use fleetdesk_core::{ClassifiedError, ErrorCategory, Failure};
pub use fleetdesk_transport::{HttpRequest, HttpResponse, Transport, TransportError};

// Module declarations
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod pagination;
pub mod resources;
pub mod search;
pub mod types;

// Re-export key dependencies for convenience
pub use async_trait::async_trait;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use fleetdesk::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        CancelToken, ClassifiedError, Client, ClientConfig, Credentials, Error, ListParams,
        Page, Pagination, Result, RetryPolicy, TokenStore,
        resources::Resource,
        search::{DEFAULT_DEBOUNCE, debounced},
        types::{
            Category, Favorite, Id, NewCategory, NewFavorite, NewTransportLocation, NewUser,
            NewVehicle, TransportLocation, User, Vehicle,
        },
    };
}

/// Crate version, taken from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Path prefix of the admin collections
pub const API_PREFIX: &str = "/v1/admin";

/// Login endpoint
pub const LOGIN_PATH: &str = "/v1/auth/login";

/// Name under which the session token is conventionally stored
pub const TOKEN_STORE_KEY: &str = "auth_token";
