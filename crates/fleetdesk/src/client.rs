//! Main client implementation for the FleetDesk admin API

use std::fmt;
use std::sync::Arc;

use http::{HeaderMap, Method};
use secrecy::ExposeSecret;
use url::Url;

use fleetdesk_core::retry::RetryPolicy;
use fleetdesk_transport::{HttpTransport, HttpTransportConfig, Transport};

use crate::{
    DEFAULT_BASE_URL,
    auth::{Credentials, TokenStore},
    config::ClientConfig,
    error::{Error, Result},
    http::RequestBuilder,
    resources::{Auth, Categories, Favorites, Locations, Users, Vehicles},
};

/// Client for the FleetDesk admin API.
///
/// Cloning is cheap; clones share the connection pool. Every call goes
/// through the client's [`RetryPolicy`], so transient network errors and
/// 5xx responses are retried with exponential backoff before an error is
/// returned.
///
/// # Example
///
/// ```rust,no_run
/// use fleetdesk::{Client, ClientConfig};
///
/// # async fn example() -> fleetdesk::Result<()> {
/// let client = Client::from_config(
///     ClientConfig::builder()
///         .base_url("http://localhost:3001")
///         .token("session-token")
///         .build(),
/// )?;
///
/// let vehicles = client.vehicles().list(Default::default()).await?;
/// println!("{} vehicles on this page", vehicles.items.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Clone)]
struct ClientInner {
    transport: Arc<dyn Transport>,
    base_url: Url,
    retry_policy: RetryPolicy,
    credentials: Option<Credentials>,
    default_headers: HeaderMap,
}

impl Client {
    /// Create a client for [`DEFAULT_BASE_URL`] with default settings and
    /// no credentials.
    pub fn new() -> Result<Self> {
        Self::from_config(ClientConfig::default())
    }

    /// Create a client configured from `FLEETDESK_*` environment variables.
    ///
    /// See [`ClientConfig::from_env`].
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from a configuration object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] for a blank or non-HTTP base URL and
    /// [`Error::HttpClient`] if the connection pool cannot be created.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(HttpTransportConfig {
            timeout: config.timeout,
            connect_timeout: config.connect_timeout,
            pool_max_idle_per_host: config.pool_max_idle_per_host,
            ..Default::default()
        })
        .map_err(|e| Error::HttpClient(e.to_string()))?;

        Self::from_transport(Arc::new(transport), config)
    }

    /// Create a client that sends requests through `transport`.
    ///
    /// Timeouts and pool settings in `config` are ignored; they belong to
    /// the transport.
    pub fn from_transport(transport: Arc<dyn Transport>, config: ClientConfig) -> Result<Self> {
        let base_url = parse_base_url(config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let credentials = config
            .token
            .filter(|token| !token.expose_secret().trim().is_empty())
            .map(Credentials::from);

        Ok(Self {
            inner: Arc::new(ClientInner {
                transport,
                base_url,
                retry_policy: config.retry_policy,
                credentials,
                default_headers: config.default_headers,
            }),
        })
    }

    /// A client sharing this one's connection pool but authenticating with
    /// `credentials`.
    pub fn with_credentials(&self, credentials: Credentials) -> Self {
        self.with_inner(|inner| inner.credentials = Some(credentials))
    }

    /// A client sharing this one's connection pool with no credentials.
    pub fn without_credentials(&self) -> Self {
        self.with_inner(|inner| inner.credentials = None)
    }

    /// A client using whatever token `store` holds, or none.
    pub fn with_stored_credentials(&self, store: &dyn TokenStore) -> Result<Self> {
        Ok(match store.load()? {
            Some(credentials) => self.with_credentials(credentials),
            None => self.without_credentials(),
        })
    }

    /// A client sharing this one's connection pool with another retry policy.
    pub fn with_retry_policy(&self, policy: RetryPolicy) -> Self {
        self.with_inner(|inner| inner.retry_policy = policy)
    }

    fn with_inner(&self, update: impl FnOnce(&mut ClientInner)) -> Self {
        let mut inner = (*self.inner).clone();
        update(&mut inner);
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Users endpoint.
    pub fn users(&self) -> Users {
        Users::new(self.clone())
    }

    /// Vehicles endpoint.
    pub fn vehicles(&self) -> Vehicles {
        Vehicles::new(self.clone())
    }

    /// Categories endpoint.
    pub fn categories(&self) -> Categories {
        Categories::new(self.clone())
    }

    /// Transport locations endpoint.
    pub fn locations(&self) -> Locations {
        Locations::new(self.clone())
    }

    /// Favorites endpoint.
    pub fn favorites(&self) -> Favorites {
        Favorites::new(self.clone())
    }

    /// Login and logout.
    pub fn auth(&self) -> Auth {
        Auth::new(self.clone())
    }

    /// Create a request builder for a path relative to the base URL.
    ///
    /// Useful for endpoints without a typed wrapper.
    pub fn request(&self, method: Method, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(self.clone(), method, path)
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Retry policy applied to every call.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.inner.retry_policy
    }

    /// Credentials attached to every call, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.inner.credentials.as_ref()
    }

    pub(crate) fn default_headers(&self) -> &HeaderMap {
        &self.inner.default_headers
    }

    pub(crate) fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.inner.transport)
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        let joined = if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        };
        Url::parse(&joined).map_err(|e| Error::InvalidUrl(format!("{joined}: {e}")))
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("transport", &self.inner.transport.name())
            .field("authenticated", &self.inner.credentials.is_some())
            .field("retry_policy", &self.inner.retry_policy)
            .finish()
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::InvalidUrl("base URL is empty".to_string()));
    }
    let url = Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(Error::InvalidUrl(format!(
            "{raw}: unsupported scheme {scheme:?}"
        ))),
    }
}

/// Builder for creating a configured [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Set the base URL for the API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config = self.config.merge(ClientConfig::with_token(token));
        self
    }

    /// Set the timeout for a single attempt.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the retry policy.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.config.retry_policy = policy;
        self
    }

    /// Add a custom default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is not valid in an HTTP header.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let overlay = ClientConfig::builder().default_header(key, value)?.build();
        self.config = self.config.merge(overlay);
        Ok(self)
    }

    /// Send requests through a custom transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client with the configured options.
    pub fn build(self) -> Result<Client> {
        match self.transport {
            Some(transport) => Client::from_transport(transport, self.config),
            None => Client::from_config(self.config),
        }
    }
}
