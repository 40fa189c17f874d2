//! Configuration for the FleetDesk client

use crate::error::{Error, Result};
use fleetdesk_core::retry::RetryPolicy;
use http::{HeaderMap, HeaderName, HeaderValue};
use secrecy::SecretString;
use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the FleetDesk client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API. Defaults to [`DEFAULT_BASE_URL`](crate::DEFAULT_BASE_URL).
    pub base_url: Option<String>,

    /// Bearer token attached to every request
    pub token: Option<SecretString>,

    /// Timeout for a single attempt
    pub timeout: Duration,

    /// Connect timeout for a single attempt
    pub connect_timeout: Duration,

    /// Retry policy applied to every call
    pub retry_policy: RetryPolicy,

    /// Custom headers to include with every request
    pub default_headers: HeaderMap,

    /// Maximum idle connections kept per host
    pub pool_max_idle_per_host: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            retry_policy: RetryPolicy::default(),
            default_headers: HeaderMap::new(),
            pool_max_idle_per_host: 10,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with a bearer token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(SecretString::new(token.into().into_boxed_str())),
            ..Default::default()
        }
    }

    /// Create a new builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first, if present.
    ///
    /// This will look for:
    /// - `FLEETDESK_BASE_URL` for the API base URL
    /// - `FLEETDESK_TOKEN` for the bearer token
    /// - `FLEETDESK_TIMEOUT` for the request timeout (in seconds)
    /// - `FLEETDESK_MAX_RETRIES` for maximum retry attempts
    /// - `FLEETDESK_RETRY_BASE_DELAY_MS` for the first backoff delay
    ///
    /// Values that fail to parse are ignored.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        use std::env;

        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(base_url) = env::var("FLEETDESK_BASE_URL") {
            config.base_url = Some(base_url);
        }

        if let Ok(token) = env::var("FLEETDESK_TOKEN")
            && !token.trim().is_empty()
        {
            config.token = Some(SecretString::new(token.into_boxed_str()));
        }

        if let Ok(timeout_str) = env::var("FLEETDESK_TIMEOUT")
            && let Ok(timeout_secs) = timeout_str.parse::<u64>()
        {
            config.timeout = Duration::from_secs(timeout_secs);
        }

        let mut retry = RetryPolicy::builder()
            .retryable_status_codes(config.retry_policy.retryable_status_codes().iter().copied());

        if let Ok(max_retries_str) = env::var("FLEETDESK_MAX_RETRIES")
            && let Ok(max_retries) = max_retries_str.parse::<u32>()
        {
            retry = retry.max_retries(max_retries);
        }

        if let Ok(delay_str) = env::var("FLEETDESK_RETRY_BASE_DELAY_MS")
            && let Ok(delay_ms) = delay_str.parse::<u64>()
        {
            retry = retry.base_delay(Duration::from_millis(delay_ms));
        }

        config.retry_policy = retry.build();
        Ok(config)
    }

    /// Merge this configuration with another, with the other taking precedence.
    ///
    /// Fields still at their default value in `other` do not override.
    pub fn merge(mut self, other: ClientConfig) -> Self {
        let defaults = ClientConfig::default();

        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.token.is_some() {
            self.token = other.token;
        }
        if other.timeout != defaults.timeout {
            self.timeout = other.timeout;
        }
        if other.connect_timeout != defaults.connect_timeout {
            self.connect_timeout = other.connect_timeout;
        }
        if other.retry_policy != defaults.retry_policy {
            self.retry_policy = other.retry_policy;
        }
        for (key, value) in other.default_headers.iter() {
            self.default_headers.insert(key.clone(), value.clone());
        }
        if other.pool_max_idle_per_host != defaults.pool_max_idle_per_host {
            self.pool_max_idle_per_host = other.pool_max_idle_per_host;
        }

        self
    }
}

/// Builder for creating ClientConfig with a fluent API.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the bearer token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(SecretString::new(token.into().into_boxed_str()));
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the retry policy.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.config.retry_policy = policy;
        self
    }

    /// Set the idle connection pool size per host.
    pub fn pool_max_idle_per_host(mut self, size: usize) -> Self {
        self.config.pool_max_idle_per_host = size;
        self
    }

    /// Add a default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is not valid in an HTTP header.
    pub fn default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: HeaderName = key_str
            .parse()
            .map_err(|_| Error::InvalidHeaderName(key_str.clone()))?;
        let value: HeaderValue = value_str
            .parse()
            .map_err(|_| Error::InvalidHeaderValue(value_str.clone()))?;

        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
