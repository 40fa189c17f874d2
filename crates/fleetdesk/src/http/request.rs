//! HTTP request builder

use crate::client::Client;
use crate::error::{Error, Result};
use crate::observability::CallTrace;
use fleetdesk_core::Failure;
use fleetdesk_core::retry::{CancelToken, RetryPolicy, execute_with_cancel, execute_with_retry};
use fleetdesk_transport::{HttpRequest, HttpResponse};
use http::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Builder for a single API call.
///
/// Created by [`Client::request`]. Nothing is sent until one of the `send*`
/// methods is awaited; each of them retries according to the client's
/// [`RetryPolicy`] unless [`retry_policy`](Self::retry_policy) overrides it.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    client: Client,
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    cancel: Option<CancelToken>,
    retry_policy: Option<RetryPolicy>,
}

impl RequestBuilder {
    pub(crate) fn new(client: Client, method: Method, path: impl Into<String>) -> Self {
        Self {
            client,
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            cancel: None,
            retry_policy: None,
        }
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append several query parameters.
    pub fn query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Encode `value` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if `value` cannot be encoded.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(value)?);
        Ok(self)
    }

    /// Stop retrying once `token` is cancelled.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Use `policy` instead of the client's retry policy for this call.
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Send the request, retrying failed attempts.
    ///
    /// Any 2xx response is returned. Other statuses and network errors become
    /// [`Error::Request`] once the retry policy gives up.
    pub async fn send(self) -> Result<HttpResponse> {
        let request = self.build()?;

        let mut trace = CallTrace::begin(&request);

        let transport = self.client.transport();
        let policy = self
            .retry_policy
            .as_ref()
            .unwrap_or_else(|| self.client.retry_policy());

        let attempt = || {
            trace.attempt();
            let transport = Arc::clone(&transport);
            let request = request.clone();
            async move {
                let response = transport.send_http(request).await.map_err(Failure::from)?;
                response.error_for_status()
            }
        };

        let result = match &self.cancel {
            Some(token) => execute_with_cancel(attempt, policy, token).await,
            None => execute_with_retry(attempt, policy).await,
        };

        match result {
            Ok(response) => {
                trace.completed(&response);
                Ok(response)
            }
            Err(failure) => {
                trace.gave_up(&failure);
                Err(Error::Request(failure))
            }
        }
    }

    /// Send the request and decode the JSON response body.
    pub async fn send_json<T: DeserializeOwned>(self) -> Result<T> {
        let path = self.path.clone();
        let response = self.send().await?;
        response.json().map_err(|err| Error::decode(path, err))
    }

    /// Like [`send_json`](Self::send_json), but a `204 No Content` or an
    /// empty body yields `None`.
    pub async fn send_optional_json<T: DeserializeOwned>(self) -> Result<Option<T>> {
        let path = self.path.clone();
        let response = self.send().await?;
        if response.is_no_content() || response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        response
            .json()
            .map(Some)
            .map_err(|err| Error::decode(path, err))
    }

    /// Send the request and ignore the response body.
    pub async fn send_empty(self) -> Result<()> {
        self.send().await.map(drop)
    }

    fn build(&self) -> Result<HttpRequest> {
        let mut url = self.client.endpoint(&self.path)?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        let mut request = HttpRequest::new(self.method.clone(), url.as_str())
            .with_header("Accept", "application/json");

        for (name, value) in self.client.default_headers() {
            let value = value
                .to_str()
                .map_err(|_| Error::InvalidHeaderValue(name.to_string()))?;
            request = request.with_header(name.as_str(), value);
        }

        if let Some(credentials) = self.client.credentials() {
            request = request.with_header("Authorization", credentials.authorization());
        }

        if let Some(body) = &self.body {
            request = request
                .with_header("Content-Type", "application/json")
                .with_body(body.clone());
        }

        Ok(request)
    }
}
