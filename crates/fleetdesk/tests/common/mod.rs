//! Common test utilities and helpers

use async_trait::async_trait;
use fleetdesk::{Client, ClientConfig, RetryPolicy};
use fleetdesk_transport::{HttpRequest, HttpResponse, Transport, TransportError};
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::MockServer;

/// Load a response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    })
}

/// Create a test session token
#[allow(dead_code)]
pub fn test_token() -> String {
    "test-session-token-0123456789".to_string()
}

/// Retry policy with millisecond delays so real-clock tests stay fast
#[allow(dead_code)]
pub fn fast_retry_policy() -> RetryPolicy {
    RetryPolicy::builder()
        .max_retries(3)
        .base_delay(Duration::from_millis(1))
        .build()
}

/// Authenticated client pointing at a mock server
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .base_url(server.uri())
        .token(test_token())
        .retry_policy(fast_retry_policy())
        .build()
        .expect("Failed to build client")
}

/// Transport replaying a fixed script of outcomes, one per attempt.
///
/// Once the script runs out every attempt fails with a connection error.
#[allow(dead_code)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    pub fn new(
        script: impl IntoIterator<Item = Result<HttpResponse, TransportError>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn attempts(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send_http(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connection("script exhausted".into())))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// A scripted JSON response
#[allow(dead_code)]
pub fn respond(status: u16, body: serde_json::Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::new(
        status,
        HashMap::new(),
        serde_json::to_vec(&body).unwrap(),
    ))
}

/// Client on top of a scripted transport with the given policy
#[allow(dead_code)]
pub fn scripted_client(transport: Arc<ScriptedTransport>, policy: RetryPolicy) -> Client {
    let config = ClientConfig::builder()
        .base_url("http://fleet.test")
        .token(test_token())
        .retry_policy(policy)
        .build();
    Client::from_transport(transport, config).expect("Failed to build client")
}
