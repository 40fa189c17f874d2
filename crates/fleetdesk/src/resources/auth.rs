//! Login and logout

use super::Resource;
use crate::LOGIN_PATH;
use crate::auth::{Credentials, TokenStore};
use crate::client::Client;
use crate::error::{Error, Result};
use http::Method;
use serde::{Deserialize, Serialize};

/// Session endpoint, `POST /v1/auth/login`.
#[derive(Debug, Clone)]
pub struct Auth {
    client: Client,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default, rename = "accessToken")]
    access_token: Option<String>,
}

impl LoginResponse {
    fn into_token(self) -> Option<String> {
        let non_blank = |t: &String| !t.trim().is_empty();
        self.token
            .filter(non_blank)
            .or_else(|| self.access_token.filter(non_blank))
    }
}

impl Auth {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Exchange email and password for a session token.
    ///
    /// The token is read from `token`, falling back to `accessToken`.
    ///
    /// # Errors
    ///
    /// A rejected login surfaces as [`Error::Login`] with the server's
    /// status; an answer without a token is an [`Error::Decode`].
    pub async fn login(&self, email: &str, password: &str) -> Result<Credentials> {
        let response: LoginResponse = self
            .client
            .request(Method::POST, LOGIN_PATH)
            .json(&LoginRequest { email, password })?
            .send_json()
            .await
            .map_err(|err| match err {
                Error::Request(failure) => Error::Login(failure),
                other => other,
            })?;

        let token = response
            .into_token()
            .ok_or_else(|| Error::decode(LOGIN_PATH, "response carries no token"))?;

        tracing::info!(email = %email, "Logged in");
        Ok(Credentials::new(token))
    }

    /// Log in, persist the token in `store` and return an authenticated client.
    pub async fn login_and_store(
        &self,
        email: &str,
        password: &str,
        store: &dyn TokenStore,
    ) -> Result<Client> {
        let credentials = self.login(email, password).await?;
        store.save(&credentials)?;
        Ok(self.client.with_credentials(credentials))
    }

    /// Forget the stored token and return an anonymous client.
    pub fn logout(&self, store: &dyn TokenStore) -> Result<Client> {
        store.clear()?;
        tracing::info!("Logged out");
        Ok(self.client.without_credentials())
    }
}

impl Resource for Auth {
    fn client(&self) -> &Client {
        &self.client
    }

    fn path(&self) -> String {
        LOGIN_PATH.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn token_of(body: serde_json::Value) -> Option<String> {
        serde_json::from_value::<LoginResponse>(body)
            .unwrap()
            .into_token()
    }

    #[test]
    fn test_token_field_preference() {
        assert_eq!(token_of(json!({"token": "a", "accessToken": "b"})).as_deref(), Some("a"));
        assert_eq!(token_of(json!({"accessToken": "b"})).as_deref(), Some("b"));
        assert_eq!(token_of(json!({"token": "", "accessToken": "b"})).as_deref(), Some("b"));
        assert_eq!(token_of(json!({"user": {"id": 1}})), None);
    }
}
