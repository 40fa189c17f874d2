//! API resource endpoints
//!
//! One handle per REST collection under `/v1/admin`, plus [`Auth`] for
//! login. Handles are cheap to create and hold a clone of the [`Client`].

pub mod auth;
pub mod categories;
pub mod favorites;
pub mod locations;
pub mod users;
pub mod vehicles;

pub use auth::Auth;
pub use categories::Categories;
pub use favorites::Favorites;
pub use locations::Locations;
pub use users::Users;
pub use vehicles::Vehicles;

use crate::client::Client;

/// Base trait for API resources.
pub trait Resource {
    /// Get a reference to the client.
    fn client(&self) -> &Client;

    /// Collection path relative to the base URL.
    fn path(&self) -> String;
}

/// Shared request shapes of the CRUD collections.
pub(crate) mod crud {
    use crate::API_PREFIX;
    use crate::client::Client;
    use crate::error::{Error, Result};
    use crate::pagination::{ListParams, Page};
    use crate::types::Id;
    use http::Method;
    use serde::Serialize;
    use serde::de::DeserializeOwned;
    use serde_json::Value;

    pub(crate) fn collection(name: &str) -> String {
        format!("{API_PREFIX}/{name}")
    }

    pub(crate) async fn list<T: DeserializeOwned>(
        client: &Client,
        path: &str,
        params: &ListParams,
    ) -> Result<Page<T>> {
        let items: Vec<T> = client
            .request(Method::GET, path)
            .query_pairs(params.query_pairs())
            .send_json()
            .await?;
        Ok(Page::new(items, params))
    }

    pub(crate) async fn get<T: DeserializeOwned>(client: &Client, path: &str) -> Result<T> {
        client.request(Method::GET, path).send_json().await
    }

    pub(crate) async fn create<B, T>(client: &Client, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        client.request(Method::POST, path).json(body)?.send_json().await
    }

    /// `PATCH` the collection with `patch` plus the target `id`.
    ///
    /// A `204 No Content` answer yields `None`.
    pub(crate) async fn update<P, T>(
        client: &Client,
        path: &str,
        id: Id,
        patch: &P,
    ) -> Result<Option<T>>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = with_id(serde_json::to_value(patch)?, id)?;
        client
            .request(Method::PATCH, path)
            .json(&body)?
            .send_optional_json()
            .await
    }

    pub(crate) async fn delete(client: &Client, path: &str) -> Result<()> {
        client.request(Method::DELETE, path).send_empty().await
    }

    pub(crate) fn with_id(body: Value, id: Id) -> Result<Value> {
        match body {
            Value::Object(mut fields) => {
                fields.insert("id".to_string(), Value::from(id));
                Ok(Value::Object(fields))
            }
            other => Err(Error::InvalidRequest(format!(
                "update body must be a JSON object, got {other}"
            ))),
        }
    }

}
