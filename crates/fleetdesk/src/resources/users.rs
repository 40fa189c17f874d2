//! Users endpoint

use super::{Resource, crud};
use crate::client::Client;
use crate::error::Result;
use crate::pagination::{ListParams, Page};
use crate::types::{Id, NewUser, User, UserPatch};

/// Users resource, under `/v1/admin/users`.
///
/// ```rust,no_run
/// # use fleetdesk::{Client, ListParams};
/// # async fn example(client: Client) -> fleetdesk::Result<()> {
/// let admins: Vec<_> = client
///     .users()
///     .list(ListParams::page(1, 20).search("ada"))
///     .await?
///     .into_iter()
///     .filter(|user| user.is_admin)
///     .collect();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Users {
    client: Client,
}

impl Users {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn item(&self, id: Id) -> String {
        format!("{}/{id}", self.path())
    }

    /// List one page of users matching `params`.
    pub async fn list(&self, params: ListParams) -> Result<Page<User>> {
        crud::list(&self.client, &self.path(), &params).await
    }

    /// Fetch one by id.
    pub async fn get(&self, id: Id) -> Result<User> {
        crud::get(&self.client, &self.item(id)).await
    }

    /// Create a user.
    ///
    /// The server answers 409 when the email is already taken.
    pub async fn create(&self, input: &NewUser) -> Result<User> {
        crud::create(&self.client, &self.path(), input).await
    }

    /// Apply a partial update. `None` when the server answers 204.
    pub async fn update(&self, id: Id, patch: &UserPatch) -> Result<Option<User>> {
        crud::update(&self.client, &self.path(), id, patch).await
    }

    /// Delete by id.
    pub async fn delete(&self, id: Id) -> Result<()> {
        crud::delete(&self.client, &self.item(id)).await
    }
}

impl Resource for Users {
    fn client(&self) -> &Client {
        &self.client
    }

    fn path(&self) -> String {
        crud::collection("users")
    }
}
