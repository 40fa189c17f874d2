//! Categories endpoint

use super::{Resource, crud};
use crate::client::Client;
use crate::error::Result;
use crate::pagination::{ListParams, Page};
use crate::types::{Category, CategoryPatch, Id, NewCategory};

/// Transport categories, under `/v1/admin/categories`.
#[derive(Debug, Clone)]
pub struct Categories {
    client: Client,
}

impl Categories {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn item(&self, id: Id) -> String {
        format!("{}/{id}", self.path())
    }

    /// List one page.
    pub async fn list(&self, params: ListParams) -> Result<Page<Category>> {
        crud::list(&self.client, &self.path(), &params).await
    }

    /// Fetch one by id.
    pub async fn get(&self, id: Id) -> Result<Category> {
        crud::get(&self.client, &self.item(id)).await
    }

    /// Create and return the stored entity.
    pub async fn create(&self, input: &NewCategory) -> Result<Category> {
        crud::create(&self.client, &self.path(), input).await
    }

    /// Apply a partial update. `None` when the server answers 204.
    pub async fn update(&self, id: Id, patch: &CategoryPatch) -> Result<Option<Category>> {
        crud::update(&self.client, &self.path(), id, patch).await
    }

    /// Delete by id.
    ///
    /// Locations still referencing the category may make the server refuse
    /// with 409.
    pub async fn delete(&self, id: Id) -> Result<()> {
        crud::delete(&self.client, &self.item(id)).await
    }
}

impl Resource for Categories {
    fn client(&self) -> &Client {
        &self.client
    }

    fn path(&self) -> String {
        crud::collection("categories")
    }
}
