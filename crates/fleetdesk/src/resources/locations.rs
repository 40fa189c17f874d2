//! Transport locations endpoint

use super::{Resource, crud};
use crate::client::Client;
use crate::error::Result;
use crate::pagination::{ListParams, Page};
use crate::types::{Id, LocationPatch, NewTransportLocation, TransportLocation};

/// Transport locations resource, under `/v1/admin/transport-locations`.
///
/// The server may expand `category` and `vehicle` in its answers; both are
/// optional on [`TransportLocation`].
#[derive(Debug, Clone)]
pub struct Locations {
    client: Client,
}

impl Locations {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn item(&self, id: Id) -> String {
        format!("{}/{id}", self.path())
    }

    /// List one page.
    pub async fn list(&self, params: ListParams) -> Result<Page<TransportLocation>> {
        crud::list(&self.client, &self.path(), &params).await
    }

    /// Fetch one by id.
    pub async fn get(&self, id: Id) -> Result<TransportLocation> {
        crud::get(&self.client, &self.item(id)).await
    }

    /// Create a location. Unset references are sent as `null`.
    pub async fn create(&self, input: &NewTransportLocation) -> Result<TransportLocation> {
        crud::create(&self.client, &self.path(), input).await
    }

    /// Apply a partial update. `None` when the server answers 204.
    pub async fn update(&self, id: Id, patch: &LocationPatch) -> Result<Option<TransportLocation>> {
        crud::update(&self.client, &self.path(), id, patch).await
    }

    /// Delete by id.
    pub async fn delete(&self, id: Id) -> Result<()> {
        crud::delete(&self.client, &self.item(id)).await
    }
}

impl Resource for Locations {
    fn client(&self) -> &Client {
        &self.client
    }

    fn path(&self) -> String {
        crud::collection("transport-locations")
    }
}
