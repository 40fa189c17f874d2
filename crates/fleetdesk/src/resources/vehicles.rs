//! Vehicles endpoint

use super::{Resource, crud};
use crate::client::Client;
use crate::error::Result;
use crate::pagination::{ListParams, Page};
use crate::types::{Id, NewVehicle, Vehicle, VehiclePatch};

/// Vehicles resource, under `/v1/admin/vehicles`.
#[derive(Debug, Clone)]
pub struct Vehicles {
    client: Client,
}

impl Vehicles {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn item(&self, id: Id) -> String {
        format!("{}/{id}", self.path())
    }

    /// List one page.
    pub async fn list(&self, params: ListParams) -> Result<Page<Vehicle>> {
        crud::list(&self.client, &self.path(), &params).await
    }

    /// Fetch one by id.
    pub async fn get(&self, id: Id) -> Result<Vehicle> {
        crud::get(&self.client, &self.item(id)).await
    }

    /// Register a vehicle.
    pub async fn create(&self, input: &NewVehicle) -> Result<Vehicle> {
        crud::create(&self.client, &self.path(), input).await
    }

    /// Update brand or model. `None` when the server answers 204.
    pub async fn update(&self, id: Id, patch: &VehiclePatch) -> Result<Option<Vehicle>> {
        crud::update(&self.client, &self.path(), id, patch).await
    }

    /// Delete by id.
    pub async fn delete(&self, id: Id) -> Result<()> {
        crud::delete(&self.client, &self.item(id)).await
    }
}

impl Resource for Vehicles {
    fn client(&self) -> &Client {
        &self.client
    }

    fn path(&self) -> String {
        crud::collection("vehicles")
    }
}
