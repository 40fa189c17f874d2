//! Favorites endpoint

use super::{Resource, crud};
use crate::client::Client;
use crate::error::Result;
use crate::pagination::{ListParams, Page};
use crate::types::{Favorite, Id, NewFavorite};

/// Favorites resource, under `/v1/admin/favorites`.
///
/// A favorite links a user to a transport location and is addressed by that
/// pair. There is no partial update.
#[derive(Debug, Clone)]
pub struct Favorites {
    client: Client,
}

impl Favorites {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn item(&self, user_id: Id, transport_location_id: Id) -> String {
        format!("{}/{user_id}/{transport_location_id}", self.path())
    }

    /// List one page.
    pub async fn list(&self, params: ListParams) -> Result<Page<Favorite>> {
        crud::list(&self.client, &self.path(), &params).await
    }

    /// Fetch the favorite linking `user_id` to `transport_location_id`.
    pub async fn get(&self, user_id: Id, transport_location_id: Id) -> Result<Favorite> {
        crud::get(&self.client, &self.item(user_id, transport_location_id)).await
    }

    /// Mark a location as a user's favorite.
    pub async fn create(&self, input: &NewFavorite) -> Result<Favorite> {
        crud::create(&self.client, &self.path(), input).await
    }

    /// Remove a favorite.
    pub async fn delete(&self, user_id: Id, transport_location_id: Id) -> Result<()> {
        crud::delete(&self.client, &self.item(user_id, transport_location_id)).await
    }
}

impl Resource for Favorites {
    fn client(&self) -> &Client {
        &self.client
    }

    fn path(&self) -> String {
        crud::collection("favorites")
    }
}
