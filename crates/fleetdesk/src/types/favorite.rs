use super::{Id, TransportLocation, User};
use serde::{Deserialize, Serialize};

/// A user's favorite transport location.
///
/// Identified by the `(user_id, transport_location_id)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    /// User reference
    pub user_id: Id,
    /// Location reference
    pub transport_location_id: Id,
    /// Expanded user, when the server includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// Expanded location, when the server includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_location: Option<TransportLocation>,
}

/// Payload for creating a favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
    /// User reference
    pub user_id: Id,
    /// Location reference
    pub transport_location_id: Id,
}
