use super::{Category, Id, Vehicle};
use serde::{Deserialize, Serialize};

/// A place where a vehicle of some category can be picked up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportLocation {
    /// Identifier
    pub id: Id,
    /// Category reference
    #[serde(default)]
    pub category_id: Option<Id>,
    /// Vehicle reference
    #[serde(default)]
    pub vehicle_id: Option<Id>,
    /// Street address
    #[serde(default)]
    pub address: Option<String>,
    /// Latitude in degrees
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in degrees
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Expanded category, when the server includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Expanded vehicle, when the server includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<Vehicle>,
}

impl TransportLocation {
    /// `(latitude, longitude)` when both are known.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Payload for creating a transport location.
///
/// Unset references are sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransportLocation {
    /// Category reference
    pub category_id: Option<Id>,
    /// Vehicle reference
    pub vehicle_id: Option<Id>,
    /// Street address
    pub address: Option<String>,
    /// Latitude in degrees
    pub latitude: Option<f64>,
    /// Longitude in degrees
    pub longitude: Option<f64>,
}

/// Partial update of a transport location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPatch {
    /// New category reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Id>,
    /// New vehicle reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<Id>,
    /// New street address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// New latitude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// New longitude
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}
