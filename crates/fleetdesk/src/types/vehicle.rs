use super::Id;
use serde::{Deserialize, Serialize};

/// A vehicle of the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Identifier
    pub id: Id,
    /// Manufacturer
    pub brand: String,
    /// Model name
    pub model: String,
}

/// Payload for creating a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVehicle {
    /// Manufacturer
    pub brand: String,
    /// Model name
    pub model: String,
}

/// Partial update of a vehicle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehiclePatch {
    /// New manufacturer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// New model name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}
