use super::Id;
use serde::{Deserialize, Serialize};

/// A back-office user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier
    pub id: Id,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Login email
    pub email: String,
    /// Only present in some responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Administrative rights
    #[serde(default)]
    pub is_admin: bool,
}

impl User {
    /// "First Last", for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload for creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Login email
    pub email: String,
    /// Initial password
    pub password: String,
    /// Administrative rights
    pub is_admin: bool,
}

/// Partial update of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    /// New first name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New last name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// New email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// New administrative rights
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}
