//! Signed-in user and profile records.

use serde::{Deserialize, Serialize};

use super::id_from_string_or_number;

/// The session user persisted on the device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Bearer token, when the backend issues one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl User {
    /// First name for greetings ("Olá, Dolores").
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

/// Full profile from `users/{id}`; `created_at` must be echoed on update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub created_at: Option<String>,
}
