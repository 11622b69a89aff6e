//! User identity as returned by `/auth/me`

use serde::{Deserialize, Serialize};

/// The signed-in user. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub greet_name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub created_at: String,
}

impl User {
    /// Name for headers and avatars, falling back to the email
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if !name.is_empty() {
            name
        } else if !self.email.is_empty() {
            &self.email
        } else {
            "User"
        }
    }
}
