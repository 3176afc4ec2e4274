//! User profile model and related functionality

use serde::{Deserialize, Serialize};

/// Role assigned when the backend does not report one
pub const DEFAULT_ROLE: &str = "user";

/// Role name that unlocks privileged panels
pub const ADMIN_ROLE: &str = "admin";

/// Denormalized snapshot of the signed-in user, taken at login time.
///
/// It is not re-validated against the backend on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    /// "First Last", falling back to the username when both are blank
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// User object as returned by the login endpoint.
///
/// Every field is optional on the wire; `into_profile` applies the
/// defaults in one place.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl LoginUser {
    /// Build the stored profile. The email is the one the user signed in
    /// with, not whatever the backend echoes back.
    pub fn into_profile(self, email: &str) -> UserProfile {
        UserProfile {
            id: self.id.unwrap_or(0),
            username: non_empty(self.username).unwrap_or_default(),
            email: email.to_string(),
            first_name: non_empty(self.first_name).unwrap_or_default(),
            last_name: non_empty(self.last_name).unwrap_or_default(),
            role: non_empty(self.role).unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
