//! Session model and related functionality

use serde::Serialize;

use super::UserProfile;

/// Authenticated state of one browser client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Short-lived bearer credential sent on every authorized call
    #[serde(skip_serializing)]
    pub access_token: String,
    /// Longer-lived credential exchanged for new access tokens
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub profile: UserProfile,
}

impl Session {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        profile: UserProfile,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: Some(refresh_token.into()),
            profile,
        }
    }
}

/// Where the session client currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
    /// A refresh call is in flight
    Refreshing,
}
