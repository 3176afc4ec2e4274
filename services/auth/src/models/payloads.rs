//! Request and response bodies of the backend auth endpoints

use serde::{Deserialize, Serialize};

use super::LoginUser;

/// Request for user login
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response for user login
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub user: Option<LoginUser>,
}

/// Request for token refresh
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest<'a> {
    pub refresh_token: &'a str,
}

/// Response for token refresh
#[derive(Debug, Deserialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
}

/// Fields of the registration form, forwarded verbatim to the backend.
///
/// Missing fields deserialize as empty so validation can report them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
}

/// Error body of a failed backend call
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}
