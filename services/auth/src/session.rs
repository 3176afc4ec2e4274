//! Session lifecycle against the backend auth endpoints

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    models::{
        ErrorBody, LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse,
        RegistrationForm, Session, SessionState,
    },
    result::AuthResult,
    store::SessionRepository,
    transport::{ApiRequest, ApiTransport, TransportError},
};

/// Entry point users are sent to after logging out
pub const LOGIN_PATH: &str = "/login";

pub const REGISTRATION_SUCCESS_MESSAGE: &str =
    "Registration successful. Please log in with your new account.";

/// Where to send the browser once the session is gone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutRedirect {
    pub location: &'static str,
}

/// Session client for logging in and out and keeping the access token fresh
pub struct SessionClient<R> {
    store: Arc<R>,
    transport: Arc<dyn ApiTransport>,
    refreshing: Arc<AtomicUsize>,
}

impl<R> Clone for SessionClient<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            transport: Arc::clone(&self.transport),
            refreshing: Arc::clone(&self.refreshing),
        }
    }
}

impl<R: SessionRepository> SessionClient<R> {
    /// Create a new session client
    pub fn new(store: Arc<R>, transport: Arc<dyn ApiTransport>) -> Self {
        Self {
            store,
            transport,
            refreshing: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn store(&self) -> &Arc<R> {
        &self.store
    }

    pub fn state(&self) -> SessionState {
        if self.refreshing.load(Ordering::SeqCst) > 0 {
            SessionState::Refreshing
        } else if self.store.get().is_some() {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        }
    }

    /// Exchange credentials for a session and persist it.
    ///
    /// A rejected login leaves the store untouched.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<Session> {
        info!("Login attempt for user: {}", email);

        let body = match to_body(&LoginRequest { email, password }) {
            Ok(body) => body,
            Err(e) => return AuthResult::server_error(e.to_string()),
        };

        let response = match self
            .transport
            .send(ApiRequest::post("/auth/login", body))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Login request failed: {}", e);
                return AuthResult::server_error(e.to_string());
            }
        };

        if !response.is_success() {
            warn!("Login rejected for {} with status {}", email, response.status);
            let message = response
                .json::<ErrorBody>()
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "Login failed".to_string());
            return AuthResult::server_error(message);
        }

        let payload: LoginResponse = match response.json() {
            Ok(payload) => payload,
            Err(e) => {
                error!("Failed to decode login response: {}", e);
                return AuthResult::server_error(e.to_string());
            }
        };

        let profile = payload.user.unwrap_or_default().into_profile(email);
        self.store
            .set(&payload.access_token, &payload.refresh_token, &profile);

        info!("User {} logged in", profile.id);
        AuthResult::Ok(Session::new(
            payload.access_token,
            payload.refresh_token,
            profile,
        ))
    }

    /// Create an account. No session is stored; the caller logs in
    /// separately afterwards.
    pub async fn register(&self, form: &RegistrationForm) -> AuthResult<()> {
        info!("Registration attempt for user: {}", form.username);

        let body = match to_body(form) {
            Ok(body) => body,
            Err(e) => return AuthResult::server_error(e.to_string()),
        };

        let response = match self
            .transport
            .send(ApiRequest::post("/auth/register", body))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Registration request failed: {}", e);
                return AuthResult::server_error(e.to_string());
            }
        };

        if !response.is_success() {
            warn!(
                "Registration rejected for {} with status {}",
                form.username, response.status
            );
            let body = response.json::<ErrorBody>().unwrap_or_default();
            let message = body
                .detail
                .or(body.error)
                .unwrap_or_else(|| "Registration failed".to_string());
            return AuthResult::server_error(message);
        }

        AuthResult::Ok(())
    }

    /// Drop the stored session and point the browser at the login page.
    pub fn logout(&self) -> LogoutRedirect {
        info!("Logout request");
        self.store.clear();

        LogoutRedirect {
            location: LOGIN_PATH,
        }
    }

    /// Mint a new access token from the stored refresh token.
    ///
    /// Any failure reads as `Unauthenticated` and leaves the stored tokens
    /// in place; whether to force a logout is up to the caller.
    pub async fn refresh(&self) -> AuthResult<()> {
        let Some(refresh_token) = self.store.refresh_token() else {
            return AuthResult::Unauthenticated;
        };

        info!("Token refresh request");
        let _refreshing = RefreshGuard::enter(&self.refreshing);

        let body = match to_body(&RefreshTokenRequest {
            refresh_token: &refresh_token,
        }) {
            Ok(body) => body,
            Err(_) => return AuthResult::Unauthenticated,
        };

        let response = match self
            .transport
            .send(ApiRequest::post("/auth/refresh", body))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Token refresh request failed: {}", e);
                return AuthResult::Unauthenticated;
            }
        };

        if !response.is_success() {
            warn!("Token refresh rejected with status {}", response.status);
            return AuthResult::Unauthenticated;
        }

        match response.json::<RefreshTokenResponse>() {
            Ok(payload) => {
                self.store.update_access_token(&payload.access_token);
                AuthResult::Ok(())
            }
            Err(e) => {
                error!("Failed to decode refresh response: {}", e);
                AuthResult::Unauthenticated
            }
        }
    }

    /// The stored session, without contacting the backend.
    ///
    /// The access token may have expired since it was stored; that only
    /// shows once an authorized call is made.
    pub fn current_session(&self) -> Option<Session> {
        self.store.get()
    }
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, TransportError> {
    Ok(serde_json::to_value(value)?)
}

/// Marks a refresh as in flight for as long as it lives
struct RefreshGuard<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> RefreshGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}
