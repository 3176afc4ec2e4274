//! Session core for the task dashboard
//!
//! Stores the access/refresh token pair and the user profile, drives
//! login, registration, logout and refresh against the backend, attaches
//! the bearer credential to API calls and decides whether privileged
//! panels are shown.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use auth::{AuthResult, SessionClient, TokenStore, transport::HttpTransport};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(TokenStore::in_memory());
//! let transport = Arc::new(HttpTransport::new("http://localhost:8000/api", None)?);
//! let client = SessionClient::new(store, transport);
//!
//! if let AuthResult::Ok(session) = client.login("a@b.com", "secret").await {
//!     println!("Signed in as {}", session.profile.display_name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod fetcher;
pub mod models;
pub mod result;
pub mod session;
pub mod store;
pub mod transport;
pub mod validation;

pub use admin::{AdminGate, PanelState};
pub use fetcher::{AuthorizedFetcher, FetchRequest};
pub use result::AuthResult;
pub use session::{LogoutRedirect, SessionClient};
pub use store::{
    FieldStore, FieldVisibility, MemoryFieldStore, SecureField, SessionReader,
    SessionRepository, StoragePolicy, TokenStore,
};
