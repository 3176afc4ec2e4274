//! Session core models

pub mod payloads;
pub mod session;
pub mod user;

// Re-export for convenience
pub use payloads::{
    ErrorBody, LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse,
    RegistrationForm,
};
pub use session::{Session, SessionState};
pub use user::{LoginUser, UserProfile};
