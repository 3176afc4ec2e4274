//! Outcome type returned by every session and authorized-call operation

/// Message shown when an action needs a session and there is none
pub const NOT_AUTHENTICATED_MESSAGE: &str = "Not authenticated";

/// Classified outcome of an auth-related operation.
///
/// Operations never return `Err` or panic across the crate boundary; every
/// failure lands in one of these variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult<T> {
    Ok(T),
    /// No credential, or the credential was rejected
    Unauthenticated,
    /// Valid credential without the required privilege
    Forbidden,
    /// Transport failure or unexpected backend response
    NetworkOrServerError { message: String },
}

impl<T> AuthResult<T> {
    pub fn server_error(message: impl Into<String>) -> Self {
        AuthResult::NetworkOrServerError {
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, AuthResult::Ok(_))
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, AuthResult::Forbidden)
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, AuthResult::Unauthenticated)
    }

    /// The payload, discarding the failure kind
    pub fn ok(self) -> Option<T> {
        match self {
            AuthResult::Ok(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> AuthResult<U> {
        match self {
            AuthResult::Ok(value) => AuthResult::Ok(f(value)),
            AuthResult::Unauthenticated => AuthResult::Unauthenticated,
            AuthResult::Forbidden => AuthResult::Forbidden,
            AuthResult::NetworkOrServerError { message } => {
                AuthResult::NetworkOrServerError { message }
            }
        }
    }

    /// Chain a fallible step on the payload
    pub fn and_then<U, F: FnOnce(T) -> AuthResult<U>>(self, f: F) -> AuthResult<U> {
        match self {
            AuthResult::Ok(value) => f(value),
            AuthResult::Unauthenticated => AuthResult::Unauthenticated,
            AuthResult::Forbidden => AuthResult::Forbidden,
            AuthResult::NetworkOrServerError { message } => {
                AuthResult::NetworkOrServerError { message }
            }
        }
    }

    /// The server or transport message, when there is one
    pub fn error_message(&self) -> Option<&str> {
        match self {
            AuthResult::NetworkOrServerError { message } => Some(message),
            _ => None,
        }
    }
}
