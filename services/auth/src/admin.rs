//! Visibility of privileged panels
//!
//! Privilege is inferred from the outcome of the panel's own data call:
//! there is no separate role check. A 403 means "not for this session" and
//! hides the panel silently, so its existence is not advertised.

use crate::result::{AuthResult, NOT_AUTHENTICATED_MESSAGE};

/// What a privileged panel renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState<T> {
    /// Render nothing, not even an error
    Hidden,
    Ready(T),
    /// Render the panel's generic error display
    Failed { message: String },
}

impl<T> PanelState<T> {
    pub fn is_visible(&self) -> bool {
        !matches!(self, PanelState::Hidden)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            PanelState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

pub struct AdminGate;

impl AdminGate {
    /// False only when the data call was forbidden
    pub fn should_show_privileged_panel<T>(result: &AuthResult<T>) -> bool {
        !result.is_forbidden()
    }

    pub fn evaluate<T>(result: AuthResult<T>) -> PanelState<T> {
        match result {
            AuthResult::Ok(data) => PanelState::Ready(data),
            AuthResult::Forbidden => PanelState::Hidden,
            AuthResult::Unauthenticated => PanelState::Failed {
                message: NOT_AUTHENTICATED_MESSAGE.to_string(),
            },
            AuthResult::NetworkOrServerError { message } => PanelState::Failed { message },
        }
    }
}
