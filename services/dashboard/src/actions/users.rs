//! User roster, visible to administrators only
//!
//! The backend answers 403 for anyone else. The list action reports that
//! as an admin error; the panel view hides itself entirely.

use auth::{AdminGate, AuthResult, AuthorizedFetcher, FetchRequest, PanelState, SessionReader};
use serde::Serialize;

use crate::models::{ActionResponse, UserRow, UserSummary};

pub const ADMIN_REQUIRED_MESSAGE: &str = "Admin privileges required";
const FETCH_USERS_FAILED: &str = "Failed to fetch users";

fn roster_request() -> FetchRequest {
    FetchRequest::get("/auth/users").with_failure_message(FETCH_USERS_FAILED)
}

pub async fn list<R: SessionReader>(fetcher: &AuthorizedFetcher<R>) -> ActionResponse {
    match fetcher.call(roster_request()).await {
        AuthResult::Forbidden => ActionResponse {
            is_admin_error: true,
            ..ActionResponse::failure(ADMIN_REQUIRED_MESSAGE)
        },
        other => ActionResponse::from_result(other, "users", FETCH_USERS_FAILED),
    }
}

/// Users table as rendered on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsersPanel {
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<PanelState<Vec<UserSummary>>> for UsersPanel {
    fn from(state: PanelState<Vec<UserSummary>>) -> Self {
        match state {
            PanelState::Hidden => Self {
                visible: false,
                users: None,
                error: None,
            },
            PanelState::Ready(users) => Self {
                visible: true,
                users: Some(users.iter().map(UserRow::from).collect()),
                error: None,
            },
            PanelState::Failed { message } => Self {
                visible: true,
                users: None,
                error: Some(message),
            },
        }
    }
}

pub async fn panel<R: SessionReader>(fetcher: &AuthorizedFetcher<R>) -> UsersPanel {
    let result = fetcher
        .call_json::<Vec<UserSummary>>(roster_request())
        .await;

    AdminGate::evaluate(result).into()
}
