//! Data models for the dashboard actions

use auth::{
    AuthResult,
    models::{Session, UserProfile},
    result::NOT_AUTHENTICATED_MESSAGE,
};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::error;

/// JSON envelope returned by every action endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "isAdminError", skip_serializing_if = "std::ops::Not::not")]
    pub is_admin_error: bool,
    #[serde(flatten)]
    pub data: Map<String, Value>,
}

impl ActionResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            is_admin_error: false,
            data: Map::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            is_admin_error: false,
            data: Map::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach `value` under `key`
    pub fn with<T: Serialize>(mut self, key: &str, value: T) -> Self {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to encode {}: {}", key, e);
                Value::Null
            }
        };
        self.data.insert(key.to_string(), value);
        self
    }

    /// Envelope for a resource action. A 403 on an ordinary resource
    /// reads as the action's generic failure.
    pub fn from_result<T: Serialize>(
        result: AuthResult<T>,
        key: &str,
        failure_message: &str,
    ) -> Self {
        match result {
            AuthResult::Ok(value) => Self::ok().with(key, value),
            other => Self::from_failure(other, failure_message),
        }
    }

    /// Envelope for an action without a payload
    pub fn from_outcome(result: AuthResult<()>, failure_message: &str) -> Self {
        match result {
            AuthResult::Ok(()) => Self::ok(),
            other => Self::from_failure(other, failure_message),
        }
    }

    fn from_failure<T>(result: AuthResult<T>, failure_message: &str) -> Self {
        match result {
            AuthResult::Unauthenticated => Self::failure(NOT_AUTHENTICATED_MESSAGE),
            AuthResult::NetworkOrServerError { message } => Self::failure(message),
            AuthResult::Forbidden | AuthResult::Ok(_) => Self::failure(failure_message),
        }
    }
}

/// Items of a list response that is either a bare array or an object
/// holding the array under `key`
pub fn extract_list(data: Value, key: &str) -> Vec<Value> {
    match data {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove(key) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Login form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Project totals per status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectStats {
    pub total: u64,
    pub active: u64,
    pub on_hold: u64,
    pub completed: u64,
    pub archived: u64,
    pub cancelled: u64,
}

/// Task totals per status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskStats {
    pub total: u64,
    pub completed: u64,
    pub in_progress: u64,
    pub overdue: u64,
    pub todo: u64,
}

/// Response of `/projects/count`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountResponse {
    #[serde(default)]
    pub count: u64,
}

/// Stored session as exposed to the pages
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub user: Option<UserProfile>,
    pub authenticated: bool,
}

impl From<Option<Session>> for SessionView {
    fn from(session: Option<Session>) -> Self {
        Self {
            authenticated: session.is_some(),
            user: session.map(|session| session.profile),
        }
    }
}

/// One row of the backend user roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub date_joined: Option<String>,
}

fn default_role() -> String {
    auth::models::user::DEFAULT_ROLE.to_string()
}

/// Roster row as the users panel renders it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub role_label: &'static str,
    pub joined: String,
}

impl From<&UserSummary> for UserRow {
    fn from(user: &UserSummary) -> Self {
        let name = format!("{} {}", user.first_name, user.last_name)
            .trim()
            .to_string();

        Self {
            id: user.id,
            name,
            username: format!("@{}", user.username),
            email: user.email.clone(),
            role_label: role_label(&user.role),
            joined: format_joined_date(user.date_joined.as_deref()),
        }
    }
}

pub fn role_label(role: &str) -> &'static str {
    if role == auth::models::user::ADMIN_ROLE {
        "Administrator"
    } else {
        "Standard User"
    }
}

/// "Mar 1, 2024", or "-" when missing or unparseable
pub fn format_joined_date(date: Option<&str>) -> String {
    let Some(date) = date.filter(|d| !d.is_empty()) else {
        return "-".to_string();
    };

    let parsed = DateTime::parse_from_rfc3339(date)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(date, "%Y-%m-%d"));

    match parsed {
        Ok(day) => day.format("%b %-d, %Y").to_string(),
        Err(_) => "-".to_string(),
    }
}
