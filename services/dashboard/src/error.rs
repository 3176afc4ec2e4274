//! Custom error types for the dashboard service

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::ValidationErrors;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Custom error type for the dashboard actions
#[derive(Error, Debug)]
pub enum ActionError {
    /// Form rejected before reaching the backend
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Body missing, not JSON, or not shaped like the form
    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ActionError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation failed",
                json!(errors.to_map()),
            ),
            ActionError::Body(rejection) => {
                warn!("Rejected request body: {}", rejection.body_text());
                (rejection.status(), "Invalid request body", json!({}))
            }
        };

        let body = Json(json!({
            "success": false,
            "message": message,
            "errors": errors,
        }));

        (status, body).into_response()
    }
}

/// Type alias for action results
pub type ActionResult<T> = Result<T, ActionError>;
