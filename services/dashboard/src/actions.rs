//! Server actions backing the dashboard pages
//!
//! Each action makes one authorized call through the session's fetcher and
//! folds the outcome into an [`ActionResponse`](crate::models::ActionResponse).
//! Summary actions (counts, stats, recent items) never fail: they fall back
//! to empty values so the overview page always renders.

pub mod projects;
pub mod tasks;
pub mod users;

use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::models::ActionResponse;

/// JSON body for an outbound call, or the envelope to answer with instead
fn to_body<T: Serialize>(payload: &T) -> Result<Value, ActionResponse> {
    serde_json::to_value(payload).map_err(|e| {
        error!("Failed to encode request body: {}", e);
        ActionResponse::failure(e.to_string())
    })
}
