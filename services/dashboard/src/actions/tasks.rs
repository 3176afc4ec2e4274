//! Task actions

use auth::{AuthorizedFetcher, FetchRequest, SessionReader};
use serde_json::{Value, json};
use tracing::warn;

use super::to_body;
use crate::{
    forms::{TaskPayload, TaskStatus},
    models::{ActionResponse, TaskStats, extract_list},
};

const FETCH_TASKS_FAILED: &str = "Failed to fetch tasks";
const FETCH_TASK_FAILED: &str = "Failed to fetch task";
const CREATE_TASK_FAILED: &str = "Failed to create task";
const UPDATE_TASK_FAILED: &str = "Failed to update task";
const DELETE_TASK_FAILED: &str = "Failed to delete task";
const UPDATE_STATUS_FAILED: &str = "Failed to update task status";

pub async fn list<R: SessionReader>(fetcher: &AuthorizedFetcher<R>) -> ActionResponse {
    let result = fetcher
        .call(FetchRequest::get("/tasks").with_failure_message(FETCH_TASKS_FAILED))
        .await
        .map(|data| extract_list(data, "tasks"));

    ActionResponse::from_result(result, "tasks", FETCH_TASKS_FAILED)
}

pub async fn get<R: SessionReader>(fetcher: &AuthorizedFetcher<R>, id: i64) -> ActionResponse {
    let result = fetcher
        .call(FetchRequest::get(format!("/tasks/{}", id)).with_failure_message(FETCH_TASK_FAILED))
        .await;

    ActionResponse::from_result(result, "task", FETCH_TASK_FAILED)
}

pub async fn create<R: SessionReader>(
    fetcher: &AuthorizedFetcher<R>,
    payload: &TaskPayload,
) -> ActionResponse {
    let body = match to_body(payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let result = fetcher
        .call(FetchRequest::post("/tasks/", body).with_failure_message(CREATE_TASK_FAILED))
        .await;

    ActionResponse::from_result(result, "task", CREATE_TASK_FAILED)
}

pub async fn update<R: SessionReader>(
    fetcher: &AuthorizedFetcher<R>,
    id: i64,
    payload: &TaskPayload,
) -> ActionResponse {
    let body = match to_body(payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let result = fetcher
        .call(
            FetchRequest::put(format!("/tasks/{}", id), body)
                .with_failure_message(UPDATE_TASK_FAILED),
        )
        .await;

    ActionResponse::from_result(result, "task", UPDATE_TASK_FAILED)
}

/// Move a task to another column of the board
pub async fn update_status<R: SessionReader>(
    fetcher: &AuthorizedFetcher<R>,
    id: i64,
    status: TaskStatus,
) -> ActionResponse {
    let result = fetcher
        .call(
            FetchRequest::patch(format!("/tasks/{}", id), json!({ "status": status }))
                .with_failure_message(UPDATE_STATUS_FAILED),
        )
        .await;

    ActionResponse::from_result(result, "task", UPDATE_STATUS_FAILED)
}

pub async fn delete<R: SessionReader>(fetcher: &AuthorizedFetcher<R>, id: i64) -> ActionResponse {
    let result = fetcher
        .call(
            FetchRequest::delete(format!("/tasks/{}", id))
                .with_failure_message(DELETE_TASK_FAILED),
        )
        .await
        .map(|_| ());

    ActionResponse::from_outcome(result, DELETE_TASK_FAILED)
}

/// Totals per status, zeros on any failure
pub async fn stats<R: SessionReader>(fetcher: &AuthorizedFetcher<R>) -> TaskStats {
    let result = fetcher
        .call_json::<TaskStats>(
            FetchRequest::get("/tasks/stats").with_failure_message("Failed to fetch task stats"),
        )
        .await;

    if let Some(message) = result.error_message() {
        warn!("Error fetching task stats: {}", message);
    }
    result.ok().unwrap_or_default()
}

/// Latest tasks for the overview page, empty on any failure
pub async fn recent<R: SessionReader>(fetcher: &AuthorizedFetcher<R>) -> Vec<Value> {
    let result = fetcher
        .call(FetchRequest::get("/tasks/recent").with_failure_message("Failed to fetch recent tasks"))
        .await;

    if let Some(message) = result.error_message() {
        warn!("Error fetching recent tasks: {}", message);
    }
    result
        .ok()
        .map(|data| extract_list(data, "tasks"))
        .unwrap_or_default()
}
