//! Project actions

use auth::{AuthorizedFetcher, FetchRequest, SessionReader};
use tracing::warn;

use super::to_body;
use crate::{
    forms::ProjectPayload,
    models::{ActionResponse, CountResponse, ProjectStats, extract_list},
};

const FETCH_PROJECTS_FAILED: &str = "Failed to fetch projects";
const FETCH_PROJECT_FAILED: &str = "Failed to fetch project";
const CREATE_PROJECT_FAILED: &str = "Failed to create project";
const UPDATE_PROJECT_FAILED: &str = "Failed to update project";
const DELETE_PROJECT_FAILED: &str = "Failed to delete project";

/// All projects visible to the session
pub async fn list<R: SessionReader>(fetcher: &AuthorizedFetcher<R>) -> ActionResponse {
    let result = fetcher
        .call(FetchRequest::get("/projects").with_failure_message(FETCH_PROJECTS_FAILED))
        .await
        .map(|data| extract_list(data, "projects"));

    ActionResponse::from_result(result, "projects", FETCH_PROJECTS_FAILED)
}

pub async fn get<R: SessionReader>(fetcher: &AuthorizedFetcher<R>, id: i64) -> ActionResponse {
    let result = fetcher
        .call(
            FetchRequest::get(format!("/projects/{}", id))
                .with_failure_message(FETCH_PROJECT_FAILED),
        )
        .await;

    ActionResponse::from_result(result, "project", FETCH_PROJECT_FAILED)
}

pub async fn create<R: SessionReader>(
    fetcher: &AuthorizedFetcher<R>,
    payload: &ProjectPayload,
) -> ActionResponse {
    let body = match to_body(payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let result = fetcher
        .call(FetchRequest::post("/projects/", body).with_failure_message(CREATE_PROJECT_FAILED))
        .await;

    ActionResponse::from_result(result, "project", CREATE_PROJECT_FAILED)
}

pub async fn update<R: SessionReader>(
    fetcher: &AuthorizedFetcher<R>,
    id: i64,
    payload: &ProjectPayload,
) -> ActionResponse {
    let body = match to_body(payload) {
        Ok(body) => body,
        Err(response) => return response,
    };

    let result = fetcher
        .call(
            FetchRequest::put(format!("/projects/{}", id), body)
                .with_failure_message(UPDATE_PROJECT_FAILED),
        )
        .await;

    ActionResponse::from_result(result, "project", UPDATE_PROJECT_FAILED)
}

pub async fn delete<R: SessionReader>(fetcher: &AuthorizedFetcher<R>, id: i64) -> ActionResponse {
    let result = fetcher
        .call(
            FetchRequest::delete(format!("/projects/{}", id))
                .with_failure_message(DELETE_PROJECT_FAILED),
        )
        .await
        .map(|_| ());

    ActionResponse::from_outcome(result, DELETE_PROJECT_FAILED)
}

/// Number of projects, 0 on any failure
pub async fn count<R: SessionReader>(fetcher: &AuthorizedFetcher<R>) -> u64 {
    let result = fetcher
        .call_json::<CountResponse>(
            FetchRequest::get("/projects/count")
                .with_failure_message("Failed to fetch project count"),
        )
        .await;

    if let Some(message) = result.error_message() {
        warn!("Error fetching project count: {}", message);
    }
    result.ok().map(|body| body.count).unwrap_or_default()
}

/// Totals per status, zeros on any failure
pub async fn stats<R: SessionReader>(fetcher: &AuthorizedFetcher<R>) -> ProjectStats {
    let result = fetcher
        .call_json::<ProjectStats>(
            FetchRequest::get("/projects/stats")
                .with_failure_message("Failed to fetch project stats"),
        )
        .await;

    if let Some(message) = result.error_message() {
        warn!("Error fetching project stats: {}", message);
    }
    result.ok().unwrap_or_default()
}
