//! Integration tests for bearer-authenticated calls and admin gating

mod support;

use std::sync::Arc;

use auth::{
    AdminGate, AuthResult, AuthorizedFetcher, FetchRequest, MemoryFieldStore, PanelState,
    SessionClient, SessionRepository, TokenStore,
};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use support::{StubTransport, profile};

fn fetcher_with(
    transport: StubTransport,
    logged_in: bool,
) -> (AuthorizedFetcher<TokenStore<MemoryFieldStore>>, Arc<StubTransport>) {
    let store = Arc::new(TokenStore::in_memory());
    if logged_in {
        store.set("AT1", "RT1", &profile());
    }
    let transport = Arc::new(transport);
    (AuthorizedFetcher::new(store, transport.clone()), transport)
}

#[tokio::test]
async fn test_call_without_token_skips_transport() {
    let (fetcher, transport) = fetcher_with(StubTransport::new(), false);

    let result = fetcher.call(FetchRequest::get("/tasks")).await;
    assert_eq!(result, AuthResult::Unauthenticated);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_call_attaches_bearer_and_returns_body() {
    let (fetcher, transport) = fetcher_with(
        StubTransport::new().respond(StatusCode::CREATED, json!({"id": 9, "name": "Launch"})),
        true,
    );

    let result = fetcher
        .call(FetchRequest::post("/projects/", json!({"name": "Launch"})))
        .await;
    assert_eq!(result, AuthResult::Ok(json!({"id": 9, "name": "Launch"})));

    let request = transport.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/projects/");
    assert_eq!(request.bearer.as_deref(), Some("AT1"));
    assert_eq!(request.body, Some(json!({"name": "Launch"})));
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let (fetcher, _) = fetcher_with(
        StubTransport::new().respond_raw(StatusCode::NO_CONTENT, ""),
        true,
    );

    let result = fetcher.call(FetchRequest::delete("/tasks/3")).await;
    assert_eq!(result, AuthResult::Ok(Value::Null));
}

#[tokio::test]
async fn test_status_classification() {
    let (fetcher, _) = fetcher_with(
        StubTransport::new()
            .respond(StatusCode::FORBIDDEN, json!({"error": "Admin privileges required"}))
            .respond(StatusCode::UNAUTHORIZED, json!({"error": "Invalid access token"}))
            .respond(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": "boom"})),
        true,
    );
    let request = || FetchRequest::get("/tasks").with_failure_message("Failed to fetch tasks");

    assert_eq!(fetcher.call(request()).await, AuthResult::Forbidden);

    // 401 is not singled out, and the raw server message is not exposed
    let result = fetcher.call(request()).await;
    assert_eq!(result.error_message(), Some("Failed to fetch tasks"));

    let result = fetcher.call(request()).await;
    assert_eq!(result.error_message(), Some("Failed to fetch tasks"));
}

#[tokio::test]
async fn test_transport_failure_is_classified() {
    let (fetcher, _) = fetcher_with(StubTransport::new().fail("connection refused"), true);

    let result = fetcher.call(FetchRequest::get("/projects")).await;
    assert_eq!(result.error_message(), Some("connection refused"));
}

#[derive(Debug, Deserialize, PartialEq)]
struct Count {
    count: u64,
}

#[tokio::test]
async fn test_call_json_decodes_payload() {
    let (fetcher, _) = fetcher_with(
        StubTransport::new()
            .respond(StatusCode::OK, json!({"count": 4}))
            .respond(StatusCode::OK, json!({"total": 4})),
        true,
    );
    let request =
        || FetchRequest::get("/projects/count").with_failure_message("Failed to fetch project count");

    assert_eq!(
        fetcher.call_json::<Count>(request()).await,
        AuthResult::Ok(Count { count: 4 })
    );
    assert_eq!(
        fetcher.call_json::<Count>(request()).await.error_message(),
        Some("Failed to fetch project count")
    );
}

#[tokio::test]
async fn test_forbidden_roster_hides_admin_panel() {
    let store = Arc::new(TokenStore::in_memory());
    let transport = Arc::new(
        StubTransport::new()
            .respond(
                StatusCode::OK,
                json!({
                    "access_token": "AT1",
                    "refresh_token": "RT1",
                    "user": {"id": 1, "username": "a", "role": "user"}
                }),
            )
            .respond(StatusCode::FORBIDDEN, json!({"error": "Admin privileges required"})),
    );
    let client = SessionClient::new(Arc::clone(&store), transport.clone());
    let fetcher = AuthorizedFetcher::new(Arc::clone(&store), transport.clone());

    assert!(client.login("a@b.com", "x").await.is_ok());

    let result = fetcher
        .call(FetchRequest::get("/auth/users").with_failure_message("Failed to fetch users"))
        .await;
    assert!(!AdminGate::should_show_privileged_panel(&result));
    assert_eq!(AdminGate::evaluate(result), PanelState::Hidden);
    assert_eq!(transport.last_request().bearer.as_deref(), Some("AT1"));
}
