//! Stub backend and request helpers for the router tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use auth::models::UserProfile;
use auth::store::encode_profile;
use auth::transport::{ApiRequest, ApiResponse, ApiTransport, TransportError};
use auth::StoragePolicy;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use dashboard::{AppState, create_router};
use reqwest::StatusCode;
use serde_json::Value;

/// Replays canned JSON responses in order and records every request
#[derive(Default)]
pub struct StubBackend {
    replies: Mutex<VecDeque<(StatusCode, Value)>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: StatusCode, body: Value) -> Self {
        self.replies.lock().unwrap().push_back((status, body));
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl ApiTransport for StubBackend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().unwrap().push(request);

        match self.replies.lock().unwrap().pop_front() {
            Some((status, body)) => Ok(ApiResponse::json_body(status, &body)),
            None => Err(TransportError::Connection("no stubbed reply".to_string())),
        }
    }
}

pub fn app(backend: StubBackend) -> (Router, Arc<StubBackend>) {
    let backend = Arc::new(backend);
    let state = AppState::new(backend.clone(), StoragePolicy::default());
    (create_router(state), backend)
}

pub fn profile() -> UserProfile {
    UserProfile {
        id: 1,
        username: "a".to_string(),
        email: "a@b.com".to_string(),
        first_name: String::new(),
        last_name: String::new(),
        role: "user".to_string(),
    }
}

/// `Cookie` header of a logged-in browser, values percent-encoded as sent
pub fn session_cookies() -> String {
    let user_data = encode_profile(&profile()).unwrap();
    format!(
        "access_token=AT1; refresh_token=RT1; user_data={}",
        urlencoding::encode(&user_data)
    )
}

pub fn get(uri: &str, cookies: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn send_json(method: &str, uri: &str, body: Value, cookies: Option<&str>) -> Request<Body> {
    send_raw(method, uri, &body.to_string(), cookies)
}

/// JSON request whose body is sent verbatim, well-formed or not
pub fn send_raw(method: &str, uri: &str, body: &str, cookies: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

/// The `Set-Cookie` header for `name`
pub fn set_cookie<'a>(cookies: &'a [String], name: &str) -> &'a str {
    let prefix = format!("{}=", name);
    cookies
        .iter()
        .find(|cookie| cookie.starts_with(&prefix))
        .map(String::as_str)
        .unwrap_or_else(|| panic!("no Set-Cookie for {}", name))
}

/// Value of the `Set-Cookie` header for `name`, still percent-encoded
pub fn set_cookie_value<'a>(cookies: &'a [String], name: &str) -> &'a str {
    let cookie = set_cookie(cookies, name);
    let value = &cookie[name.len() + 1..];
    value.split(';').next().unwrap_or(value)
}
