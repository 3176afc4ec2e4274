//! Stub backend shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::models::UserProfile;
use auth::transport::{ApiRequest, ApiResponse, ApiTransport, TransportError};
use reqwest::StatusCode;
use serde_json::Value;

enum Reply {
    Json(StatusCode, Value),
    Raw(StatusCode, String),
    Fail(String),
}

/// Replays canned responses in order and records every request
#[derive(Default)]
pub struct StubTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: StatusCode, body: Value) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Json(status, body));
        self
    }

    pub fn respond_raw(self, status: StatusCode, body: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Raw(status, body.to_string()));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Fail(message.to_string()));
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
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
impl ApiTransport for StubTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().unwrap().push(request);

        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Json(status, body)) => Ok(ApiResponse::json_body(status, &body)),
            Some(Reply::Raw(status, body)) => Ok(ApiResponse::new(status, body)),
            Some(Reply::Fail(message)) => Err(TransportError::Connection(message)),
            None => Err(TransportError::Connection("no stubbed reply".to_string())),
        }
    }
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
