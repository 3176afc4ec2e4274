//! Bearer-authenticated calls to the backend API
//!
//! Every call reads the current access token, attaches it as a bearer
//! credential and classifies the response into an [`AuthResult`].
//! There is no retry and no refresh-and-retry on 401: a rejected token
//! surfaces as a generic failure and the caller decides what to do.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{error, warn};

use crate::{
    result::AuthResult,
    store::SessionReader,
    transport::{ApiRequest, ApiTransport},
};

const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// One authorized call and the message to show if the backend rejects it
#[derive(Debug, Clone)]
pub struct FetchRequest {
    method: Method,
    path: String,
    body: Option<Value>,
    failure_message: String,
}

impl FetchRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            failure_message: DEFAULT_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PUT, path).with_body(body)
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PATCH, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Message reported for non-2xx responses, e.g. "Failed to fetch tasks"
    pub fn with_failure_message(mut self, message: impl Into<String>) -> Self {
        self.failure_message = message.into();
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn failure_message(&self) -> &str {
        &self.failure_message
    }
}

/// Authorized fetcher over a read-only view of the session
pub struct AuthorizedFetcher<R> {
    store: Arc<R>,
    transport: Arc<dyn ApiTransport>,
}

impl<R> Clone for AuthorizedFetcher<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<R: SessionReader> AuthorizedFetcher<R> {
    /// Create a new authorized fetcher
    pub fn new(store: Arc<R>, transport: Arc<dyn ApiTransport>) -> Self {
        Self { store, transport }
    }

    /// Send `request` with the stored access token.
    ///
    /// Without a token this returns `Unauthenticated` and sends nothing.
    /// 2xx yields the JSON body (`null` when empty), 403 yields
    /// `Forbidden`, any other status the request's failure message.
    pub async fn call(&self, request: FetchRequest) -> AuthResult<Value> {
        let Some(token) = self.store.access_token() else {
            return AuthResult::Unauthenticated;
        };

        let FetchRequest {
            method,
            path,
            body,
            failure_message,
        } = request;

        let api_request = ApiRequest {
            method: method.clone(),
            path: path.clone(),
            bearer: Some(token),
            body,
        };

        let response = match self.transport.send(api_request).await {
            Ok(response) => response,
            Err(e) => {
                error!("{} {} failed: {}", method, path, e);
                return AuthResult::server_error(e.to_string());
            }
        };

        if response.status == StatusCode::FORBIDDEN {
            warn!("{} {} forbidden", method, path);
            return AuthResult::Forbidden;
        }

        if !response.is_success() {
            warn!("{} {} returned {}", method, path, response.status);
            return AuthResult::server_error(failure_message);
        }

        match response.json_value() {
            Ok(value) => AuthResult::Ok(value),
            Err(e) => {
                error!("{} {} returned an unreadable body: {}", method, path, e);
                AuthResult::server_error(e.to_string())
            }
        }
    }

    /// [`call`](Self::call), then decode the body into `T`
    pub async fn call_json<T: DeserializeOwned>(&self, request: FetchRequest) -> AuthResult<T> {
        let failure_message = request.failure_message.clone();
        self.call(request)
            .await
            .and_then(|value| match serde_json::from_value(value) {
                Ok(decoded) => AuthResult::Ok(decoded),
                Err(e) => {
                    error!("Failed to decode response: {}", e);
                    AuthResult::server_error(failure_message)
                }
            })
    }
}
