//! Request logging middleware

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info, warn};

/// Log every action call with its outcome.
///
/// Only the method and path are logged, never cookies or bodies.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed = started.elapsed().as_millis();
    if status.is_client_error() || status.is_server_error() {
        warn!("{} {} -> {} ({} ms)", method, path, status, elapsed);
    } else {
        info!("{} {} -> {} ({} ms)", method, path, status, elapsed);
    }

    response
}
