//! Dashboard backend-for-frontend
//!
//! Exposes the dashboard's server actions as JSON endpoints under
//! `/actions`. The session lives in the browser's cookies; every request
//! builds its session handles from the incoming cookie jar and returns the
//! updated jar with the response.

pub mod actions;
pub mod cookies;
pub mod error;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
