//! Common library for the task dashboard
//!
//! This crate provides shared functionality used across the dashboard
//! crates: configuration loading, shared error types and tracing setup.
//!
//! ```rust,no_run
//! use common::{config::DashboardConfig, telemetry::init_tracing};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DashboardConfig::from_env()?;
//!     init_tracing(&config.log_level);
//!     println!("Backend API: {}", config.api_base_url);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::DashboardConfig;
pub use error::{ConfigError, ValidationError, ValidationErrors};
