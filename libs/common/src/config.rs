//! Configuration for the dashboard
//!
//! Values come from the process environment through the `config` crate,
//! with defaults suitable for a local development backend.

use std::collections::HashMap;
use std::time::Duration;

use config::{Config, Environment};
use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

/// Dashboard configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Backend API origin, without a trailing slash
    pub api_base_url: String,
    /// Deployment environment name (`production` enables secure cookies)
    pub app_env: String,
    /// Address the dashboard server binds to
    pub listen_addr: String,
    /// Outbound request timeout in seconds, no timeout when unset
    pub request_timeout_secs: Option<u64>,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_level: String,
}

impl DashboardConfig {
    /// Create a new DashboardConfig from environment variables
    ///
    /// # Environment Variables
    /// - `API_BASE_URL`: Backend API origin (default: "http://localhost:8000/api")
    /// - `APP_ENV`: Deployment environment (default: "development")
    /// - `LISTEN_ADDR`: Server bind address (default: "0.0.0.0:3000")
    /// - `REQUEST_TIMEOUT_SECS`: Outbound request timeout (default: none)
    /// - `LOG_LEVEL`: Default log filter (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        Self::load(Environment::default().try_parsing(true))
    }

    /// Create a DashboardConfig from an explicit variable map instead of
    /// the process environment
    pub fn from_source(vars: HashMap<String, String>) -> ConfigResult<Self> {
        Self::load(Environment::default().try_parsing(true).source(Some(vars)))
    }

    fn load(environment: Environment) -> ConfigResult<Self> {
        let settings = Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("app_env", "development")?
            .set_default("listen_addr", DEFAULT_LISTEN_ADDR)?
            .set_default("log_level", "info")?
            .add_source(environment)
            .build()?;

        let mut config: DashboardConfig = settings.try_deserialize()?;
        config.validate()?;
        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();

        Ok(config)
    }

    fn validate(&self) -> ConfigResult<()> {
        let base = self.api_base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "API_BASE_URL",
                message: format!("expected an http(s) URL, got {:?}", self.api_base_url),
            });
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid {
                key: "REQUEST_TIMEOUT_SECS",
                message: "timeout must be at least one second".to_string(),
            });
        }

        Ok(())
    }

    /// Whether persisted entries carry the `Secure` attribute
    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Outbound request timeout, if one is configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
