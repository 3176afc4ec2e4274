use std::sync::Arc;

use anyhow::Result;
use auth::transport::HttpTransport;
use common::{DashboardConfig, telemetry::init_tracing};
use dashboard::{AppState, create_router};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = DashboardConfig::from_env()?;

    // Initialize logging
    init_tracing(&config.log_level);

    info!("Starting dashboard service");
    info!(
        "Backend API at {} ({})",
        config.api_base_url, config.app_env
    );

    let transport = HttpTransport::from_config(&config)?;
    let app_state = AppState::from_config(Arc::new(transport), &config);

    // Start the web server
    let app = create_router(app_state);

    let listener = TcpListener::bind(&config.listen_addr).await?;
    info!("Dashboard service listening on {}", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
