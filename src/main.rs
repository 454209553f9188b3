use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use bookingdesk::config::AppConfig;
use bookingdesk::handlers;
use bookingdesk::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        "using appointments backend at {} (timeout {}s)",
        config.api_base_url,
        config.request_timeout_secs
    );

    let state = Arc::new(AppState::from_config(config.clone())?);
    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
