//! Serve command - runs the HTTP API

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::AppConfig;
use crate::infrastructure::observability::init_metrics;

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let service = crate::create_prompt_cache_service(&config).await?;
    let metrics = init_metrics(&config.metrics);
    let app = create_router(AppState::new(Arc::new(service)), metrics);

    let addr = build_socket_addr(&config)?;
    info!("Starting prompt cache API on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}
