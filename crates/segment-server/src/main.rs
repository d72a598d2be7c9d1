//! Segment Engine HTTP Server
//!
//! Provides a REST API for evaluating user segments.

use anyhow::Result;
use segment_server::api;
use segment_server::config::{LogFormat, ServerConfig};
use segment_sdk::SegmentEngine;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Initialize tracing
    init_tracing(&config)?;
    info!("Loaded configuration: {:?}", config);

    // Initialize segment engine
    let engine = SegmentEngine::new(config.engine_config());
    info!("Segment engine initialized");

    let app = api::create_router(Arc::new(engine), &config.test_page);

    // Start server
    let addr = config.bind_addr();
    info!("Starting server on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    info!("✓ Server listening on http://{}", addr);
    info!("  Health check: http://{}/health", addr);
    info!("  Evaluate API: POST http://{}/evaluate", addr);
    info!("  Test page: http://{}/evaluate", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(config: &ServerConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "segment_server={level},segment_sdk={level},segment_core={level},tower_http=debug",
            level = config.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
