use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::Config;
use crate::server::{build_router, AppState};
use crate::storage::SqliteStore;

use super::build_pipeline;

/// Start the HTTP API server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    println!("Starting TasteMap API Server");
    println!("============================");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);
    println!("  Database: {}", config.database.sqlite_path.display());
    if config.places.api_key.is_empty() {
        println!("  Warning: GOOGLE_API_KEY is not set; place lookups will fail");
    }
    println!();

    let pipeline = Arc::new(build_pipeline(&config)?);

    if let Some(parent) = config.database.sqlite_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    let store = Arc::new(
        SqliteStore::open(&config.database.sqlite_path)
            .context("Failed to open recommendation database")?,
    );

    let state = AppState::new(pipeline, store);
    let router = build_router(state, &config.server.allowed_origins);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    println!("Endpoints:");
    println!("  GET /health               - Health check");
    println!("  GET /api/recommendations  - Stored recommendations (rating desc)");
    println!("  GET /api/search?q=&page=&limit= - Run the discovery pipeline");
    println!();
    println!("TasteMap server listening on http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                }
                Err(e) => {
                    tracing::error!("Failed to wait for Ctrl+C: {}", e);
                }
            }
        })
        .await
        .context("Server error")?;

    println!("TasteMap server stopped.");
    Ok(())
}
