//! Serve command implementation.

use super::open_wiki;
use crate::server::{router, AppState};
use anyhow::{Context, Result};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct ServeOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Start the HTTP server and run until interrupted
pub async fn serve(config_path: &Path, opts: ServeOptions) -> Result<()> {
    let (mut config, wiki) = open_wiki(config_path)?;
    if let Some(host) = opts.host {
        config.server.host = host;
    }
    if let Some(port) = opts.port {
        config.server.port = port;
    }

    let entries_dir = config.entries_dir();
    let count = wiki
        .index()
        .with_context(|| format!("Failed to read entries from {:?}", entries_dir))?
        .len();
    tracing::info!(entries = count, dir = %entries_dir.display(), "loaded entry store");

    let app = router(AppState::new(wiki, &config.site.title));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Serving {} at http://{}", config.site.title, addr);
    println!("\nServing at http://{}", addr);
    println!("   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
