//! Listener and shutdown handling

use anyhow::{Context, Result};
use axum::Router;
use mxc_core::Config;
use std::future::pending;
use std::net::SocketAddr;

/// Bind on all interfaces at the configured port and serve until a shutdown signal.
pub async fn start_server(config: &Config, app: Router) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port()));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        addr = %addr,
        server_name = %config.server_name(),
        max_file_size_bytes = %config.max_file_size_bytes(),
        base_path = %config.base_path(),
        "Media upload server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated with an error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Cannot listen for Ctrl+C");
        pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            tracing::error!(error = %e, "Cannot listen for SIGTERM");
            pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    pending::<()>().await;
}

/// Resolves on Ctrl+C or SIGTERM. In-flight uploads are allowed to finish.
async fn shutdown_signal() {
    tokio::select! {
        _ = ctrl_c() => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate() => tracing::info!("Received SIGTERM, shutting down"),
    }
}
