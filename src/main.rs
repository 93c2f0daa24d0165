//! Diagram Render Cache - A diagram rendering tool server
//!
//! Renders diagram source through an external renderer, with a bounded,
//! content-addressed LRU cache in front of it.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use diagram_render_cache::{api::create_router, spawn_prune_task, AppState, Config};

/// Main entry point for the render server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load and validate configuration from environment variables
/// 3. Create the renderer client and, if enabled, the render cache
/// 4. Start the background prune task when configured
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diagram_render_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Diagram Render Cache Server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_enabled={}, max_entries={}, max_memory={}MB, max_age={}ms, renderer={}, port={}",
        config.cache_enabled,
        config.max_entries,
        config.max_memory_mb,
        config.max_age_ms,
        config.renderer_url,
        config.server_port
    );

    let state = AppState::from_config(&config).context("invalid configuration")?;
    info!("Render service initialized");

    let prune_handle = match state.service.cache() {
        Some(cache) if config.prune_interval > 0 => {
            let handle = spawn_prune_task(cache.clone(), config.prune_interval, config.max_age_ms);
            info!("Background prune task started");
            Some(handle)
        }
        _ => None,
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(prune_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the prune task and allows graceful shutdown.
async fn shutdown_signal(prune_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = prune_handle {
        handle.abort();
        warn!("Prune task aborted");
    }
}
