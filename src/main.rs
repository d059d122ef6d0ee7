//! Variant Cache - memoization for generated onepager variants
//!
//! Serves the cache and variant generation over HTTP.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use variant_cache::api::create_router;
use variant_cache::{spawn_sweep_task, AppState, Config};

/// Main entry point for the variant cache service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create both caches and the variant service
/// 4. Start the sweep tasks unless disabled
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "variant_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Variant Cache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: max_entries={}, policy={}, default_ttl={}ms, variant_ttl={}ms, sweep_interval={}ms, port={}",
        config.max_entries,
        config.eviction_policy,
        config.default_ttl_ms,
        config.variant_ttl_ms,
        config.sweep_interval_ms,
        config.server_port
    );

    let state = AppState::from_config(&config);
    info!("Caches initialized");

    let sweepers = match config.sweep_interval() {
        Some(interval) => {
            info!("Background sweep tasks started");
            vec![
                spawn_sweep_task("entries", state.cache.clone(), interval),
                spawn_sweep_task("variants", state.variants.cache().clone(), interval),
            ]
        }
        None => {
            info!("Sweep disabled, stale entries are evicted on read only");
            Vec::new()
        }
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweepers))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then aborts the sweepers.
async fn shutdown_signal(sweepers: Vec<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
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

    for handle in &sweepers {
        handle.abort();
    }
    if !sweepers.is_empty() {
        warn!("Sweep tasks aborted");
    }
}
