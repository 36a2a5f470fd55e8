//! Buildboard - community build sharing API
//!
//! Serves champion builds with a cached public listing.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use buildboard::api::create_router;
use buildboard::identity::InMemoryIdentity;
use buildboard::seed::SeedData;
use buildboard::store::InMemoryStore;
use buildboard::{spawn_cleanup_task, AppState, Config};

/// Main entry point for the Buildboard API server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the in-memory backends, seeding them if configured
/// 4. Wire the caches into the application state
/// 5. Start background name-cache cleanup task
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "buildboard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Buildboard API server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, public_builds_ttl={}s, user_name_ttl={}s, single_flight={}",
        config.server_port,
        config.public_builds_ttl_secs,
        config.user_name_ttl_secs,
        config.single_flight_refresh
    );

    let store = Arc::new(InMemoryStore::new());
    let identity = Arc::new(InMemoryIdentity::new());

    if let Some(path) = &config.seed_file {
        let summary = SeedData::load(path)
            .with_context(|| format!("loading seed file {}", path.display()))?
            .apply(&store, &identity)
            .await
            .context("applying seed data")?;
        info!(
            "Seed data loaded: users={}, builds={}, comments={}",
            summary.users, summary.builds, summary.comments
        );
    }

    let state = AppState::new(&config, store, identity);
    info!("Public builds cache initialized");

    let cleanup_handle = spawn_cleanup_task(state.names.clone(), config.cleanup_interval);
    info!("Background cleanup task started");

    let app = create_router(state, &config.allowed_origins);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task and allows graceful shutdown.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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

    cleanup_handle.abort();
    warn!("Cleanup task aborted");
}
