//! Flightcache - a read-through TTL cache layer
//!
//! Hosts the cache administration surface and the background sweeper around
//! the per-entity caches.

mod admin;
mod cache;
mod client;
mod config;
mod error;
mod models;
mod tasks;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use admin::{create_router, AppState};
use cache::{Cache, CacheRegistry};
use client::{
    AircraftClient, AirportClient, FlightClient, HttpFetcher, AIRCRAFT_NAMESPACE,
    AIRPORTS_NAMESPACE, FLIGHTS_NAMESPACE,
};
use config::Config;
use tasks::spawn_sweeper_task;

/// Main entry point for the cache layer host.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Construct the per-entity caches and clients, register them
/// 4. Start the background TTL sweeper task
/// 5. Create the admin router with all endpoints
/// 6. Start the HTTP server on the configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flightcache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting flightcache");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_ttl={}s, sweep_interval={}s, port={}, api_url={}",
        config.cache_ttl, config.sweep_interval, config.server_port, config.api_url
    );

    // Composition root: one fetcher, one typed cache per entity, one registry
    let fetcher = Arc::new(HttpFetcher::new(
        config.api_url.clone(),
        config.api_token.clone(),
    ));
    let registry = Arc::new(CacheRegistry::new());

    let aircraft = AircraftClient::new(fetcher.clone(), Cache::new(), config.cache_ttl);
    let flights = FlightClient::new(fetcher.clone(), Cache::new(), config.cache_ttl);
    let airports = AirportClient::new(fetcher, Cache::new(), config.cache_ttl);

    registry
        .register(AIRCRAFT_NAMESPACE.prefix(), Arc::new(aircraft.cache().clone()))
        .await;
    registry
        .register(FLIGHTS_NAMESPACE.prefix(), Arc::new(flights.cache().clone()))
        .await;
    registry
        .register(AIRPORTS_NAMESPACE.prefix(), Arc::new(airports.cache().clone()))
        .await;
    info!("Registered caches: {:?}", registry.names().await);

    // Start background sweeper task
    let sweeper_handle = spawn_sweeper_task(registry.clone(), config.sweep_interval);
    info!("Background sweeper task started");

    // Create admin router
    let state = AppState::new(registry);
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Admin surface listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweeper_handle))
        .await?;

    info!("Shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweeper task and allows graceful shutdown.
async fn shutdown_signal(sweeper_handle: tokio::task::JoinHandle<()>) {
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

    // Abort the sweeper task
    sweeper_handle.abort();
    warn!("Sweeper task aborted");
}
