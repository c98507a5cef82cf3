//! Gateway Library
//!
//! Process bootstrap and the HTTP surface over the persistence layer. The
//! store connection is opened once here and handed to every handler through
//! `AppState`.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing::info;

use persistence::Database;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

type BoxError = Box<dyn std::error::Error>;

/// Connect to the store, then serve HTTP until Ctrl-C.
///
/// A store that cannot be reached within the connect deadline aborts
/// startup; there is no retry. The client is closed on every exit path.
pub async fn run_server(config: GatewayConfig) -> Result<(), BoxError> {
    let db = Database::connect(&config.store).await?;
    let result = serve(&db, &config).await;
    db.shutdown().await;
    result
}

async fn serve(db: &Database, config: &GatewayConfig) -> Result<(), BoxError> {
    if config.store.ensure_indexes {
        db.ensure_indexes().await?;
    }

    let state = AppState::from_database(
        db,
        config.store.operation_timeout,
        config.request_timeout,
    );
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Gateway listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Create the natural-key unique indexes and exit.
pub async fn create_indexes(config: GatewayConfig) -> Result<(), BoxError> {
    let db = Database::connect(&config.store).await?;
    let result = db.ensure_indexes().await;
    db.shutdown().await;
    Ok(result?)
}

/// Connect, issue one liveness round trip, and report the database in use.
pub async fn check_store(config: GatewayConfig) -> Result<(), BoxError> {
    let db = Database::connect(&config.store).await?;
    let result = db.ping().await;
    if result.is_ok() {
        info!(database = %db.name(), "Store reachable");
    }
    db.shutdown().await;
    Ok(result?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
