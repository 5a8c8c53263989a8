//! Startup orchestration.
//!
//! # Order
//! 1. `.env` and configuration
//! 2. Tracing, then metrics
//! 3. Log backend client (project id resolved up front)
//! 4. Listener, then serve until a signal arrives
//!
//! Any startup error is fatal.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::backend::{resolve_project_id, BackendError, CloudLoggingClient, LogBackend};
use crate::config::{load_from_env, ConfigError, EndpointConfig};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{init_tracing, metrics};

/// Reasons the service fails to start or stops abnormally.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to initialise log backend: {0}")]
    Backend(#[from] BackendError),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Start the service and block until shutdown.
pub async fn run() -> Result<(), StartupError> {
    // A missing .env file is the normal case in production.
    let _ = dotenvy::dotenv();

    let config = load_from_env()?;
    init_tracing(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "log-endpoint starting");
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        resource_type = %config.backend.resource_type,
        default_limit = config.backend.default_limit,
        "Configuration loaded"
    );
    if config.auth.api_key.is_none() {
        tracing::warn!("API_KEY is not set; every query will be rejected as unauthorized");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let backend = build_backend(&config).await?;
    serve(config, backend).await
}

/// Connect the Cloud Logging client for the configured project.
pub async fn build_backend(config: &EndpointConfig) -> Result<Arc<dyn LogBackend>, StartupError> {
    let project_id = resolve_project_id(&config.backend).await?;
    let client = CloudLoggingClient::new(&config.backend, &project_id)?;
    tracing::info!(
        project_id = %project_id,
        endpoint = %client.endpoint(),
        static_token = config.backend.access_token.is_some(),
        "Log backend ready"
    );
    Ok(Arc::new(client))
}

/// Bind and serve until SIGINT/SIGTERM.
pub async fn serve(config: EndpointConfig, backend: Arc<dyn LogBackend>) -> Result<(), StartupError> {
    let address = config.listener.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;
    tracing::info!(address = %listener.local_addr()?, "Log endpoint service listening");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        tracing::info!(waiters = shutdown.receiver_count(), "Draining in-flight requests");
        shutdown.trigger();
    });

    HttpServer::new(config, backend)
        .run(listener, server_shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
