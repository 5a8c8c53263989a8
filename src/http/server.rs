//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, limits, auth, security headers)
//! - Bind server to listener
//! - Stop on the shutdown signal

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::backend::LogBackend;
use crate::config::EndpointConfig;
use crate::http::handlers::{handle_panic, healthz, help, not_found, root};
use crate::http::query::query_logs;
use crate::http::request::{make_span, MakeRequestUuid};
use crate::http::response::{HELP_PATH, QUERY_PATH};
use crate::lifecycle::ShutdownSignal;
use crate::query::QueryEngine;
use crate::security::{api_key_middleware, headers, limits};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub api_key: Option<Arc<str>>,
    pub engine: QueryEngine,
    pub guide_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(config: &EndpointConfig, backend: Arc<dyn LogBackend>) -> Self {
        Self {
            api_key: config.auth.api_key.as_deref().map(Arc::from),
            engine: QueryEngine::new(
                backend,
                config.backend.resource_type.clone(),
                config.backend.default_limit,
            ),
            guide_path: Arc::new(PathBuf::from(&config.help.guide_path)),
        }
    }
}

/// HTTP server for the log endpoint.
pub struct HttpServer {
    router: Router,
    config: EndpointConfig,
}

impl HttpServer {
    /// Create a new HTTP server querying `backend`.
    pub fn new(config: EndpointConfig, backend: Arc<dyn LogBackend>) -> Self {
        let state = AppState::new(&config, backend);
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &EndpointConfig, state: AppState) -> Router {
        let query_route = post(query_logs)
            .route_layer(middleware::from_fn_with_state(state.clone(), api_key_middleware))
            .fallback(not_found);

        let router = Router::new()
            .route("/", get(root))
            .route("/healthz", get(healthz))
            .route(HELP_PATH, get(help))
            .route(QUERY_PATH, query_route)
            .fallback(not_found)
            .with_state(state)
            .layer(limits::body_limit(&config.security));

        headers::apply(router, &config.security)
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(TraceLayer::new_for_http().make_span_with(make_span::<Body>))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for serving in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            auth_configured = self.config.auth.api_key.is_some(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
