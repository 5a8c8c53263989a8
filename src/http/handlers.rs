//! Informational, fallback, and last-resort handlers.

use std::any::Any;
use std::io::ErrorKind;

use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::http::response::{usage_hint, ApiError, ENDPOINTS, QUERY_PATH};
use crate::http::server::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({
        "service": "Log Endpoint",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": ENDPOINTS,
    }))
}

pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Serve the markdown guide, or a structured description when there is none.
pub async fn help(State(state): State<AppState>) -> Response {
    match tokio::fs::read_to_string(state.guide_path.as_path()).await {
        Ok(guide) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            guide,
        )
            .into_response(),
        Err(e) if e.kind() == ErrorKind::NotFound => Json(api_description()).into_response(),
        Err(e) => {
            tracing::error!(path = %state.guide_path.display(), error = %e, "Failed to read usage guide");
            ApiError::Internal(format!("Failed to read usage guide: {e}")).into_response()
        }
    }
}

/// Structured API description used when no guide file is deployed.
pub fn api_description() -> Value {
    json!({
        "service": "Log Endpoint",
        "description": "Queries recent Cloud Run logs for one service and returns them as JSON.",
        "endpoints": {
            "GET /": "Service identity and endpoint list",
            "GET /help": "This documentation",
            "GET /healthz": "Liveness probe",
            "POST /query-logs": "Query logs (requires x-api-key)"
        },
        "authentication": {
            "header": "x-api-key",
            "required_for": [QUERY_PATH]
        },
        "request": {
            "service": "string, required: Cloud Run service name",
            "filter": "string, optional: extra Cloud Logging filter, appended as written",
            "limit": "integer, optional: page size, default 1000"
        },
        "response": {
            "service": "echo of the requested service",
            "count": "number of entries returned",
            "logs": "entries, newest first: timestamp, severity, message, resource, insertId"
        },
        "usage": usage_hint(),
    })
}

pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    tracing::debug!(method = %method, path = %uri.path(), "No route matched");
    ApiError::NotFound {
        method,
        path: uri.path().to_string(),
    }
}

/// Turn a handler panic into the generic 500 envelope.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "non-string panic payload"
    };
    tracing::error!(panic = %detail, "Request handler panicked");
    ApiError::Internal("An unexpected error occurred while processing the request".into())
        .into_response()
}
