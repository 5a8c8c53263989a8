//! Shared-secret authentication for the query endpoint.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::request::request_id;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics::{self, outcome};

/// Header carrying the caller's credential.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Exact match of the presented key against the configured one.
///
/// No configured key means nothing is accepted.
pub fn is_authorized(headers: &HeaderMap, expected: Option<&str>) -> bool {
    let Some(expected) = expected else {
        return false;
    };
    headers
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|presented| presented == expected)
}

pub async fn api_key_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if is_authorized(request.headers(), state.api_key.as_deref()) {
        return next.run(request).await;
    }

    tracing::warn!(
        request_id = %request_id(request.headers()),
        key_present = request.headers().contains_key(API_KEY_HEADER),
        "Rejected unauthenticated query"
    );
    metrics::record_query(outcome::UNAUTHORIZED);
    ApiError::Unauthorized.into_response()
}
