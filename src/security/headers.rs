//! Security response headers and CORS.
//!
//! # Responsibilities
//! - Add hardening headers to every response
//! - Allow cross-origin callers when enabled (any origin, no credentials)
//!
//! # Design Decisions
//! - Headers are only set when the handler did not set them already
//! - The API serves JSON and markdown, never active content, so the CSP denies everything

use axum::{
    http::{header, HeaderName, HeaderValue},
    Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer};

use crate::config::SecurityConfig;

/// Hardening headers applied to every response.
pub fn security_headers() -> Vec<(HeaderName, HeaderValue)> {
    vec![
        (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        (header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
        (header::REFERRER_POLICY, HeaderValue::from_static("no-referrer")),
        (
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=15552000; includeSubDomains"),
        ),
        (
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        ),
        (
            HeaderName::from_static("cross-origin-resource-policy"),
            HeaderValue::from_static("same-origin"),
        ),
    ]
}

/// Wrap `router` with the configured header and CORS layers.
pub fn apply<S>(mut router: Router<S>, config: &SecurityConfig) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if config.enable_headers {
        for (name, value) in security_headers() {
            router = router.layer(SetResponseHeaderLayer::if_not_present(name, value));
        }
    }
    if config.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    router
}
