//! Request body limits.
//!
//! The limit is enforced by the body extractor, so it applies after the
//! API-key check and an overrun surfaces as a `JsonRejection` with status
//! 413, rendered through the usual error envelope.

use axum::extract::DefaultBodyLimit;

use crate::config::SecurityConfig;

pub fn body_limit(config: &SecurityConfig) -> DefaultBodyLimit {
    DefaultBodyLimit::max(config.max_body_size)
}
