//! JSON response envelopes.
//!
//! # Responsibilities
//! - Map every failure to a status code and a JSON body with an `error` field
//! - Attach the usage hint to everything except 404s
//!
//! # Design Decisions
//! - The usage hint is static; it is built per response, never cached
//! - Backend messages are echoed verbatim in `message`

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::query::QueryError;

/// Path of the authenticated query endpoint.
pub const QUERY_PATH: &str = "/query-logs";
/// Path of the usage guide.
pub const HELP_PATH: &str = "/help";

/// Endpoints listed on `/` and in 404 bodies.
pub const ENDPOINTS: [&str; 4] = ["GET /", "GET /help", "GET /healthz", "POST /query-logs"];

/// How to call the query endpoint correctly.
pub fn usage_hint() -> Value {
    json!({
        "endpoint": QUERY_PATH,
        "method": "POST",
        "authentication": "Send the shared secret in the x-api-key header",
        "documentation": HELP_PATH,
        "example": {
            "headers": {
                "Content-Type": "application/json",
                "x-api-key": "<your-api-key>"
            },
            "body": {
                "service": "backend",
                "filter": "severity>=ERROR",
                "limit": 10
            }
        }
    })
}

/// Every way a request can fail.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    MissingService,
    InvalidLimit,
    InvalidJson(String),
    PayloadTooLarge(String),
    Backend(String),
    NotFound { method: Method, path: String },
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::MissingService | ApiError::InvalidLimit | ApiError::InvalidJson(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Backend(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The JSON body for this error.
    pub fn body(&self) -> Value {
        match self {
            ApiError::Unauthorized => json!({
                "error": "Unauthorized",
                "message": "Missing or invalid x-api-key header",
                "usage": usage_hint(),
            }),
            ApiError::MissingService => json!({
                "error": "Service name is required",
                "usage": usage_hint(),
            }),
            ApiError::InvalidLimit => json!({
                "error": "Invalid limit",
                "message": "limit must be a positive integer",
                "usage": usage_hint(),
            }),
            ApiError::InvalidJson(detail) => json!({
                "error": "Invalid JSON in request body",
                "message": detail,
                "usage": usage_hint(),
            }),
            ApiError::PayloadTooLarge(detail) => json!({
                "error": "Request body too large",
                "message": detail,
                "usage": usage_hint(),
            }),
            ApiError::Backend(message) => json!({
                "error": "Failed to retrieve logs",
                "message": message,
                "usage": usage_hint(),
            }),
            ApiError::NotFound { method, path } => json!({
                "error": "Not found",
                "message": format!("No route for {method} {path}"),
                "endpoints": ENDPOINTS,
            }),
            ApiError::Internal(message) => json!({
                "error": "Internal server error",
                "message": message,
                "usage": usage_hint(),
            }),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::MissingService => ApiError::MissingService,
            QueryError::InvalidLimit => ApiError::InvalidLimit,
            QueryError::Backend(e) => ApiError::Backend(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;

    #[test]
    fn every_error_but_not_found_carries_usage() {
        let errors = [
            ApiError::Unauthorized,
            ApiError::MissingService,
            ApiError::InvalidLimit,
            ApiError::InvalidJson("expected value".into()),
            ApiError::PayloadTooLarge("length limit exceeded".into()),
            ApiError::Backend("quota exceeded".into()),
            ApiError::Internal("guide unreadable".into()),
        ];
        for err in errors {
            let body = err.body();
            assert!(body["error"].is_string(), "{err:?}");
            assert_eq!(body["usage"]["endpoint"], QUERY_PATH, "{err:?}");
            assert_eq!(body["usage"]["method"], "POST");
        }

        let not_found = ApiError::NotFound {
            method: Method::GET,
            path: "/nope".into(),
        };
        let body = not_found.body();
        assert!(body.get("usage").is_none());
        assert_eq!(body["endpoints"].as_array().unwrap().len(), ENDPOINTS.len());
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn backend_error_message_is_echoed() {
        let err: ApiError = QueryError::Backend(BackendError::Api {
            status: 429,
            message: "Quota exceeded for quota metric 'Read requests'".into(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.body()["message"],
            "Quota exceeded for quota metric 'Read requests'"
        );
    }
}
