use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::http::request::request_id;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics::{self, outcome};
use crate::query::{QueryError, QueryRequest, QueryResponse};

pub async fn query_logs(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let request_id = request_id(&headers);

    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(request_id = %request_id, error = %rejection.body_text(), "Rejected query body");
        metrics::record_query(outcome::INVALID);
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(rejection.body_text())
        } else {
            ApiError::InvalidJson(rejection.body_text())
        }
    })?;

    match state.engine.query(request).await {
        Ok(response) => {
            tracing::info!(request_id = %request_id, service = %response.service, count = response.count, "Query served");
            metrics::record_query(outcome::OK);
            Ok(Json(response))
        }
        Err(e @ QueryError::Backend(_)) => {
            metrics::record_query(outcome::BACKEND_ERROR);
            Err(e.into())
        }
        Err(e) => {
            tracing::debug!(request_id = %request_id, error = %e, "Invalid query");
            metrics::record_query(outcome::INVALID);
            Err(e.into())
        }
    }
}
