//! Log query engine.
//!
//! # Responsibilities
//! - Validate the caller's request
//! - Build the scoped backend filter
//! - Issue exactly one backend call and project the entries

use std::sync::Arc;
use std::time::Instant;

use crate::backend::{ListEntriesRequest, LogBackend, ORDER_TIMESTAMP_DESC};
use crate::observability::metrics;
use crate::query::filter::build_filter;
use crate::query::types::{LogEntry, QueryError, QueryRequest, QueryResponse};

/// Runs log queries against a backend.
#[derive(Clone)]
pub struct QueryEngine {
    backend: Arc<dyn LogBackend>,
    resource_type: String,
    default_limit: u32,
}

impl QueryEngine {
    pub fn new(backend: Arc<dyn LogBackend>, resource_type: impl Into<String>, default_limit: u32) -> Self {
        Self {
            backend,
            resource_type: resource_type.into(),
            default_limit,
        }
    }

    /// Validate, query, and project.
    pub async fn query(&self, request: QueryRequest) -> Result<QueryResponse, QueryError> {
        let service = match request.service {
            Some(s) if !s.is_empty() => s,
            _ => return Err(QueryError::MissingService),
        };
        let page_size = match request.limit {
            Some(0) => return Err(QueryError::InvalidLimit),
            Some(n) => n,
            None => self.default_limit,
        };

        let filter = build_filter(
            &self.resource_type,
            &service,
            request.filter.as_deref().unwrap_or_default(),
        );
        tracing::info!(service = %service, filter = %filter, page_size, "Querying logs");

        let start = Instant::now();
        let result = self
            .backend
            .list_entries(ListEntriesRequest {
                filter,
                page_size,
                order_by: ORDER_TIMESTAMP_DESC.to_string(),
            })
            .await;
        metrics::record_backend_call(result.is_ok(), start);

        let entries = match result {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(service = %service, error = %e, "Error fetching logs");
                return Err(QueryError::Backend(e));
            }
        };

        let logs: Vec<LogEntry> = entries.into_iter().map(LogEntry::from).collect();
        metrics::record_entries_returned(logs.len());

        Ok(QueryResponse {
            service,
            count: logs.len(),
            logs,
        })
    }
}
