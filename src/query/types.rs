//! Request and response types for log queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::backend::{BackendEntry, BackendError, Severity};

/// Body of `POST /query-logs`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QueryRequest {
    /// Workload whose logs are requested. Required and non-empty.
    pub service: Option<String>,
    /// Extra filter fragment in the backend's query language.
    #[serde(default)]
    pub filter: Option<String>,
    /// Page size; the engine default applies when absent.
    #[serde(default)]
    pub limit: Option<u32>,
}

/// One log line as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub timestamp: Option<DateTime<Utc>>,
    pub severity: Severity,
    pub message: Value,
    pub resource: Value,
    pub insert_id: String,
}

impl From<BackendEntry> for LogEntry {
    fn from(entry: BackendEntry) -> Self {
        let message = entry.data();
        Self {
            timestamp: entry.timestamp,
            severity: entry.severity,
            message,
            resource: entry.resource,
            insert_id: entry.insert_id,
        }
    }
}

/// Successful query result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub service: String,
    pub count: usize,
    pub logs: Vec<LogEntry>,
}

/// Reasons a query does not produce a response.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Service name is required")]
    MissingService,

    #[error("limit must be a positive integer")]
    InvalidLimit,

    #[error(transparent)]
    Backend(#[from] BackendError),
}
