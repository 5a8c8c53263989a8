//! Log backend subsystem.
//!
//! # Data Flow
//! ```text
//! ListEntriesRequest { filter, page_size, order_by }
//!     → token.rs (OAuth access token: static, or cached from the metadata server)
//!     → cloud.rs (POST /v2/entries:list, one page)
//!     → entry.rs (BackendEntry, Severity)
//! ```
//!
//! # Design Decisions
//! - `LogBackend` is the seam the query engine depends on; tests swap it out
//! - Exactly one request per query: no pagination, no retries
//! - Backend error messages are preserved verbatim for callers

pub mod cloud;
pub mod entry;
pub mod token;

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

pub use cloud::{resolve_project_id, CloudLoggingClient};
pub use entry::{BackendEntry, Severity};
pub use token::TokenSource;

/// Ordering requested for every query.
pub const ORDER_TIMESTAMP_DESC: &str = "timestamp desc";

/// Parameters of a single `entries.list` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntriesRequest {
    pub filter: String,
    pub page_size: u32,
    pub order_by: String,
}

/// Errors surfaced by a log backend.
///
/// The `Display` output is what callers see in the `message` field.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend answered with an error status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Connection, TLS, or timeout failure.
    #[error("{0}")]
    Transport(String),

    /// The backend answered with a body we could not decode.
    #[error("Invalid response from log backend: {0}")]
    Decode(String),

    /// No access token could be obtained.
    #[error("Could not obtain access token: {0}")]
    Auth(String),

    /// Client misconfiguration detected at construction time.
    #[error("Log backend misconfigured: {0}")]
    Config(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

/// A queryable log store.
pub trait LogBackend: Send + Sync {
    fn list_entries(
        &self,
        request: ListEntriesRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<BackendEntry>, BackendError>> + Send + '_>>;
}
