//! Log query subsystem.
//!
//! # Data Flow
//! ```text
//! QueryRequest { service, filter?, limit? }
//!     → engine.rs (validate)
//!     → filter.rs (scope to resource type + service, append fragment)
//!     → LogBackend::list_entries (one page, newest first)
//!     → types.rs (project BackendEntry → LogEntry)
//!     → QueryResponse { service, count, logs }
//! ```

pub mod engine;
pub mod filter;
pub mod types;

pub use engine::QueryEngine;
pub use filter::build_filter;
pub use types::{LogEntry, QueryError, QueryRequest, QueryResponse};
