//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, request span)
//!     → security (body limit; x-api-key on /query-logs)
//!     → query.rs / handlers.rs
//!     → response.rs (JSON envelopes, usage hints)
//!     → Send to client
//! ```

pub mod handlers;
pub mod query;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::{usage_hint, ApiError, HELP_PATH, QUERY_PATH};
pub use server::{AppState, HttpServer};
