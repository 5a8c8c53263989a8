//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → api_key.rs (x-api-key check, query endpoint only)
//!     → limits.rs (body size, enforced while extracting the body)
//!     → handler
//! Outgoing response:
//!     → headers.rs (hardening headers, CORS)
//! ```
//!
//! # Design Decisions
//! - Fail closed: no configured key means every query is rejected
//! - The presented key is never logged

pub mod api_key;
pub mod headers;
pub mod limits;

pub use api_key::{api_key_middleware, is_authorized, API_KEY_HEADER};
