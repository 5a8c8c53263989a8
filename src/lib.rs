//! Log Endpoint Library

pub mod backend;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod query;
pub mod security;

pub use config::schema::EndpointConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
