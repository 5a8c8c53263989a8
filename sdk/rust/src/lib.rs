//! Client SDK for the Log Endpoint service.

pub mod client;

pub use client::{ClientError, LogEndpointClient, LogEntry, QueryLogsRequest, QueryLogsResponse};
