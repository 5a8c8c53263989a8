//! Configuration validation.
//!
//! Semantic checks that serde cannot express. All problems are collected
//! and returned together so a misconfigured deployment is fixed in one pass.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::EndpointConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.port cannot be 0")]
    ZeroPort,

    #[error("{field} is not a valid URL: {value}")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("observability.metrics_address is not a socket address: {0}")]
    InvalidMetricsAddress(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &EndpointConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    for (field, value) in [
        ("backend.base_url", &config.backend.base_url),
        ("backend.metadata_url", &config.backend.metadata_url),
    ] {
        if url::Url::parse(value).is_err() {
            errors.push(ValidationError::InvalidUrl {
                field,
                value: value.clone(),
            });
        }
    }

    if config.backend.timeout_secs == 0 {
        errors.push(ValidationError::NotPositive("backend.timeout_secs"));
    }
    if config.backend.default_limit == 0 {
        errors.push(ValidationError::NotPositive("backend.default_limit"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::NotPositive("security.max_body_size"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
