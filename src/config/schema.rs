//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the endpoint.
//! All types derive Serde traits for deserialization from config files, and
//! every section falls back to defaults so an empty file is a valid config.

use serde::{Deserialize, Serialize};

/// Root configuration for the log endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EndpointConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Shared-secret authentication for the query endpoint.
    pub auth: AuthConfig,

    /// Log backend connection settings.
    pub backend: BackendConfig,

    /// Usage guide served on `/help`.
    pub help: HelpConfig,

    /// Response hardening and request limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub bind_host: String,

    /// TCP port.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret callers must present in `x-api-key`. `None` rejects every query.
    pub api_key: Option<String>,
}

/// Cloud Logging backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Project whose logs are queried. Resolved from the metadata server when unset.
    pub project_id: Option<String>,

    /// Logging API root.
    pub base_url: String,

    /// Compute metadata server root (tokens, project id).
    pub metadata_url: String,

    /// Fixed OAuth access token. When unset a token is fetched from the metadata server.
    pub access_token: Option<String>,

    /// Backend request timeout in seconds.
    pub timeout_secs: u64,

    /// Monitored resource type every query is scoped to.
    pub resource_type: String,

    /// Page size used when the caller omits `limit`.
    pub default_limit: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            base_url: "https://logging.googleapis.com".to_string(),
            metadata_url: "http://metadata.google.internal".to_string(),
            access_token: None,
            timeout_secs: 30,
            resource_type: "cloud_run_revision".to_string(),
            default_limit: 1000,
        }
    }
}

/// Usage guide configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HelpConfig {
    /// Markdown file served verbatim on `/help` when present.
    pub guide_path: String,
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            guide_path: "USAGE.md".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security headers.
    pub enable_headers: bool,
    /// Allow cross-origin requests.
    pub enable_cors: bool,
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            enable_cors: true,
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: EndpointConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.port, 8080);
        assert!(config.auth.api_key.is_none());
        assert_eq!(config.backend.default_limit, 1000);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config: EndpointConfig = toml::from_str(
            r#"
            [listener]
            port = 9000

            [backend]
            project_id = "acme-prod"

            [observability]
            log_format = "pretty"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.backend.project_id.as_deref(), Some("acme-prod"));
        assert_eq!(config.backend.resource_type, "cloud_run_revision");
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }
}
