//! Configuration loading from disk and the process environment.

use std::env;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{EndpointConfig, LogFormat};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "LOG_ENDPOINT_CONFIG";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid environment variable {name}: {reason}")]
    Env { name: &'static str, reason: String },

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn read_file(path: &Path) -> Result<EndpointConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load configuration the way the service is deployed: an optional TOML
/// file named by `LOG_ENDPOINT_CONFIG`, then environment overrides.
pub fn load_from_env() -> Result<EndpointConfig, ConfigError> {
    let path = env::var(CONFIG_PATH_ENV).ok().filter(|p| !p.is_empty());
    load_with(path.as_deref().map(Path::new), |name| env::var(name).ok())
}

/// Build a validated config from an optional file plus overrides read
/// through `lookup`.
pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<EndpointConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match path {
        Some(path) => read_file(path)?,
        None => EndpointConfig::default(),
    };

    let config = apply_env_overrides(base, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
///
/// Empty values are treated as unset.
pub fn apply_env_overrides<F>(mut config: EndpointConfig, lookup: F) -> Result<EndpointConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(port) = get("PORT") {
        config.listener.port = port.trim().parse().map_err(|e: std::num::ParseIntError| {
            ConfigError::Env {
                name: "PORT",
                reason: e.to_string(),
            }
        })?;
    }

    if let Some(key) = get("API_KEY") {
        config.auth.api_key = Some(key);
    }
    // A blank key in the file is the same as no key.
    if config.auth.api_key.as_deref().is_some_and(str::is_empty) {
        config.auth.api_key = None;
    }

    if let Some(project) = get("GOOGLE_CLOUD_PROJECT").or_else(|| get("GCLOUD_PROJECT")) {
        config.backend.project_id = Some(project);
    }
    if let Some(token) = get("GOOGLE_OAUTH_ACCESS_TOKEN") {
        config.backend.access_token = Some(token);
    }
    if let Some(url) = get("LOGGING_API_URL") {
        config.backend.base_url = url;
    }
    if let Some(path) = get("HELP_GUIDE_PATH") {
        config.help.guide_path = path;
    }

    if let Some(level) = get("LOG_LEVEL") {
        config.observability.log_level = level;
    }
    if let Some(format) = get("RUST_LOG_FORMAT") {
        config.observability.log_format = match format.as_str() {
            "json" => LogFormat::Json,
            "pretty" | "text" => LogFormat::Pretty,
            other => {
                return Err(ConfigError::Env {
                    name: "RUST_LOG_FORMAT",
                    reason: format!("expected json or pretty, got {other}"),
                })
            }
        };
    }
    if let Some(enabled) = get("METRICS_ENABLED") {
        config.observability.metrics_enabled =
            enabled.parse().map_err(|e: std::str::ParseBoolError| ConfigError::Env {
                name: "METRICS_ENABLED",
                reason: e.to_string(),
            })?;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn port_and_key_come_from_env() {
        let config = apply_env_overrides(
            EndpointConfig::default(),
            env_of(&[("PORT", "9000"), ("API_KEY", "s3cret")]),
        )
        .unwrap();

        assert_eq!(config.listener.port, 9000);
        assert_eq!(config.auth.api_key.as_deref(), Some("s3cret"));
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let err = apply_env_overrides(EndpointConfig::default(), env_of(&[("PORT", "abc")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { name: "PORT", .. }));
    }

    #[test]
    fn empty_api_key_means_no_key() {
        let config =
            apply_env_overrides(EndpointConfig::default(), env_of(&[("API_KEY", "")])).unwrap();
        assert!(config.auth.api_key.is_none());

        let mut from_file = EndpointConfig::default();
        from_file.auth.api_key = Some(String::new());
        let config = apply_env_overrides(from_file, env_of(&[])).unwrap();
        assert!(config.auth.api_key.is_none());
    }

    #[test]
    fn project_falls_back_to_gcloud_project() {
        let config = apply_env_overrides(
            EndpointConfig::default(),
            env_of(&[("GCLOUD_PROJECT", "legacy-project")]),
        )
        .unwrap();
        assert_eq!(config.backend.project_id.as_deref(), Some("legacy-project"));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let err = apply_env_overrides(
            EndpointConfig::default(),
            env_of(&[("RUST_LOG_FORMAT", "xml")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("RUST_LOG_FORMAT"));
    }

    #[test]
    fn file_values_are_validated_after_overrides() {
        let dir = std::env::temp_dir().join(format!("log-endpoint-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("endpoint.toml");
        std::fs::write(&path, "[listener]\nport = 0\n").unwrap();

        let err = load_with(Some(path.as_path()), env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e == &vec![ValidationError::ZeroPort]));
        assert!(err.to_string().contains("listener.port cannot be 0"));

        let config = load_with(Some(path.as_path()), env_of(&[("PORT", "8081")])).unwrap();
        assert_eq!(config.listener.port, 8081);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_with(Some(Path::new("/nonexistent/endpoint.toml")), env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn no_file_means_defaults() {
        let config = load_with(None, env_of(&[])).unwrap();
        assert_eq!(config.listener.port, 8080);
        assert!(config.auth.api_key.is_none());
    }
}
