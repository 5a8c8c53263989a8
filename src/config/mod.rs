//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file (LOG_ENDPOINT_CONFIG)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (PORT, API_KEY, ...)
//!     → validation.rs (semantic checks)
//!     → EndpointConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, load_with, ConfigError};
pub use schema::{
    AuthConfig, BackendConfig, EndpointConfig, HelpConfig, ListenerConfig, LogFormat,
    ObservabilityConfig, SecurityConfig,
};
pub use validation::{validate_config, ValidationError};
