//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `CONSENSUS` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use consensus::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod error;
mod generation;
mod server;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use generation::{ConfigurationStatus, GenerationConfig, API_KEY_PLACEHOLDER};
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Generation API configuration (credential, model, retry budget)
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Embedded project store configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `CONSENSUS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `CONSENSUS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CONSENSUS__GENERATION__API_KEY=...` -> `generation.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CONSENSUS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.generation.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("CONSENSUS__SERVER__PORT");
        env::remove_var("CONSENSUS__SERVER__ENVIRONMENT");
        env::remove_var("CONSENSUS__GENERATION__API_KEY");
    }

    #[test]
    fn test_load_without_env_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(!config.generation.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_reads_generation_key() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CONSENSUS__GENERATION__API_KEY", "AIza-test");
        let config = AppConfig::load();
        clear_env();

        let config = config.unwrap();
        assert!(config.generation.is_configured());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CONSENSUS__SERVER__PORT", "3000");
        let config = AppConfig::load();
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CONSENSUS__SERVER__ENVIRONMENT", "production");
        let config = AppConfig::load();
        clear_env();

        let config = config.unwrap();
        assert!(config.is_production());
    }
}
