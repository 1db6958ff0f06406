//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using
//! the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TRAINBOOK` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use trainbook::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod booking;
mod database;
mod error;
mod server;

pub use booking::BookingConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Booking policy (default capacity, auto-confirm)
    #[serde(default)]
    pub booking: BookingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Environment Variable Format
    ///
    /// - `TRAINBOOK__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `TRAINBOOK__DATABASE__URL=...` -> `database.url = ...`
    /// - `TRAINBOOK__BOOKING__AUTO_CONFIRM=true` -> `booking.auto_confirm = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TRAINBOOK")
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
        self.database.validate()?;
        self.booking.validate()?;
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

    fn set_minimal_env() {
        env::set_var(
            "TRAINBOOK__DATABASE__URL",
            "postgresql://test@localhost/test",
        );
    }

    fn clear_env() {
        env::remove_var("TRAINBOOK__DATABASE__URL");
        env::remove_var("TRAINBOOK__SERVER__PORT");
        env::remove_var("TRAINBOOK__BOOKING__DEFAULT_SESSION_CAPACITY");
    }

    #[test]
    fn loads_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("config should load");
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn defaults_apply_for_optional_sections() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.booking.default_session_capacity, 10);
        assert!(!config.booking.auto_confirm);
    }

    #[test]
    fn nested_overrides_are_read() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("TRAINBOOK__SERVER__PORT", "3000");
        env::set_var("TRAINBOOK__BOOKING__DEFAULT_SESSION_CAPACITY", "25");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.booking.default_session_capacity, 25);
    }
}
