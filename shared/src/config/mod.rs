//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - JWT signing and token lifetimes
//! - `cache` - Entity cache backend and Redis connection
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection
//! - `otp` - One-time passcode policy and delivery channels
//! - `server` - HTTP server binding and storage backend selection

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig};
pub use cache::{CacheBackend, CacheConfig};
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use otp::{EmailProviderConfig, OtpConfig, WhatsAppProviderConfig};
pub use server::{ServerConfig, StorageBackend};

/// Prefix for environment variables read by [`AppConfig::load`]
pub const ENV_PREFIX: &str = "HOTEL";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// One-time passcode configuration
    pub otp: OtpConfig,
}

impl AppConfig {
    /// Load configuration in layers.
    ///
    /// Built-in defaults, then the optional `config.<environment>.toml`
    /// file, then `HOTEL__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        let defaults = ::config::Config::try_from(&Self::for_environment(environment))?;

        let settings = ::config::Config::builder()
            .add_source(defaults)
            .add_source(::config::File::with_name(&environment.config_file()).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut loaded: AppConfig = settings.try_deserialize()?;
        loaded.environment = environment;
        Ok(loaded)
    }

    /// Load configuration from plain environment variables only
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            cache: CacheConfig::from_env(),
            otp: OtpConfig::from_env(),
        }
    }

    /// Defaults tuned for the given environment
    pub fn for_environment(environment: Environment) -> Self {
        let mut config = Self {
            environment,
            ..Default::default()
        };
        if environment.is_production() {
            config.server = ServerConfig::new("0.0.0.0", 8080);
            config.database = config.database.with_max_connections(50);
        }
        config
    }

    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_defaults_bind_all_interfaces() {
        let config = AppConfig::for_environment(Environment::Production);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.max_connections, 50);
        assert!(config.is_production());
    }

    #[test]
    fn test_default_round_trips_through_config_crate() {
        let defaults = ::config::Config::try_from(&AppConfig::default()).unwrap();
        let loaded: AppConfig = defaults.try_deserialize().unwrap();
        assert_eq!(loaded.server.port, ServerConfig::default().port);
        assert_eq!(loaded.otp.code_ttl_seconds, OtpConfig::default().code_ttl_seconds);
    }
}
