//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//! A `.env` file in the working directory is read first, if present.
//!
//! # Environment Variables
//! - `LEVY_HOST` - Bind address (default: 0.0.0.0)
//! - `LEVY_PORT` - Listen port (default: 8000)
//! - `LEVY_DATABASE_PATH` - SQLite file, or `:memory:` (default: ./levy.db)
//! - `LEVY_DB_MAX_CONNECTIONS` - Pool size (default: 5)

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use levy_db::DbConfig;

/// API server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// IP address to bind the server to
    pub host: IpAddr,

    /// Port to listen on
    pub port: u16,

    /// SQLite database path
    pub database_path: PathBuf,

    /// Maximum pooled connections
    pub db_max_connections: u32,
}

impl ApiConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key → value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = ApiConfig {
            host: var("LEVY_HOST", "0.0.0.0")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("LEVY_HOST".to_string()))?,

            port: var("LEVY_PORT", "8000")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("LEVY_PORT".to_string()))?,

            database_path: PathBuf::from(var("LEVY_DATABASE_PATH", "./levy.db")),

            db_max_connections: var("LEVY_DB_MAX_CONNECTIONS", "5")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("LEVY_DB_MAX_CONNECTIONS".to_string()))?,
        };

        if config.database_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("LEVY_DATABASE_PATH".to_string()));
        }
        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("LEVY_DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Address the listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Database settings derived from this config.
    pub fn db_config(&self) -> DbConfig {
        let config = DbConfig::new(&self.database_path);
        if config.is_in_memory() {
            // One connection keeps the whole database alive.
            DbConfig::in_memory()
        } else {
            config.max_connections(self.db_max_connections)
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8000");
        assert_eq!(config.database_path, PathBuf::from("./levy.db"));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.db_config().max_connections, 5);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("LEVY_HOST", "127.0.0.1"),
            ("LEVY_PORT", "9000"),
            ("LEVY_DATABASE_PATH", "/var/lib/levy/levy.db"),
            ("LEVY_DB_MAX_CONNECTIONS", "12"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9000");
        assert_eq!(config.db_config().max_connections, 12);
    }

    #[test]
    fn test_in_memory_path() {
        let config = load(&[("LEVY_DATABASE_PATH", ":memory:")]).unwrap();
        let db = config.db_config();
        assert!(db.is_in_memory());
        assert_eq!(db.max_connections, 1);
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("LEVY_HOST", "not-an-ip"),
            ("LEVY_PORT", "99999"),
            ("LEVY_PORT", "http"),
            ("LEVY_DB_MAX_CONNECTIONS", "0"),
            ("LEVY_DB_MAX_CONNECTIONS", "-1"),
            ("LEVY_DATABASE_PATH", ""),
        ] {
            let err = load(&[(key, value)]).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid value for {key}"), "{key}={value}");
        }
    }
}
