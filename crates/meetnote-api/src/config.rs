//! Server configuration loaded from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | `postgres://localhost/meetnote` |
//! | `STORAGE_BACKEND` | `postgres` (or `memory`) |
//! | `HOST` | `0.0.0.0` |
//! | `SERVER_PORT` (alias `PORT`) | `2022` |
//! | `ALLOWED_ORIGINS` | `http://localhost:5173,http://localhost:3000` |
//! | `RATE_LIMIT_ENABLED` | `true` |
//! | `RATE_LIMIT_REQUESTS` | `100` |
//! | `RATE_LIMIT_PERIOD_SECS` | `60` |
//! | `DB_MAX_CONNECTIONS` | `10` |

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use tracing::warn;

use meetnote_core::defaults;
use meetnote_core::{Error, Result};

/// Where meeting records live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(Error::Config(format!(
                "Unknown STORAGE_BACKEND '{}' (expected 'postgres' or 'memory')",
                other
            ))),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => f.write_str("postgres"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Runtime settings for the API server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub database_url: String,
    pub storage_backend: StorageBackend,
    pub host: String,
    pub port: u16,
    /// Comma-separated CORS allow-list.
    pub allowed_origins: String,
    pub rate_limit_enabled: bool,
    pub rate_limit_requests: u32,
    pub rate_limit_period_secs: u64,
    pub db_max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: defaults::DATABASE_URL.to_string(),
            storage_backend: StorageBackend::Postgres,
            host: defaults::HOST.to_string(),
            port: defaults::SERVER_PORT,
            allowed_origins: defaults::ALLOWED_ORIGINS.to_string(),
            rate_limit_enabled: true,
            rate_limit_requests: defaults::RATE_LIMIT_REQUESTS,
            rate_limit_period_secs: defaults::RATE_LIMIT_PERIOD_SECS,
            db_max_connections: defaults::DB_MAX_CONNECTIONS,
        }
    }
}

/// Parse a positive number, falling back to `default` with a warning.
fn parse_positive<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + PartialEq + Default + fmt::Display + Copy,
{
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(v) if v != T::default() => v,
        _ => {
            warn!(
                subsystem = "api",
                component = "config",
                key,
                value = %raw,
                fallback = %default,
                "Invalid numeric setting, using default"
            );
            default
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::default();

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => base.storage_backend,
        };

        let port_raw = lookup("SERVER_PORT").or_else(|| lookup("PORT"));

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(base.database_url),
            storage_backend,
            host: lookup("HOST").unwrap_or(base.host),
            port: parse_positive("SERVER_PORT", port_raw, base.port),
            allowed_origins: lookup("ALLOWED_ORIGINS").unwrap_or(base.allowed_origins),
            rate_limit_enabled: lookup("RATE_LIMIT_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(base.rate_limit_enabled),
            rate_limit_requests: parse_positive(
                "RATE_LIMIT_REQUESTS",
                lookup("RATE_LIMIT_REQUESTS"),
                base.rate_limit_requests,
            ),
            rate_limit_period_secs: parse_positive(
                "RATE_LIMIT_PERIOD_SECS",
                lookup("RATE_LIMIT_PERIOD_SECS"),
                base.rate_limit_period_secs,
            ),
            db_max_connections: parse_positive(
                "DB_MAX_CONNECTIONS",
                lookup("DB_MAX_CONNECTIONS"),
                base.db_max_connections,
            ),
        })
    }

    /// Socket address to bind.
    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| Error::Config(format!("Invalid bind address: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 2022);
        assert_eq!(config.storage_backend, StorageBackend::Postgres);
        assert_eq!(config.addr().unwrap().to_string(), "0.0.0.0:2022");
    }

    #[test]
    fn test_port_alias_and_precedence() {
        assert_eq!(config_from(&[("PORT", "8080")]).unwrap().port, 8080);
        let config = config_from(&[("PORT", "8080"), ("SERVER_PORT", "9090")]).unwrap();
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = config_from(&[
            ("SERVER_PORT", "not-a-port"),
            ("RATE_LIMIT_REQUESTS", "0"),
            ("RATE_LIMIT_PERIOD_SECS", "-5"),
        ])
        .unwrap();
        assert_eq!(config.port, 2022);
        assert_eq!(config.rate_limit_requests, 100);
        assert_eq!(config.rate_limit_period_secs, 60);
    }

    #[test]
    fn test_storage_backend() {
        let config = config_from(&[("STORAGE_BACKEND", "Memory")]).unwrap();
        assert_eq!(config.storage_backend, StorageBackend::Memory);

        let err = config_from(&[("STORAGE_BACKEND", "sqlite")]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rate_limit_toggle() {
        assert!(!config_from(&[("RATE_LIMIT_ENABLED", "false")])
            .unwrap()
            .rate_limit_enabled);
        assert!(config_from(&[("RATE_LIMIT_ENABLED", "1")])
            .unwrap()
            .rate_limit_enabled);
    }
}
