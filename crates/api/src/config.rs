use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use axum::http::HeaderValue;
use kiroku_db::pool::PoolSettings;

/// Errors raised while reading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// A missing `DATABASE_URL` is not an error: the server starts and every
/// interview route answers 503 until it is configured.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL connection string. `None` when unset or empty.
    pub database_url: Option<String>,
    /// Connection pool limits.
    pub pool: PoolSettings,
    /// Apply embedded migrations at startup (default: `true`).
    pub run_migrations: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `DATABASE_URL`            | unset                      |
    /// | `DB_MAX_CONNECTIONS`      | `20`                       |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `2`                        |
    /// | `DB_IDLE_TIMEOUT_SECS`    | `30`                       |
    /// | `RUN_MIGRATIONS`          | `true`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host: IpAddr = parse_or(
            &lookup,
            "HOST",
            IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            "IP address",
        )?;

        let port: u16 = parse_or(&lookup, "PORT", 3000, "u16")?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|_| ConfigError::InvalidCorsOrigin(o.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30, "u64")?;

        let database_url = lookup("DATABASE_URL")
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        let defaults = PoolSettings::default();
        let pool = PoolSettings {
            max_connections: parse_or(
                &lookup,
                "DB_MAX_CONNECTIONS",
                defaults.max_connections,
                "u32",
            )?,
            acquire_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout.as_secs(),
                "u64",
            )?),
            idle_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_IDLE_TIMEOUT_SECS",
                defaults.idle_timeout.as_secs(),
                "u64",
            )?),
        };

        let run_migrations: bool = parse_or(&lookup, "RUN_MIGRATIONS", true, "bool")?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            pool,
            run_migrations,
        })
    }

    /// Whether a store connection string is present.
    pub fn is_database_configured(&self) -> bool {
        self.database_url.is_some()
    }
}

fn parse_or<F, T>(
    lookup: &F,
    key: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value: raw,
        }),
    }
}
