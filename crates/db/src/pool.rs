//! Lazily initialized connection pool with explicit teardown.
//!
//! One [`PoolProvider`] is created per process from the configured
//! connection string and shared through application state. The pool itself
//! is built on first use and memoized; [`PoolProvider::teardown`] closes it
//! and clears the slot so a later access builds a fresh one.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tokio::sync::RwLock;

use crate::DbPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Default time to wait for a free connection.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(2);

/// Default time an unused connection stays open.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Pool sizing and timeout settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

/// Owns the process-wide pool handle.
pub struct PoolProvider {
    /// `None` for providers wrapping a caller-built pool; those cannot
    /// rebuild after teardown.
    database_url: Option<String>,
    settings: PoolSettings,
    slot: RwLock<Option<DbPool>>,
}

impl PoolProvider {
    /// Create a provider. No connection is attempted until [`PoolProvider::pool`].
    pub fn new(database_url: impl Into<String>, settings: PoolSettings) -> Self {
        Self {
            database_url: Some(database_url.into()),
            settings,
            slot: RwLock::new(None),
        }
    }

    /// Wrap an already-built pool, e.g. the per-test pool from `sqlx::test`.
    pub fn from_pool(pool: DbPool) -> Self {
        let settings = PoolSettings {
            max_connections: pool.options().get_max_connections(),
            acquire_timeout: pool.options().get_acquire_timeout(),
            idle_timeout: pool
                .options()
                .get_idle_timeout()
                .unwrap_or(DEFAULT_IDLE_TIMEOUT),
        };
        Self {
            database_url: None,
            settings,
            slot: RwLock::new(Some(pool)),
        }
    }

    pub fn settings(&self) -> PoolSettings {
        self.settings
    }

    /// Return the shared pool, building it on first call.
    ///
    /// Building is lazy: connections are opened when a query first needs
    /// one, so this only fails on a malformed connection string.
    pub async fn pool(&self) -> Result<DbPool, sqlx::Error> {
        if let Some(pool) = self.slot.read().await.as_ref() {
            return Ok(pool.clone());
        }

        let mut slot = self.slot.write().await;
        // Another task may have filled the slot while we waited.
        if let Some(pool) = slot.as_ref() {
            return Ok(pool.clone());
        }

        let Some(url) = self.database_url.as_deref() else {
            return Err(sqlx::Error::PoolClosed);
        };
        let options: PgConnectOptions = url.parse()?;
        let pool = PgPoolOptions::new()
            .max_connections(self.settings.max_connections)
            .acquire_timeout(self.settings.acquire_timeout)
            .idle_timeout(Some(self.settings.idle_timeout))
            .connect_lazy_with(options);

        tracing::debug!(
            max_connections = self.settings.max_connections,
            "Database connection pool created"
        );
        *slot = Some(pool.clone());
        Ok(pool)
    }

    /// Whether a pool is currently held.
    pub async fn is_initialized(&self) -> bool {
        self.slot.read().await.is_some()
    }

    /// Close the pool, if any, and reset the slot.
    pub async fn teardown(&self) {
        let pool = self.slot.write().await.take();
        if let Some(pool) = pool {
            pool.close().await;
            tracing::info!("Database connection pool closed");
        }
    }
}
