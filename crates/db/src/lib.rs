//! PostgreSQL persistence for interview records.
//!
//! - [`pool::PoolProvider`] owns the lazily created connection pool.
//! - [`repositories::InterviewRepo`] holds the SQL.
//! - [`store::InterviewStore`] is the seam the HTTP layer depends on.

use sqlx::migrate::MigrateError;

pub mod models;
pub mod pool;
pub mod repositories;
pub mod store;

pub type DbPool = sqlx::PgPool;

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
