//! Connectivity and schema check for the interviews database.
//!
//! Reads `DATABASE_URL` (from the environment or `.env`), connects, and
//! reports whether the `interviews` table exists, how many rows it holds,
//! and its column layout. Exits non-zero on any failure.

use std::process::ExitCode;

use kiroku_db::pool::{PoolProvider, PoolSettings};
use kiroku_db::repositories::InterviewRepo;
use kiroku_db::DbPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(sqlx::FromRow)]
struct ColumnInfo {
    column_name: String,
    data_type: String,
    is_nullable: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kiroku_db_check=info,kiroku_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Some(database_url) = std::env::var("DATABASE_URL").ok().filter(|u| !u.is_empty()) else {
        tracing::error!("DATABASE_URL is not set");
        return ExitCode::FAILURE;
    };

    let provider = PoolProvider::new(database_url, PoolSettings::default());
    let result = match provider.pool().await {
        Ok(pool) => check(&pool).await,
        Err(e) => Err(e),
    };
    provider.teardown().await;

    match result {
        Ok(()) => {
            tracing::info!("Database check completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Database check failed");
            ExitCode::FAILURE
        }
    }
}

async fn check(pool: &DbPool) -> Result<(), sqlx::Error> {
    kiroku_db::health_check(pool).await?;
    tracing::info!("Connected to database");

    let (exists,): (bool,) = sqlx::query_as(
        "SELECT EXISTS (
             SELECT FROM information_schema.tables
             WHERE table_schema = 'public' AND table_name = 'interviews'
         )",
    )
    .fetch_one(pool)
    .await?;

    if !exists {
        tracing::warn!("Table \"interviews\" does not exist; start the API with RUN_MIGRATIONS=true");
        return Ok(());
    }
    tracing::info!("Table \"interviews\" exists");

    let count = InterviewRepo::count(pool).await?;
    tracing::info!(count, "Interview records");

    let columns: Vec<ColumnInfo> = sqlx::query_as(
        "SELECT column_name::text AS column_name,
                data_type::text AS data_type,
                is_nullable::text AS is_nullable
         FROM information_schema.columns
         WHERE table_schema = 'public' AND table_name = 'interviews'
         ORDER BY ordinal_position",
    )
    .fetch_all(pool)
    .await?;

    for col in &columns {
        tracing::info!(
            column = %col.column_name,
            data_type = %col.data_type,
            nullable = %col.is_nullable,
            "Column"
        );
    }

    Ok(())
}
