//! Repository for the `interviews` table.

use kiroku_core::interview::like_pattern;
use kiroku_core::types::DbId;
use sqlx::PgPool;

use crate::models::interview::{Interview, InterviewFields};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, interviewee_name, interview_date, content, summary, created_at, updated_at";

/// Listing order: newest interview date first, then newest row.
const ORDER_BY: &str = "ORDER BY interview_date DESC, id DESC";

/// Provides CRUD and keyword search for interviews.
pub struct InterviewRepo;

impl InterviewRepo {
    /// Insert a new interview, returning the created row.
    pub async fn create(pool: &PgPool, input: &InterviewFields) -> Result<Interview, sqlx::Error> {
        let query = format!(
            "INSERT INTO interviews (interviewee_name, interview_date, content, summary)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Interview>(&query)
            .bind(&input.interviewee_name)
            .bind(input.interview_date)
            .bind(&input.content)
            .bind(&input.summary)
            .fetch_one(pool)
            .await
    }

    /// Find an interview by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Interview>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM interviews WHERE id = $1");
        sqlx::query_as::<_, Interview>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every interview, newest interview date first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Interview>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM interviews {ORDER_BY}");
        sqlx::query_as::<_, Interview>(&query).fetch_all(pool).await
    }

    /// Case-insensitive substring search across name, content and summary.
    ///
    /// Sequential scan over the whole table; there is no index backing
    /// `LOWER(...) LIKE LOWER('%...%')`. Both sides are folded by the
    /// database so non-ASCII case matching follows its collation.
    pub async fn search(pool: &PgPool, keyword: &str) -> Result<Vec<Interview>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM interviews
             WHERE LOWER(interviewee_name) LIKE LOWER($1) ESCAPE '\\'
                OR LOWER(content) LIKE LOWER($1) ESCAPE '\\'
                OR LOWER(summary) LIKE LOWER($1) ESCAPE '\\'
             {ORDER_BY}"
        );
        sqlx::query_as::<_, Interview>(&query)
            .bind(like_pattern(keyword))
            .fetch_all(pool)
            .await
    }

    /// Replace all four mutable fields and stamp `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &InterviewFields,
    ) -> Result<Option<Interview>, sqlx::Error> {
        let query = format!(
            "UPDATE interviews SET
                interviewee_name = $2,
                interview_date = $3,
                content = $4,
                summary = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Interview>(&query)
            .bind(id)
            .bind(&input.interviewee_name)
            .bind(input.interview_date)
            .bind(&input.content)
            .bind(&input.summary)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete an interview. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM interviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of stored interviews.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM interviews")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
