//! Store abstraction consumed by the HTTP layer.
//!
//! [`PgInterviewStore`] is the production implementation; tests substitute
//! an in-memory store to observe how often the store is reached.

use std::sync::Arc;

use async_trait::async_trait;
use kiroku_core::types::DbId;

use crate::models::interview::{Interview, InterviewFields};
use crate::pool::PoolProvider;
use crate::repositories::InterviewRepo;

/// Every operation is a single statement against the store.
#[async_trait]
pub trait InterviewStore: Send + Sync {
    /// All interviews, or those matching `keyword` when one is given.
    async fn list(&self, keyword: Option<&str>) -> Result<Vec<Interview>, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Interview>, sqlx::Error>;

    async fn create(&self, input: &InterviewFields) -> Result<Interview, sqlx::Error>;

    /// `None` when no row matched `id`; nothing is written in that case.
    async fn update(
        &self,
        id: DbId,
        input: &InterviewFields,
    ) -> Result<Option<Interview>, sqlx::Error>;

    /// `false` when no row matched `id`.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    async fn health_check(&self) -> Result<(), sqlx::Error>;
}

/// PostgreSQL-backed store sharing the process-wide [`PoolProvider`].
#[derive(Clone)]
pub struct PgInterviewStore {
    provider: Arc<PoolProvider>,
}

impl PgInterviewStore {
    pub fn new(provider: Arc<PoolProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl InterviewStore for PgInterviewStore {
    async fn list(&self, keyword: Option<&str>) -> Result<Vec<Interview>, sqlx::Error> {
        let pool = self.provider.pool().await?;
        match keyword {
            Some(keyword) => InterviewRepo::search(&pool, keyword).await,
            None => InterviewRepo::list(&pool).await,
        }
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Interview>, sqlx::Error> {
        let pool = self.provider.pool().await?;
        InterviewRepo::find_by_id(&pool, id).await
    }

    async fn create(&self, input: &InterviewFields) -> Result<Interview, sqlx::Error> {
        let pool = self.provider.pool().await?;
        InterviewRepo::create(&pool, input).await
    }

    async fn update(
        &self,
        id: DbId,
        input: &InterviewFields,
    ) -> Result<Option<Interview>, sqlx::Error> {
        let pool = self.provider.pool().await?;
        InterviewRepo::update(&pool, id, input).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let pool = self.provider.pool().await?;
        InterviewRepo::delete(&pool, id).await
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        let pool = self.provider.pool().await?;
        crate::health_check(&pool).await
    }
}
