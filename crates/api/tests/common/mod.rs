#![allow(dead_code)]

use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use kiroku_core::types::DbId;
use kiroku_db::models::interview::{Interview, InterviewFields};
use kiroku_db::pool::{PoolProvider, PoolSettings};
use kiroku_db::store::{InterviewStore, PgInterviewStore};
use sqlx::PgPool;
use tower::ServiceExt;

use kiroku_api::app::build_app;
use kiroku_api::config::ServerConfig;
use kiroku_api::state::AppState;

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// `InterviewStore` backed by a `Vec`, counting every call that reaches it.
///
/// Only for tests that watch store access or inject failures. It does not
/// search or sort; behaviour of the real queries is covered by the
/// Postgres-backed suite.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Interview>>,
    next_id: Mutex<DbId>,
    calls: AtomicUsize,
    fail: bool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A store whose every operation fails like a lost connection.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    /// Number of store operations invoked so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    fn enter(&self) -> Result<(), sqlx::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl InterviewStore for MemoryStore {
    async fn list(&self, _keyword: Option<&str>) -> Result<Vec<Interview>, sqlx::Error> {
        self.enter()?;
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Interview>, sqlx::Error> {
        self.enter()?;
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, input: &InterviewFields) -> Result<Interview, sqlx::Error> {
        self.enter()?;
        let id = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            *next
        };
        let now = chrono::Utc::now();
        let row = Interview {
            id,
            interviewee_name: input.interviewee_name.clone(),
            interview_date: input.interview_date,
            content: input.content.clone(),
            summary: input.summary.clone(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: DbId,
        input: &InterviewFields,
    ) -> Result<Option<Interview>, sqlx::Error> {
        self.enter()?;
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        row.interviewee_name = input.interviewee_name.clone();
        row.interview_date = input.interview_date;
        row.content = input.content.clone();
        row.summary = input.summary.clone();
        row.updated_at = chrono::Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        self.enter()?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id != id);
        Ok(rows.len() < before)
    }

    async fn health_check(&self) -> Result<(), sqlx::Error> {
        self.enter()
    }
}

// ---------------------------------------------------------------------------
// App builders
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(database_url: Option<&str>) -> ServerConfig {
    ServerConfig {
        host: IpAddr::from([127, 0, 0, 1]),
        port: 0,
        cors_origins: vec!["http://localhost:5173".parse().unwrap()],
        request_timeout_secs: 30,
        database_url: database_url.map(str::to_string),
        pool: PoolSettings::default(),
        run_migrations: false,
    }
}

const TEST_DATABASE_URL: &str = "postgres://kiroku@localhost/kiroku_test";

/// Build the full application router over the given database pool.
///
/// Goes through the same `PgInterviewStore` and middleware stack that
/// `main.rs` wires up, so requests exercise the production SQL.
pub fn build_test_app(pool: PgPool) -> Router {
    let provider = Arc::new(PoolProvider::from_pool(pool));
    let store: Arc<dyn InterviewStore> = Arc::new(PgInterviewStore::new(provider));
    build_app(AppState::new(test_config(Some(TEST_DATABASE_URL)), Some(store)))
}

/// Full router with a configured connection string, backed by `store`.
pub fn build_mock_app(store: Arc<MemoryStore>) -> Router {
    build_app(AppState::new(
        test_config(Some(TEST_DATABASE_URL)),
        Some(store as Arc<dyn InterviewStore>),
    ))
}

/// Full router with no connection string; `store` must never be reached.
pub fn build_unconfigured_app(store: Arc<MemoryStore>) -> Router {
    build_app(AppState::new(
        test_config(None),
        Some(store as Arc<dyn InterviewStore>),
    ))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<String>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json)
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(json.to_string())).await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(json.to_string())).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create an interview through the API and return its id.
pub async fn create_interview(app: Router, name: &str, date: &str, content: &str) -> i64 {
    let response = post_json(
        app,
        "/api/interviews",
        serde_json::json!({
            "interviewee_name": name,
            "interview_date": date,
            "content": content,
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
