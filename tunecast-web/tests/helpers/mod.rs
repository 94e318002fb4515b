//! Shared test helpers: temporary store, stub catalog collaborators and a
//! store wrapper that counts session opens and closes.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tunecast_common::config::RelatedUsersScope;
use tunecast_common::models::{AccessToken, Artist, StoredSubmission, Track, UserSubmission};
use tunecast_common::Result;
use tunecast_web::db::{SqliteSubmissionStore, StoreSession, SubmissionStore};
use tunecast_web::services::{
    CatalogError, CredentialError, CredentialExchanger, SubmissionOrchestrator, TrackCatalog,
};
use tunecast_web::{build_router, AppState};
use uuid::Uuid;

/// Fresh file-backed SQLite store in a temporary directory
pub async fn temp_store() -> (TempDir, sqlx::SqlitePool) {
    let dir = tempfile::tempdir().expect("temp dir");
    let url = format!("sqlite://{}", dir.path().join("tunecast.db").display());
    let pool = tunecast_common::db::init_database(&url, 2)
        .await
        .expect("init test database");
    (dir, pool)
}

/// Insert a submission outside of the workflow
pub async fn seed(pool: &sqlx::SqlitePool, name: &str, genre: &str) {
    let store = SqliteSubmissionStore::new(pool.clone());
    let mut session = store.open_session().await.expect("open session");
    session
        .insert(&UserSubmission::new(name, genre, "30").expect("valid submission"))
        .await
        .expect("seed insert");
    session.close().await.expect("close session");
}

pub async fn count_rows(pool: &sqlx::SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM user_submissions")
        .fetch_one(pool)
        .await
        .expect("count rows")
}

pub fn song_a() -> Track {
    Track {
        name: "Song A".to_string(),
        artists: vec![Artist {
            name: "Artist X".to_string(),
        }],
    }
}

/// Credential exchanger returning a fixed token or a fixed failure
#[derive(Default)]
pub struct StubExchanger {
    pub fail: bool,
    pub calls: AtomicUsize,
}

#[async_trait]
impl CredentialExchanger for StubExchanger {
    async fn exchange(&self) -> std::result::Result<AccessToken, CredentialError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(CredentialError::ApiError(
                400,
                r#"{"error":"invalid_client"}"#.to_string(),
            ))
        } else {
            Ok(AccessToken::new("stub-token"))
        }
    }
}

/// Catalog returning canned tracks or a fixed failure
#[derive(Default)]
pub struct StubCatalog {
    pub tracks: Vec<Track>,
    pub fail: bool,
    pub calls: AtomicUsize,
}

#[async_trait]
impl TrackCatalog for StubCatalog {
    async fn top_tracks(
        &self,
        _genre: &str,
        token: &AccessToken,
    ) -> std::result::Result<Vec<Track>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(token.as_str(), "stub-token");
        if self.fail {
            Err(CatalogError::ApiError(502, "upstream unavailable".to_string()))
        } else {
            Ok(self.tracks.clone())
        }
    }
}

/// Wraps the SQLite store and records how sessions are used
pub struct CountingStore {
    inner: SqliteSubmissionStore,
    pub opens: Arc<AtomicUsize>,
    pub closes: Arc<AtomicUsize>,
    pub fail_open: bool,
    pub fail_insert: bool,
    pub fail_lookup: bool,
}

impl CountingStore {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self {
            inner: SqliteSubmissionStore::new(pool),
            opens: Arc::new(AtomicUsize::new(0)),
            closes: Arc::new(AtomicUsize::new(0)),
            fail_open: false,
            fail_insert: false,
            fail_lookup: false,
        }
    }
}

#[async_trait]
impl SubmissionStore for CountingStore {
    async fn open_session(&self) -> Result<Box<dyn StoreSession>> {
        if self.fail_open {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        let inner = self.inner.open_session().await?;
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingSession {
            inner,
            closes: self.closes.clone(),
            fail_insert: self.fail_insert,
            fail_lookup: self.fail_lookup,
        }))
    }
}

struct CountingSession {
    inner: Box<dyn StoreSession>,
    closes: Arc<AtomicUsize>,
    fail_insert: bool,
    fail_lookup: bool,
}

#[async_trait]
impl StoreSession for CountingSession {
    async fn insert(&mut self, submission: &UserSubmission) -> Result<Uuid> {
        if self.fail_insert {
            return Err(sqlx::Error::PoolClosed.into());
        }
        self.inner.insert(submission).await
    }

    async fn find_by_genre(&mut self, genre: &str) -> Result<Vec<StoredSubmission>> {
        if self.fail_lookup {
            return Err(sqlx::Error::PoolClosed.into());
        }
        self.inner.find_by_genre(genre).await
    }

    async fn find_all(&mut self) -> Result<Vec<StoredSubmission>> {
        if self.fail_lookup {
            return Err(sqlx::Error::PoolClosed.into());
        }
        self.inner.find_all().await
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.inner.close().await
    }
}

/// Router wired to the given collaborators
pub fn test_app(
    store: Arc<CountingStore>,
    exchanger: Arc<StubExchanger>,
    catalog: Arc<StubCatalog>,
    scope: RelatedUsersScope,
    static_dir: &Path,
) -> axum::Router {
    let orchestrator = SubmissionOrchestrator::new(store, exchanger, catalog, scope);
    build_router(AppState::new(Arc::new(orchestrator), static_dir.to_path_buf()))
}

/// URL-encoded POST /users request
pub fn submit_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_text(body: Body) -> String {
    use http_body_util::BodyExt;
    let bytes = body.collect().await.expect("read body").to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
