//! SQLite-backed submission store

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqlitePool};
use tunecast_common::models::{StoredSubmission, UserSubmission};
use tunecast_common::{Error, Result};
use uuid::Uuid;

use super::{StoreSession, SubmissionStore};

type SubmissionRow = (String, String, String, String, DateTime<Utc>);

/// Store backed by the shared SQLite pool
#[derive(Clone)]
pub struct SqliteSubmissionStore {
    pool: SqlitePool,
}

impl SqliteSubmissionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for SqliteSubmissionStore {
    async fn open_session(&self) -> Result<Box<dyn StoreSession>> {
        let conn = self.pool.acquire().await?;
        tracing::debug!("Store session opened");
        Ok(Box::new(SqliteSession { conn }))
    }
}

/// One pooled connection checked out for a request
pub struct SqliteSession {
    conn: PoolConnection<Sqlite>,
}

#[async_trait]
impl StoreSession for SqliteSession {
    async fn insert(&mut self, submission: &UserSubmission) -> Result<Uuid> {
        let guid = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO user_submissions (guid, name, genre, age, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(guid.to_string())
        .bind(&submission.name)
        .bind(&submission.genre)
        .bind(&submission.age)
        .bind(Utc::now())
        .execute(&mut *self.conn)
        .await?;

        tracing::info!(guid = %guid, genre = %submission.genre, "New submission stored");
        Ok(guid)
    }

    async fn find_by_genre(&mut self, genre: &str) -> Result<Vec<StoredSubmission>> {
        // `=` on TEXT uses BINARY collation: exact, case-sensitive
        let rows = sqlx::query_as::<_, SubmissionRow>(
            "SELECT guid, name, genre, age, created_at FROM user_submissions
             WHERE genre = ?
             ORDER BY rowid ASC",
        )
        .bind(genre)
        .fetch_all(&mut *self.conn)
        .await?;

        rows.into_iter().map(into_stored).collect()
    }

    async fn find_all(&mut self) -> Result<Vec<StoredSubmission>> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            "SELECT guid, name, genre, age, created_at FROM user_submissions
             ORDER BY rowid ASC",
        )
        .fetch_all(&mut *self.conn)
        .await?;

        rows.into_iter().map(into_stored).collect()
    }

    async fn close(self: Box<Self>) -> Result<()> {
        // Dropping the pooled connection hands it back to the pool
        let SqliteSession { conn } = *self;
        drop(conn);
        tracing::debug!("Store session closed");
        Ok(())
    }
}

fn into_stored(row: SubmissionRow) -> Result<StoredSubmission> {
    let (guid, name, genre, age, created_at) = row;
    let guid = Uuid::parse_str(&guid)
        .map_err(|e| Error::Database(sqlx::Error::Decode(Box::new(e))))?;
    Ok(StoredSubmission {
        guid,
        name,
        genre,
        age,
        created_at,
    })
}
