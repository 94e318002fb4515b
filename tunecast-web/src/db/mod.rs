//! Submission store
//!
//! Every request works through exactly one `StoreSession`: opened before the
//! first insert, closed once after the last query, on success and failure
//! alike. The orchestrator owns that discipline; this module only provides
//! the session and its operations.

pub mod submissions;

pub use submissions::SqliteSubmissionStore;

use async_trait::async_trait;
use tunecast_common::models::{StoredSubmission, UserSubmission};
use tunecast_common::Result;
use uuid::Uuid;

/// Opens request-scoped store sessions
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn open_session(&self) -> Result<Box<dyn StoreSession>>;
}

/// A connection held for the duration of one request
#[async_trait]
pub trait StoreSession: Send {
    /// Write one submission and return its generated id
    async fn insert(&mut self, submission: &UserSubmission) -> Result<Uuid>;

    /// Submissions whose genre equals `genre` exactly, in insertion order
    async fn find_by_genre(&mut self, genre: &str) -> Result<Vec<StoredSubmission>>;

    /// Every stored submission, in insertion order
    async fn find_all(&mut self) -> Result<Vec<StoredSubmission>>;

    /// Release the connection; consumes the session so it cannot be reused
    async fn close(self: Box<Self>) -> Result<()>;
}
