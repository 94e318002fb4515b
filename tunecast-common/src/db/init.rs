//! Database initialization
//!
//! Opens (or creates) the SQLite database named by the store connection
//! string and creates the submissions table if it does not exist yet.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// The one logical collection of user submissions
pub const SUBMISSIONS_TABLE: &str = "user_submissions";

/// Initialize the connection pool and create tables if needed
pub async fn init_database(connection_string: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(connection_string)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    // Create parent directory for file-backed databases
    let filename = options.get_filename().to_path_buf();
    if let Some(parent) = filename.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let newly_created = !filename.exists();

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", filename.display());
    } else {
        info!("Opened existing database: {}", filename.display());
    }

    create_submissions_table(&pool).await?;

    Ok(pool)
}

/// Create the user_submissions table
///
/// No secondary indexes; insertion order is the rowid order.
async fn create_submissions_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_submissions (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            genre TEXT NOT NULL CHECK (genre <> ''),
            age TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    debug!("Table {} ready", SUBMISSIONS_TABLE);
    Ok(())
}
