//! Data models shared across tunecast
//!
//! `UserSubmission` is what a visitor posts, `StoredSubmission` is the same
//! record read back from the store, `Track` comes from the music catalog.

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Upper bound accepted for the `age` form field
pub const MAX_AGE: u32 = 150;

/// A validated visitor submission, immutable once constructed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSubmission {
    pub name: String,
    pub genre: String,
    /// Kept as the submitted (trimmed) text; only checked to be numeric
    pub age: String,
}

impl UserSubmission {
    /// Validate raw form values and build a submission
    ///
    /// Every stored submission must carry a non-empty genre since the genre
    /// is later used as an exact-match filter key.
    pub fn new(name: &str, genre: &str, age: &str) -> Result<Self> {
        let name = name.trim();
        let genre = genre.trim();
        let age = age.trim();

        if name.is_empty() {
            return Err(Error::InvalidSubmission("name must not be empty".to_string()));
        }
        if genre.is_empty() {
            return Err(Error::InvalidSubmission("genre must not be empty".to_string()));
        }
        match age.parse::<u32>() {
            Ok(years) if years <= MAX_AGE => {}
            _ => {
                return Err(Error::InvalidSubmission(format!(
                    "age must be a whole number between 0 and {}",
                    MAX_AGE
                )))
            }
        }

        Ok(Self {
            name: name.to_string(),
            genre: genre.to_string(),
            age: age.to_string(),
        })
    }
}

/// A submission as read back from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSubmission {
    pub guid: Uuid,
    pub name: String,
    pub genre: String,
    pub age: String,
    pub created_at: DateTime<Utc>,
}

/// Artist credit on a catalog track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
}

/// A track returned by the catalog search, never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    /// Artist credits in catalog order
    pub artists: Vec<Artist>,
}

impl Track {
    /// Artist names joined with ", " in catalog order
    pub fn artist_line(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Opaque bearer token from the client-credentials exchange
///
/// No expiry is tracked; a fresh token is exchanged per submission.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}
