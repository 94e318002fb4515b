//! Music catalog search client
//!
//! Looks up tracks for a genre using the catalog's search endpoint:
//! `GET {api_base_url}/search?q=genre:{genre}&type=track&limit={n}` with the
//! bearer token from the credential exchange.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tunecast_common::config::CatalogConfig;
use tunecast_common::models::{AccessToken, Artist, Track};

/// Catalog search errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Search API error {0}: {1}")]
    ApiError(u16, String),

    /// Body missing `tracks.items` or otherwise not the search schema
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Track lookup by genre
#[async_trait]
pub trait TrackCatalog: Send + Sync {
    /// Top tracks for `genre`, in the order the catalog ranks them
    async fn top_tracks(&self, genre: &str, token: &AccessToken) -> Result<Vec<Track>, CatalogError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: TrackPage,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    items: Vec<TrackItem>,
}

#[derive(Debug, Deserialize)]
struct TrackItem {
    name: String,
    artists: Vec<ArtistItem>,
}

#[derive(Debug, Deserialize)]
struct ArtistItem {
    name: String,
}

impl From<TrackItem> for Track {
    fn from(item: TrackItem) -> Self {
        Track {
            name: item.name,
            artists: item
                .artists
                .into_iter()
                .map(|a| Artist { name: a.name })
                .collect(),
        }
    }
}

/// Search endpoint client
pub struct CatalogClient {
    http_client: reqwest::Client,
    search_url: String,
    limit: u32,
}

impl CatalogClient {
    pub fn new(http_client: reqwest::Client, config: &CatalogConfig) -> Self {
        Self {
            http_client,
            search_url: format!("{}/search", config.api_base_url.trim_end_matches('/')),
            limit: config.search_limit,
        }
    }

    fn genre_query(genre: &str) -> String {
        format!("genre:{}", genre)
    }
}

#[async_trait]
impl TrackCatalog for CatalogClient {
    async fn top_tracks(&self, genre: &str, token: &AccessToken) -> Result<Vec<Track>, CatalogError> {
        let query = Self::genre_query(genre);
        let limit = self.limit.to_string();

        tracing::debug!(genre = %genre, limit = self.limit, "Searching catalog");

        let response = self
            .http_client
            .get(&self.search_url)
            .bearer_auth(token.as_str())
            .query(&[("q", query.as_str()), ("type", "track"), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| CatalogError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError(status.as_u16(), error_text));
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::ParseError(e.to_string()))?;

        let tracks: Vec<Track> = search
            .tracks
            .items
            .into_iter()
            .take(self.limit as usize)
            .map(Track::from)
            .collect();

        tracing::info!(genre = %genre, count = tracks.len(), "Catalog search complete");

        Ok(tracks)
    }
}
