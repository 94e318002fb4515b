//! Client-credentials token exchange
//!
//! Trades the configured client id and secret for a short-lived bearer
//! token. The id/secret pair travels as HTTP Basic auth and the body carries
//! `grant_type=client_credentials`. Tokens are not cached; every submission
//! performs a fresh exchange and nothing is retried.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tunecast_common::config::CatalogConfig;
use tunecast_common::models::AccessToken;

/// Credential exchange errors
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Token endpoint unreachable or connection dropped
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Token endpoint answered with a non-success status; carries its payload
    #[error("Token endpoint error {0}: {1}")]
    ApiError(u16, String),

    /// Response body did not match the token schema
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Source of bearer tokens for the catalog API
#[async_trait]
pub trait CredentialExchanger: Send + Sync {
    /// Exchange the configured credentials for a bearer token
    async fn exchange(&self) -> Result<AccessToken, CredentialError>;
}

/// Token endpoint response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    /// Seconds; logged only, no expiry tracking
    #[serde(default)]
    expires_in: Option<u64>,
}

/// Client-credentials grant against a fixed token endpoint
pub struct ClientCredentialsExchanger {
    http_client: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl ClientCredentialsExchanger {
    pub fn new(http_client: reqwest::Client, config: &CatalogConfig) -> Self {
        Self {
            http_client,
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }
}

#[async_trait]
impl CredentialExchanger for ClientCredentialsExchanger {
    async fn exchange(&self) -> Result<AccessToken, CredentialError> {
        tracing::debug!(token_url = %self.token_url, "Requesting access token");

        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| CredentialError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CredentialError::ApiError(status.as_u16(), error_text));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CredentialError::ParseError(e.to_string()))?;

        if token.access_token.trim().is_empty() {
            return Err(CredentialError::ParseError(
                "token endpoint returned an empty access_token".to_string(),
            ));
        }

        tracing::debug!(
            token_type = token.token_type.as_deref().unwrap_or("unknown"),
            expires_in = token.expires_in,
            "Access token obtained"
        );

        Ok(AccessToken::new(token.access_token))
    }
}
