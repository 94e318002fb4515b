//! Services behind the submission endpoint
//!
//! - `credential_exchanger`: client-credentials token exchange
//! - `catalog_client`: genre track search
//! - `orchestrator`: the per-submission workflow tying store, token,
//!   search and rendering together

pub mod catalog_client;
pub mod credential_exchanger;
pub mod orchestrator;

pub use catalog_client::{CatalogClient, CatalogError, TrackCatalog};
pub use credential_exchanger::{ClientCredentialsExchanger, CredentialError, CredentialExchanger};
pub use orchestrator::SubmissionOrchestrator;

use std::time::Duration;
use tunecast_common::config::CatalogConfig;

const USER_AGENT: &str = concat!("tunecast/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by the token and search clients
pub fn build_http_client(config: &CatalogConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
}
