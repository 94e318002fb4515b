//! Submission workflow
//!
//! For one validated submission, strictly in order:
//! 1. persist the submission
//! 2. exchange credentials for a bearer token
//! 3. search the catalog for the genre's top tracks
//! 4. read back related submissions
//! 5. render the results page
//!
//! The first failing step ends the workflow; no partial page is produced.
//! The store session is opened before step 1 and closed exactly once after
//! step 4 whatever the outcome. A submission written in step 1 stays stored
//! when a later step fails.

use std::sync::Arc;
use tracing::{debug, warn};
use tunecast_common::config::RelatedUsersScope;
use tunecast_common::models::{StoredSubmission, Track, UserSubmission};

use crate::db::{StoreSession, SubmissionStore};
use crate::error::SubmissionError;
use crate::render::{self, RenderedPage};
use crate::services::{CredentialExchanger, TrackCatalog};

pub struct SubmissionOrchestrator {
    store: Arc<dyn SubmissionStore>,
    credentials: Arc<dyn CredentialExchanger>,
    catalog: Arc<dyn TrackCatalog>,
    related_users: RelatedUsersScope,
}

impl SubmissionOrchestrator {
    pub fn new(
        store: Arc<dyn SubmissionStore>,
        credentials: Arc<dyn CredentialExchanger>,
        catalog: Arc<dyn TrackCatalog>,
        related_users: RelatedUsersScope,
    ) -> Self {
        Self {
            store,
            credentials,
            catalog,
            related_users,
        }
    }

    /// Run the whole workflow for one submission
    pub async fn submit(&self, submission: &UserSubmission) -> Result<RenderedPage, SubmissionError> {
        let mut session = self.store.open_session().await.map_err(|e| {
            warn!(step = "connect", error = %e, "Failed to open store session");
            SubmissionError::Store(e)
        })?;

        let outcome = self.run_steps(session.as_mut(), submission).await;

        if let Err(e) = session.close().await {
            warn!(error = %e, "Failed to close store session");
        }

        let (tracks, users) = outcome?;
        debug!(step = "render", tracks = tracks.len(), users = users.len(), "Rendering results");
        Ok(render::results_page(
            &submission.genre,
            &tracks,
            &users,
            self.related_users,
        ))
    }

    async fn run_steps(
        &self,
        session: &mut dyn StoreSession,
        submission: &UserSubmission,
    ) -> Result<(Vec<Track>, Vec<StoredSubmission>), SubmissionError> {
        session.insert(submission).await.map_err(|e| {
            warn!(step = "insert", error = %e, "Error inserting submission");
            SubmissionError::Store(e)
        })?;

        let token = self.credentials.exchange().await.map_err(|e| {
            warn!(step = "token", error = %e, "Error exchanging credentials");
            SubmissionError::Credentials(e)
        })?;

        let tracks = self
            .catalog
            .top_tracks(&submission.genre, &token)
            .await
            .map_err(|e| {
                warn!(step = "search", genre = %submission.genre, error = %e, "Error searching catalog");
                SubmissionError::Catalog(e)
            })?;

        let users = match self.related_users {
            RelatedUsersScope::Genre => session.find_by_genre(&submission.genre).await,
            RelatedUsersScope::All => session.find_all().await,
        }
        .map_err(|e| {
            warn!(step = "lookup", error = %e, "Error looking up related users");
            SubmissionError::Store(e)
        })?;

        Ok((tracks, users))
    }
}
