//! Form submission endpoint
//!
//! POST /users with URL-encoded `name`, `age` and `genreName`

use axum::{extract::State, Form};
use serde::Deserialize;
use tunecast_common::models::UserSubmission;

use crate::error::ApiResult;
use crate::render::RenderedPage;
use crate::AppState;

/// Raw form body; missing fields arrive as empty strings and fail validation
#[derive(Debug, Deserialize)]
pub struct SubmissionForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default, rename = "genreName")]
    pub genre_name: String,
}

/// POST /users
///
/// Validates the form, then runs the submission workflow. Any workflow
/// failure becomes a plain-text 500.
pub async fn submit_user(
    State(state): State<AppState>,
    Form(form): Form<SubmissionForm>,
) -> ApiResult<RenderedPage> {
    let submission = UserSubmission::new(&form.name, &form.genre_name, &form.age)?;

    tracing::debug!(genre = %submission.genre, "Received submission");

    let page = state.orchestrator.submit(&submission).await?;
    Ok(page)
}
