//! tunecast-web library
//!
//! Genre form backend: stores each visitor submission, looks up the
//! genre's top tracks in the music catalog and renders them together with
//! the other visitors who share the genre.

pub mod api;
pub mod db;
pub mod error;
pub mod render;
pub mod services;

pub use crate::error::{ApiError, ApiResult, SubmissionError};

use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::services::SubmissionOrchestrator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Per-submission workflow
    pub orchestrator: Arc<SubmissionOrchestrator>,
    /// Directory behind the static asset fallback
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(orchestrator: Arc<SubmissionOrchestrator>, static_dir: PathBuf) -> Self {
        Self {
            orchestrator,
            static_dir,
        }
    }
}

/// Build application router
///
/// Routed pages take precedence; anything else is looked up in the static
/// asset directory.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let static_assets = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(api::welcome_page))
        .route("/users", post(api::submit_user))
        .merge(api::health_routes())
        .fallback_service(static_assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
