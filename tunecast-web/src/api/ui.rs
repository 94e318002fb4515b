//! Welcome page
//!
//! Serves the embedded landing page with the submission form

use axum::response::Html;

const WELCOME_HTML: &str = include_str!("../../ui/welcome.html");

/// GET /
pub async fn welcome_page() -> Html<&'static str> {
    Html(WELCOME_HTML)
}
