//! Results page rendering
//!
//! Builds the HTML returned for a successful submission: the genre's top
//! tracks as a list, then a table naming the related users. Every value that
//! originates from a visitor or from the catalog is HTML-escaped.

use axum::response::{Html, IntoResponse, Response};
use tunecast_common::config::RelatedUsersScope;
use tunecast_common::models::{StoredSubmission, Track};

const CELL_STYLE: &str = "border:1px solid black;";

/// A rendered HTML document, returned once per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage(String);

impl RenderedPage {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl IntoResponse for RenderedPage {
    fn into_response(self) -> Response {
        Html(self.0).into_response()
    }
}

/// Escape the five HTML-significant characters
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Track list fragment: heading plus one `<li>` per track
fn track_list(genre: &str, tracks: &[Track]) -> String {
    let mut html = format!("<h2>Top Tracks for {}</h2><ul>", escape_html(genre));
    for track in tracks {
        html.push_str(&format!(
            "<li>{} by {}</li>",
            escape_html(&track.name),
            escape_html(&track.artist_line())
        ));
    }
    html.push_str("</ul>");
    html
}

/// Related-user fragment: heading plus a one-column name table
fn user_table(genre: &str, users: &[StoredSubmission], scope: RelatedUsersScope) -> String {
    let heading = match scope {
        RelatedUsersScope::All => "Shoutout to all our users!".to_string(),
        RelatedUsersScope::Genre => format!("Shoutout to all our {} fans!", escape_html(genre)),
    };

    let mut html = format!(
        "<h2>{}</h2><table style=\"{style}\"><tr><th style=\"{style}\">Name</th></tr>",
        heading,
        style = CELL_STYLE
    );
    for user in users {
        html.push_str(&format!(
            "<tr><td style=\"{}\">{}</td></tr>",
            CELL_STYLE,
            escape_html(&user.name)
        ));
    }
    html.push_str("</table>");
    html
}

/// Render the full results document
pub fn results_page(
    genre: &str,
    tracks: &[Track],
    users: &[StoredSubmission],
    scope: RelatedUsersScope,
) -> RenderedPage {
    let body = format!("{}{}", track_list(genre, tracks), user_table(genre, users, scope));

    RenderedPage(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Tunecast - {title}</title>
</head>
<body>
    {body}
    <p><a href="/">Submit another</a></p>
</body>
</html>
"#,
        title = escape_html(genre),
        body = body
    ))
}
