//! HTTP handlers for tunecast-web

pub mod health;
pub mod ui;
pub mod users;

pub use health::health_routes;
pub use ui::welcome_page;
pub use users::submit_user;
