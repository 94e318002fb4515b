//! # Tunecast Common Library
//!
//! Shared code for the tunecast web service:
//! - Error type and `Result` alias
//! - Configuration loading (credentials file, TOML, environment)
//! - Database bootstrap for the submission store
//! - Data models shared between the store, catalog client and renderer

pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use error::{Error, Result};
