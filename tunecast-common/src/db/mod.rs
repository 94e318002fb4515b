//! Database bootstrap for the submission store

pub mod init;

pub use init::{init_database, SUBMISSIONS_TABLE};
