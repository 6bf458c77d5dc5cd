//! Data layer module
//!
//! Handles all data persistence:
//! - Store traits (credential and course repositories)
//! - SQLite implementation of both stores

mod database;
mod models;
mod store;

pub use database::Database;
pub use models::*;
pub use store::{CourseStore, CredentialStore, StoreError};

#[cfg(test)]
pub use store::{MockCourseStore, MockCredentialStore};
