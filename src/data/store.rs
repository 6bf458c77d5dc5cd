//! Repository interfaces
//!
//! Services depend on these traits instead of a concrete database, so
//! persistence can be swapped (or mocked in tests) without touching
//! business logic.

use axum::async_trait;
use thiserror::Error;

use super::models::{Course, CourseDraft, CourseWithOwner, Identity, NewIdentity};

/// Failure at the store boundary
///
/// Validation and uniqueness failures carry client-facing messages;
/// everything else is an opaque database failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input rejected before it reached the database
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// A unique column already holds the value
    #[error("unique constraint violated: {}", .0.join(", "))]
    UniqueConstraint(Vec<String>),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persisted identities
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up an identity by email address (case-insensitive)
    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;

    /// Persist a new identity
    ///
    /// # Errors
    /// `StoreError::UniqueConstraint` if the email address is taken
    async fn create_identity(&self, identity: &NewIdentity) -> Result<Identity, StoreError>;
}

/// Persisted courses
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// All courses with their owners, ordered by id
    async fn list_courses(&self) -> Result<Vec<CourseWithOwner>, StoreError>;

    /// One course with its owner
    async fn find_course_with_owner(&self, id: i64)
    -> Result<Option<CourseWithOwner>, StoreError>;

    /// One course, without joining the owner
    async fn find_course(&self, id: i64) -> Result<Option<Course>, StoreError>;

    /// Persist a new course owned by `owner_id`
    async fn create_course(&self, owner_id: i64, draft: &CourseDraft)
    -> Result<Course, StoreError>;

    /// Overwrite the writable fields of a course
    ///
    /// Returns `false` if the course no longer exists.
    async fn update_course(&self, id: i64, draft: &CourseDraft) -> Result<bool, StoreError>;

    /// Delete a course
    ///
    /// Returns `false` if the course no longer exists.
    async fn delete_course(&self, id: i64) -> Result<bool, StoreError>;
}
