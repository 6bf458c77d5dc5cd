//! Data models
//!
//! Rust structs representing database entities.
//! Ids are SQLite rowids; timestamps use chrono.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::store::StoreError;

// =============================================================================
// Identity
// =============================================================================

/// A registered user
///
/// Never serialized directly; API responses go through a public
/// projection so the password hash cannot leak.
#[derive(Clone, sqlx::FromRow)]
pub struct Identity {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Unique, compared case-insensitively
    pub email_address: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email_address", &self.email_address)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// Identity about to be persisted; the password is already hashed
#[derive(Clone)]
pub struct NewIdentity {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub password_hash: String,
}

// =============================================================================
// Course
// =============================================================================

/// A course owned by exactly one identity
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: String,
    pub materials_needed: String,
    /// Owning identity
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public fields of a course owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseOwner {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

/// Course joined with its owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseWithOwner {
    pub course: Course,
    pub owner: CourseOwner,
}

/// Writable course fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub estimated_time: String,
    pub materials_needed: String,
}

impl CourseDraft {
    /// Check that every field carries a non-blank value
    ///
    /// # Errors
    /// `StoreError::Validation` listing one message per offending field
    pub fn validate(&self) -> Result<(), StoreError> {
        let fields = [
            ("title", &self.title),
            ("description", &self.description),
            ("estimatedTime", &self.estimated_time),
            ("materialsNeeded", &self.materials_needed),
        ];

        let errors: Vec<String> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| format!("Please provide a value for \"{name}\""))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation(errors))
        }
    }
}

/// Course fields as sent by a client
///
/// Every field is optional: on create a missing field fails validation,
/// on update a missing (or null) field keeps its stored value. Any
/// `userId` in the body is ignored; ownership never comes from the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_time: Option<String>,
    pub materials_needed: Option<String>,
}

impl CoursePatch {
    /// Draft for a brand new course
    pub fn into_draft(self) -> CourseDraft {
        CourseDraft {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            estimated_time: self.estimated_time.unwrap_or_default(),
            materials_needed: self.materials_needed.unwrap_or_default(),
        }
    }

    /// Draft with the supplied fields laid over an existing course
    pub fn apply_to(self, course: &Course) -> CourseDraft {
        CourseDraft {
            title: self.title.unwrap_or_else(|| course.title.clone()),
            description: self
                .description
                .unwrap_or_else(|| course.description.clone()),
            estimated_time: self
                .estimated_time
                .unwrap_or_else(|| course.estimated_time.clone()),
            materials_needed: self
                .materials_needed
                .unwrap_or_else(|| course.materials_needed.clone()),
        }
    }
}
