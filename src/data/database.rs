//! SQLite database operations
//!
//! All database access goes through this module.
//! Implements the store traits on top of an sqlx pool.

use axum::async_trait;
use chrono::Utc;
use sqlx::{Pool, Sqlite, SqlitePool};
use std::path::Path;

use super::models::*;
use super::store::{CourseStore, CredentialStore, StoreError};
use crate::error::AppError;

const COURSE_WITH_OWNER_SELECT: &str = r#"
    SELECT
        c.id, c.title, c.description, c.estimated_time, c.materials_needed,
        c.user_id, c.created_at, c.updated_at,
        u.first_name AS owner_first_name,
        u.last_name AS owner_last_name,
        u.email_address AS owner_email_address
    FROM courses c
    JOIN users u ON u.id = c.user_id
"#;

/// Database connection pool wrapper.
pub struct Database {
    pool: Pool<Sqlite>,
}

#[derive(sqlx::FromRow)]
struct CourseWithOwnerRow {
    #[sqlx(flatten)]
    course: Course,
    owner_first_name: String,
    owner_last_name: String,
    owner_email_address: String,
}

impl From<CourseWithOwnerRow> for CourseWithOwner {
    fn from(row: CourseWithOwnerRow) -> Self {
        let owner = CourseOwner {
            id: row.course.user_id,
            first_name: row.owner_first_name,
            last_name: row.owner_last_name,
            email_address: row.owner_email_address,
        };
        Self {
            course: row.course,
            owner,
        }
    }
}

fn map_identity_insert_error(error: sqlx::Error) -> StoreError {
    match &error {
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            StoreError::UniqueConstraint(vec!["emailAddress must be unique".to_string()])
        }
        _ => StoreError::Database(error),
    }
}

impl Database {
    /// Connect to SQLite database
    ///
    /// Creates the database file (and its parent directory) if needed.
    /// Runs pending migrations automatically.
    pub async fn connect(path: &Path) -> Result<Self, AppError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AppError::Database(sqlx::Error::Io(e)))?;
        }

        // Create connection string
        let connection_string = format!("sqlite:{}?mode=rwc", path.display());

        // Create connection pool
        let pool = SqlitePool::connect(&connection_string).await?;

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Migration failed: {}", e);
                AppError::Internal(anyhow::anyhow!("Migration failed: {}", e))
            })?;

        tracing::info!(path = %path.display(), "Database connected and migrated successfully");

        Ok(Self { pool })
    }

    /// Underlying pool, for ad-hoc queries in tests and tooling
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// =========================================================================
// Identities
// =========================================================================

#[async_trait]
impl CredentialStore for Database {
    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        // email_address is declared COLLATE NOCASE
        let identity =
            sqlx::query_as::<_, Identity>("SELECT * FROM users WHERE email_address = ? LIMIT 1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        Ok(identity)
    }

    async fn create_identity(&self, identity: &NewIdentity) -> Result<Identity, StoreError> {
        let now = Utc::now();

        sqlx::query_as::<_, Identity>(
            r#"
            INSERT INTO users (
                first_name, last_name, email_address, password_hash, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&identity.first_name)
        .bind(&identity.last_name)
        .bind(&identity.email_address)
        .bind(&identity.password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_identity_insert_error)
    }
}

// =========================================================================
// Courses
// =========================================================================

#[async_trait]
impl CourseStore for Database {
    async fn list_courses(&self) -> Result<Vec<CourseWithOwner>, StoreError> {
        let rows = sqlx::query_as::<_, CourseWithOwnerRow>(&format!(
            "{COURSE_WITH_OWNER_SELECT} ORDER BY c.id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CourseWithOwner::from).collect())
    }

    async fn find_course_with_owner(
        &self,
        id: i64,
    ) -> Result<Option<CourseWithOwner>, StoreError> {
        let row = sqlx::query_as::<_, CourseWithOwnerRow>(&format!(
            "{COURSE_WITH_OWNER_SELECT} WHERE c.id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CourseWithOwner::from))
    }

    async fn find_course(&self, id: i64) -> Result<Option<Course>, StoreError> {
        let course = sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(course)
    }

    async fn create_course(
        &self,
        owner_id: i64,
        draft: &CourseDraft,
    ) -> Result<Course, StoreError> {
        draft.validate()?;
        let now = Utc::now();

        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (
                title, description, estimated_time, materials_needed,
                user_id, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.estimated_time)
        .bind(&draft.materials_needed)
        .bind(owner_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(course)
    }

    async fn update_course(&self, id: i64, draft: &CourseDraft) -> Result<bool, StoreError> {
        draft.validate()?;

        let result = sqlx::query(
            r#"
            UPDATE courses
            SET title = ?, description = ?, estimated_time = ?, materials_needed = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(&draft.estimated_time)
        .bind(&draft.materials_needed)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_course(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
