//! Course service
//!
//! Reads are public. Creation needs an authenticated owner; update and
//! delete additionally need that owner to be the caller.

use std::sync::Arc;

use crate::auth::authorize_owner;
use crate::data::{Course, CoursePatch, CourseStore, CourseWithOwner, Identity};
use crate::error::AppError;
use crate::metrics::COURSE_MUTATIONS_TOTAL;

/// Course service
pub struct CourseService {
    store: Arc<dyn CourseStore>,
}

impl CourseService {
    /// Create new course service
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self { store }
    }

    /// All courses with their owners
    pub async fn list_courses(&self) -> Result<Vec<CourseWithOwner>, AppError> {
        Ok(self.store.list_courses().await?)
    }

    /// One course with its owner
    ///
    /// # Errors
    /// `AppError::NotFound` if no course has this id
    pub async fn get_course(&self, id: i64) -> Result<CourseWithOwner, AppError> {
        self.store
            .find_course_with_owner(id)
            .await?
            .ok_or_else(AppError::course_not_found)
    }

    /// Create a course owned by `actor`
    pub async fn create_course(
        &self,
        actor: &Identity,
        patch: CoursePatch,
    ) -> Result<Course, AppError> {
        let course = self
            .store
            .create_course(actor.id, &patch.into_draft())
            .await?;

        COURSE_MUTATIONS_TOTAL.with_label_values(&["create"]).inc();
        tracing::info!(course_id = course.id, user_id = actor.id, "Course created");

        Ok(course)
    }

    /// Fetch a course that `actor` is allowed to mutate
    ///
    /// # Errors
    /// - `AppError::NotFound` if no course has this id
    /// - `AppError::Forbidden` if `actor` does not own it
    pub async fn owned_course(&self, actor: &Identity, id: i64) -> Result<Course, AppError> {
        let course = self
            .store
            .find_course(id)
            .await?
            .ok_or_else(AppError::course_not_found)?;

        authorize_owner(&course, actor)?;
        Ok(course)
    }

    /// Update a course owned by `actor`
    ///
    /// Fields missing from `patch` keep their stored values.
    pub async fn update_course(
        &self,
        actor: &Identity,
        id: i64,
        patch: CoursePatch,
    ) -> Result<(), AppError> {
        let course = self.owned_course(actor, id).await?;
        let draft = patch.apply_to(&course);

        if !self.store.update_course(course.id, &draft).await? {
            return Err(AppError::course_not_found());
        }

        COURSE_MUTATIONS_TOTAL.with_label_values(&["update"]).inc();
        tracing::info!(course_id = course.id, user_id = actor.id, "Course updated");

        Ok(())
    }

    /// Delete a course owned by `actor`
    pub async fn delete_course(&self, actor: &Identity, id: i64) -> Result<(), AppError> {
        let course = self.owned_course(actor, id).await?;

        if !self.store.delete_course(course.id).await? {
            return Err(AppError::course_not_found());
        }

        COURSE_MUTATIONS_TOTAL.with_label_values(&["delete"]).inc();
        tracing::info!(course_id = course.id, user_id = actor.id, "Course deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthorizationFailure;
    use crate::data::{MockCourseStore, StoreError};
    use chrono::Utc;

    fn identity(id: i64) -> Identity {
        Identity {
            id,
            first_name: "Joe".to_string(),
            last_name: "Smith".to_string(),
            email_address: format!("user{id}@example.com"),
            password_hash: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn course(id: i64, user_id: i64) -> Course {
        Course {
            id,
            title: "Build a Basic Bookcase".to_string(),
            description: "High-end furniture projects are great to dream about.".to_string(),
            estimated_time: "12 hours".to_string(),
            materials_needed: "* 1 x 2 common pine".to_string(),
            user_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn store_with_course(owner_id: i64) -> MockCourseStore {
        let mut store = MockCourseStore::new();
        store
            .expect_find_course()
            .returning(move |id| Ok(Some(course(id, owner_id))));
        store
    }

    fn retitle(title: &str) -> CoursePatch {
        CoursePatch {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn non_owner_update_never_mutates() {
        let mut store = store_with_course(1);
        store.expect_update_course().never();
        let service = CourseService::new(Arc::new(store));

        let result = service.update_course(&identity(2), 5, retitle("Mine now")).await;

        assert!(matches!(
            result,
            Err(AppError::Forbidden(AuthorizationFailure::NotOwner))
        ));
    }

    #[tokio::test]
    async fn non_owner_delete_never_mutates() {
        let mut store = store_with_course(1);
        store.expect_delete_course().never();
        let service = CourseService::new(Arc::new(store));

        let result = service.delete_course(&identity(2), 5).await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn owner_update_mutates_exactly_once_with_merged_fields() {
        let mut store = store_with_course(1);
        store
            .expect_update_course()
            .times(1)
            .withf(|id, draft| {
                *id == 5 && draft.title == "Learn How to Program" && draft.estimated_time == "12 hours"
            })
            .returning(|_, _| Ok(true));
        let service = CourseService::new(Arc::new(store));

        service
            .update_course(&identity(1), 5, retitle("Learn How to Program"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn owner_delete_mutates_exactly_once() {
        let mut store = store_with_course(1);
        store
            .expect_delete_course()
            .times(1)
            .withf(|id| *id == 5)
            .returning(|_| Ok(true));
        let service = CourseService::new(Arc::new(store));

        service.delete_course(&identity(1), 5).await.unwrap();
    }

    #[tokio::test]
    async fn missing_course_is_not_found_before_authorization() {
        let mut store = MockCourseStore::new();
        store.expect_find_course().returning(|_| Ok(None));
        store.expect_delete_course().never();
        let service = CourseService::new(Arc::new(store));

        let result = service.delete_course(&identity(1), 99).await;

        assert!(matches!(result, Err(AppError::NotFound("Course not found"))));
    }

    #[tokio::test]
    async fn course_vanishing_mid_request_is_not_found() {
        let mut store = store_with_course(1);
        store.expect_delete_course().returning(|_| Ok(false));
        let service = CourseService::new(Arc::new(store));

        let result = service.delete_course(&identity(1), 5).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn owner_update_with_blank_field_is_validation_error() {
        let mut store = store_with_course(1);
        store
            .expect_update_course()
            .returning(|_, draft| draft.validate().map(|()| true));
        let service = CourseService::new(Arc::new(store));

        let result = service.update_course(&identity(1), 5, retitle("   ")).await;

        assert!(matches!(
            result,
            Err(AppError::Validation(errors)) if errors == vec!["Please provide a value for \"title\"".to_string()]
        ));
    }

    #[tokio::test]
    async fn create_assigns_actor_as_owner() {
        let mut store = MockCourseStore::new();
        store
            .expect_create_course()
            .times(1)
            .withf(|owner_id, _| *owner_id == 7)
            .returning(|owner_id, _| Ok(course(11, owner_id)));
        let service = CourseService::new(Arc::new(store));

        let created = service
            .create_course(&identity(7), retitle("New"))
            .await
            .unwrap();

        assert_eq!(created.user_id, 7);
    }

    #[tokio::test]
    async fn store_failure_propagates_as_database_error() {
        let mut store = MockCourseStore::new();
        store
            .expect_list_courses()
            .returning(|| Err(StoreError::Database(sqlx::Error::PoolTimedOut)));
        let service = CourseService::new(Arc::new(store));

        assert!(matches!(
            service.list_courses().await,
            Err(AppError::Database(_))
        ));
    }
}
