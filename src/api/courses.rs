//! Course endpoints

use axum::{
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Json},
};

use super::dto::CourseResponse;
use crate::AppState;
use crate::auth::CurrentUser;
use crate::data::CoursePatch;
use crate::error::AppError;

/// Ids that are not integers cannot name a course
fn parse_course_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::course_not_found())
}

/// GET /api/courses
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, AppError> {
    let courses = state.courses.list_courses().await?;

    Ok(Json(
        courses.into_iter().map(CourseResponse::from).collect(),
    ))
}

/// GET /api/courses/:id
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CourseResponse>, AppError> {
    let course = state.courses.get_course(parse_course_id(&id)?).await?;

    Ok(Json(course.into()))
}

/// POST /api/courses
///
/// Responds `201` with `Location: /courses/:id` and no body.
pub async fn create_course(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    payload: Result<Json<CoursePatch>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(patch) = payload?;
    let course = state.courses.create_course(&identity, patch).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/courses/{}", course.id))],
    ))
}

/// PUT /api/courses/:id
///
/// Only the owner may update. The body is only looked at once the course
/// is known to exist and belong to the caller.
pub async fn update_course(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<CoursePatch>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let id = parse_course_id(&id)?;

    let patch = match payload {
        Ok(Json(patch)) => patch,
        Err(rejection) => {
            state.courses.owned_course(&identity, id).await?;
            return Err(rejection.into());
        }
    };

    state.courses.update_course(&identity, id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/courses/:id
pub async fn delete_course(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .courses
        .delete_course(&identity, parse_course_id(&id)?)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
