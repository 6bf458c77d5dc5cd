//! User endpoints

use axum::{
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Json},
};

use super::dto::UserResponse;
use crate::AppState;
use crate::auth::CurrentUser;
use crate::error::AppError;
use crate::service::Registration;

/// GET /api/users
///
/// Returns the authenticated user.
pub async fn current_user(CurrentUser(identity): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(&identity))
}

/// POST /api/users
///
/// Registers a user. Responds `201` with `Location: /` and no body.
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<Registration>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(registration) = payload?;
    state.users.register(registration).await?;

    Ok((StatusCode::CREATED, [(header::LOCATION, "/")]))
}
