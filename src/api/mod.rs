//! API layer
//!
//! HTTP handlers for:
//! - Users (registration, current user)
//! - Courses (public reads, owner-only mutation)
//! - Metrics (Prometheus)

mod courses;
mod dto;
pub mod metrics;
mod users;

pub use dto::*;

pub use metrics::metrics_router;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::AppState;
use crate::auth::require_auth;

/// Create the `/api` router
///
/// Routes are split into public and authenticated endpoints. The
/// authenticated set sits behind [`require_auth`], so unauthenticated
/// requests are rejected before any handler runs.
pub fn api_router(state: AppState) -> Router<AppState> {
    // Public endpoints (no authentication required)
    let public_routes = Router::new()
        // Registration is public
        .route("/users", post(users::create_user))
        .route("/courses", get(courses::list_courses))
        .route("/courses/:id", get(courses::get_course));

    // Authenticated endpoints (require valid Basic credentials)
    let authenticated_routes = Router::new()
        .route("/users", get(users::current_user))
        .route("/courses", post(courses::create_course))
        .route(
            "/courses/:id",
            put(courses::update_course).delete(courses::delete_course),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    public_routes.merge(authenticated_routes)
}
