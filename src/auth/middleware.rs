//! Authentication middleware
//!
//! Protects routes that require a known caller.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, State},
    http::{Request, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::AppState;
use crate::data::Identity;
use crate::error::AppError;

/// Middleware to require authentication
///
/// Verifies the Basic `Authorization` header and adds [`CurrentUser`]
/// to request extensions. On failure the request never reaches the
/// handler and the caller gets `401 {"message": "Access Denied"}`.
///
/// # Usage
/// ```ignore
/// let protected_routes = Router::new()
///     .route("/courses", post(...))
///     .layer(middleware::from_fn_with_state(state, require_auth));
/// ```
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let identity = state
        .verifier
        .verify(request.headers().get(AUTHORIZATION))
        .await?;

    request.extensions_mut().insert(CurrentUser(identity));

    Ok(next.run(request).await)
}

/// Extractor for the authenticated caller
///
/// Reads the identity attached by [`require_auth`]; on routes without the
/// middleware it verifies the header itself.
///
/// # Usage
/// ```ignore
/// async fn handler(
///     CurrentUser(identity): CurrentUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}", identity.first_name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(current) = parts.extensions.get::<CurrentUser>().cloned() {
            return Ok(current);
        }

        let state = AppState::from_ref(state);
        let identity = state
            .verifier
            .verify(parts.headers.get(AUTHORIZATION))
            .await?;
        let current = CurrentUser(identity);
        parts.extensions.insert(current.clone());

        Ok(current)
    }
}
