//! CourseHub - a small REST API for users and courses
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      API Layer (Axum)                        │
//! │  - /api/users, /api/courses                                 │
//! │  - Basic-Auth gate on mutating routes                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Service Layer                            │
//! │  - Registration, course CRUD                                │
//! │  - Ownership checks on course update/delete                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Data Layer                              │
//! │  - CredentialStore / CourseStore traits                     │
//! │  - SQLite (sqlx)                                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - `api`: HTTP handlers and routers
//! - `service`: Business logic layer
//! - `auth`: Basic authentication and ownership authorization
//! - `data`: Store traits and the SQLite implementation
//! - `config`: Configuration management
//! - `error`: Error types
//! - `metrics`: Prometheus instruments

pub mod api;
pub mod auth;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod service;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

/// Application state shared across all handlers
///
/// This struct is cloned for each request; every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<config::AppConfig>,

    /// Resolves Basic credentials to identities
    pub verifier: Arc<auth::CredentialVerifier>,

    /// Registration
    pub users: Arc<service::UserService>,

    /// Course reads and owner-checked mutation
    pub courses: Arc<service::CourseService>,
}

impl AppState {
    /// Initialize application state
    ///
    /// # Steps
    /// 1. Connect to SQLite database (runs migrations)
    /// 2. Build the credential verifier
    /// 3. Build services
    ///
    /// # Errors
    /// Returns error if any initialization step fails
    pub async fn new(config: config::AppConfig) -> Result<Self, error::AppError> {
        tracing::info!("Initializing application state...");

        // 1. Connect to SQLite database
        let db = Arc::new(data::Database::connect(&config.database.path).await?);
        tracing::info!("Database connected");

        Self::with_stores(config, db.clone(), db).await
    }

    /// Initialize application state over explicit stores
    pub async fn with_stores(
        config: config::AppConfig,
        credentials: Arc<dyn data::CredentialStore>,
        courses: Arc<dyn data::CourseStore>,
    ) -> Result<Self, error::AppError> {
        let cost = config.auth.bcrypt_cost;
        if cost < 10 {
            tracing::warn!(cost, "Using a low bcrypt cost; only suitable for development and tests");
        }

        // 2. Credential verifier
        let verifier = auth::CredentialVerifier::new(credentials.clone(), cost).await?;

        // 3. Services
        let users = service::UserService::new(credentials, cost);
        let courses = service::CourseService::new(courses);

        tracing::info!("Application state initialized successfully");

        Ok(Self {
            config: Arc::new(config),
            verifier: Arc::new(verifier),
            users: Arc::new(users),
            courses: Arc::new(courses),
        })
    }
}

/// Build the Axum router with all routes.
///
/// This is shared by the binary and integration tests to keep route
/// composition consistent across environments.
pub fn build_router(state: AppState) -> axum::Router {
    use axum::Router;
    use tower::ServiceBuilder;
    use tower_http::{cors::CorsLayer, trace::TraceLayer};

    Router::new()
        .route("/", axum::routing::get(welcome))
        .nest("/api", api::api_router(state.clone()))
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    observe_responses,
                )),
        )
        .with_state(state)
        .merge(api::metrics_router())
}

async fn welcome() -> axum::Json<api::MessageResponse> {
    axum::Json(api::MessageResponse {
        message: "Welcome to the REST API project!".to_string(),
    })
}

async fn route_not_found() -> Response {
    (
        axum::http::StatusCode::NOT_FOUND,
        axum::Json(api::MessageResponse {
            message: error::ROUTE_NOT_FOUND_MESSAGE.to_string(),
        }),
    )
        .into_response()
}

/// Count every response and, when enabled, log the detail behind 500s
async fn observe_responses(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    metrics::observe_http_request(method.as_str(), response.status().as_u16());

    if state.config.logging.enable_global_error_logging {
        if let Some(detail) = response.extensions().get::<error::ServerErrorDetail>() {
            tracing::error!(%method, %uri, error = %detail.0, "Global error handler");
        }
    }

    response
}
