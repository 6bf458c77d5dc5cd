//! Prometheus metrics registry and instruments.
//!
//! This module is framework-agnostic and can be used from any layer.

use lazy_static::lazy_static;
use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("coursehub_http_requests_total", "Total number of HTTP requests"),
        &["method", "status"]
    ).expect("metric can be created");

    // Auth Metrics
    pub static ref AUTH_FAILURES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("coursehub_auth_failures_total", "Total number of failed Basic authentication attempts"),
        &["reason"]
    ).expect("metric can be created");
    pub static ref OWNERSHIP_DENIALS_TOTAL: IntCounter = IntCounter::new(
        "coursehub_ownership_denials_total",
        "Total number of course mutations denied to non-owners"
    ).expect("metric can be created");

    // Application Metrics
    pub static ref USERS_REGISTERED_TOTAL: IntCounter = IntCounter::new(
        "coursehub_users_registered_total",
        "Total number of users registered since startup"
    ).expect("metric can be created");
    pub static ref COURSE_MUTATIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("coursehub_course_mutations_total", "Total number of course mutations"),
        &["operation"]
    ).expect("metric can be created");

    // Error Metrics
    pub static ref ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("coursehub_errors_total", "Total number of error responses"),
        &["error_type"]
    ).expect("metric can be created");
}

/// Initialize metrics registry.
///
/// Call once at startup, before the server accepts requests.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(AUTH_FAILURES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(OWNERSHIP_DENIALS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(USERS_REGISTERED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(COURSE_MUTATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(ERRORS_TOTAL.clone()))?;

    tracing::info!("Metrics registry initialized");
    Ok(())
}

/// Record a finished HTTP request
pub fn observe_http_request(method: &str, status: u16) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, &status.to_string()])
        .inc();
}
