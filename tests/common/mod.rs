//! Common test utilities for E2E tests

#![allow(dead_code)]

pub mod schema_validator;

use coursehub::{AppState, config};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Lowest cost bcrypt accepts; keeps hashing fast in tests
pub const TEST_BCRYPT_COST: u32 = 4;

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub _temp_dir: TempDir,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Create a new test server instance
    pub async fn new() -> Self {
        // Create temporary directory for test database
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        // Create test configuration
        let config = config::AppConfig {
            server: config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Let OS assign port
            },
            database: config::DatabaseConfig { path: db_path },
            auth: config::AuthConfig {
                bcrypt_cost: TEST_BCRYPT_COST,
            },
            logging: config::LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
                enable_global_error_logging: true,
            },
        };

        // Initialize app state
        let state = AppState::new(config).await.unwrap();

        // Create HTTP client
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let addr_str = format!("http://{}", addr);

        // Build router
        let app = coursehub::build_router(state.clone());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr: addr_str,
            state,
            _temp_dir: temp_dir,
            client,
        }
    }

    /// Get base URL for API requests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// POST /api/users with the given fields
    pub async fn register(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> reqwest::Response {
        self.client
            .post(self.url("/api/users"))
            .json(&json!({
                "firstName": first_name,
                "lastName": last_name,
                "emailAddress": email,
                "password": password,
            }))
            .send()
            .await
            .unwrap()
    }

    /// Register a user and return its id
    pub async fn create_test_user(&self, email: &str, password: &str) -> i64 {
        let response = self.register("Test", "User", email, password).await;
        assert_eq!(response.status(), 201, "registration of {email} failed");

        let me: Value = self
            .client
            .get(self.url("/api/users"))
            .basic_auth(email, Some(password))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        me["id"].as_i64().expect("user id")
    }

    /// Create a course as `email` and return its id (parsed from Location)
    pub async fn create_test_course(&self, email: &str, password: &str, title: &str) -> i64 {
        let response = self
            .client
            .post(self.url("/api/courses"))
            .basic_auth(email, Some(password))
            .json(&course_body(title))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201, "course creation failed");

        let location = response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .expect("location header");
        location
            .strip_prefix("/courses/")
            .and_then(|id| id.parse().ok())
            .expect("numeric course id in location")
    }
}

/// A complete, valid course body
pub fn course_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "High-end furniture projects are great to dream about.",
        "estimatedTime": "12 hours",
        "materialsNeeded": "* 1/2 x 3/4 inch parting strip\n* 1 x 2 common pine",
    })
}
