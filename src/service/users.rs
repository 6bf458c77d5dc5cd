//! User service
//!
//! Registration: validation, password hashing, persistence.

use std::sync::Arc;

use serde::Deserialize;

use crate::auth::hash_password;
use crate::data::{CredentialStore, Identity, NewIdentity, StoreError};
use crate::error::AppError;
use crate::metrics::USERS_REGISTERED_TOTAL;

/// Registration form as sent by a client
///
/// Fields are optional so that missing ones are reported together with
/// every other validation error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub password: Option<String>,
}

fn normalize_text(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

impl Registration {
    /// Trimmed fields, or every validation message at once
    fn into_validated(self) -> Result<(String, String, String, String), StoreError> {
        let first_name = normalize_text(self.first_name);
        let last_name = normalize_text(self.last_name);
        let email_address = normalize_text(self.email_address);
        let password = self.password.unwrap_or_default();

        let mut errors = Vec::new();
        if first_name.is_empty() {
            errors.push("A first name is required".to_string());
        }
        if last_name.is_empty() {
            errors.push("A last name is required".to_string());
        }
        if email_address.is_empty() {
            errors.push("An email address is required".to_string());
        } else if !is_plausible_email(&email_address) {
            errors.push("A valid email address is required".to_string());
        }
        if password.is_empty() {
            errors.push("A password is required".to_string());
        }

        if errors.is_empty() {
            Ok((first_name, last_name, email_address, password))
        } else {
            Err(StoreError::Validation(errors))
        }
    }
}

/// User service
pub struct UserService {
    store: Arc<dyn CredentialStore>,
    bcrypt_cost: u32,
}

impl UserService {
    /// Create new user service
    pub fn new(store: Arc<dyn CredentialStore>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    /// Register a new identity
    ///
    /// The password is hashed before it reaches the store.
    ///
    /// # Errors
    /// `AppError::Validation` for invalid input or an email address that is
    /// already registered
    pub async fn register(&self, registration: Registration) -> Result<Identity, AppError> {
        let (first_name, last_name, email_address, password) = registration.into_validated()?;

        let password_hash = hash_password(password, self.bcrypt_cost).await?;
        let identity = self
            .store
            .create_identity(&NewIdentity {
                first_name,
                last_name,
                email_address,
                password_hash,
            })
            .await?;

        USERS_REGISTERED_TOTAL.inc();
        tracing::info!(user_id = identity.id, "User registered");

        Ok(identity)
    }
}
