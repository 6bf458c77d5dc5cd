//! Basic-Auth credential verification
//!
//! Decodes `Authorization: Basic base64(email:password)`, looks the
//! identity up and checks the password against its bcrypt hash.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum_extra::headers::{Authorization, Header, authorization::Basic};
use thiserror::Error;

use crate::data::{CredentialStore, Identity};
use crate::error::AppError;
use crate::metrics::AUTH_FAILURES_TOTAL;

/// Why a request could not be authenticated
///
/// Every variant produces the same 401 response; the distinction only
/// exists for logs and metrics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    /// Header absent or not a well-formed Basic credential
    #[error("Auth header not found")]
    HeaderMissing,

    #[error("User not found with email address: {0}")]
    UserNotFound(String),

    #[error("Authentication failure for email address: {0}")]
    BadCredentials(String),
}

impl AuthFailure {
    /// Metric label
    pub fn reason(&self) -> &'static str {
        match self {
            AuthFailure::HeaderMissing => "header_missing",
            AuthFailure::UserNotFound(_) => "user_not_found",
            AuthFailure::BadCredentials(_) => "bad_credentials",
        }
    }
}

/// Email/password pair decoded from a Basic header
pub struct BasicCredentials {
    pub email: String,
    pub password: String,
}

/// Decode a Basic `Authorization` header value
///
/// # Errors
/// `AuthFailure::HeaderMissing` when the header is absent, uses another
/// scheme, is not valid base64/UTF-8, or lacks the `:` separator.
pub fn parse_basic_credentials(
    header: Option<&HeaderValue>,
) -> Result<BasicCredentials, AuthFailure> {
    let value = header.ok_or(AuthFailure::HeaderMissing)?;
    let decoded = Authorization::<Basic>::decode(&mut std::iter::once(value))
        .map_err(|_| AuthFailure::HeaderMissing)?;

    Ok(BasicCredentials {
        email: decoded.username().to_owned(),
        password: decoded.password().to_owned(),
    })
}

/// Hash a password with bcrypt on the blocking pool
pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
        .map_err(|e| AppError::Internal(e.into()))
}

/// Compare a password with a bcrypt hash on the blocking pool
///
/// `bcrypt::verify` compares digests in constant time.
async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(e.into()))?
        .map_err(|e| AppError::Internal(e.into()))
}

/// Resolves a Basic `Authorization` header to a stored identity
pub struct CredentialVerifier {
    store: Arc<dyn CredentialStore>,
    /// Hash checked when the email is unknown, so both failure paths pay
    /// for one bcrypt comparison
    dummy_hash: String,
}

impl CredentialVerifier {
    /// Create a verifier over `store`
    ///
    /// Hashes a throwaway password with `bcrypt_cost`, which should match
    /// the cost used for real passwords.
    pub async fn new(store: Arc<dyn CredentialStore>, bcrypt_cost: u32) -> Result<Self, AppError> {
        let dummy_hash = hash_password("coursehub-unknown-user".to_string(), bcrypt_cost).await?;
        Ok(Self { store, dummy_hash })
    }

    /// Verify the credentials carried by `header`
    ///
    /// # Errors
    /// - `AppError::Unauthorized` for any [`AuthFailure`]
    /// - `AppError::Database` / `AppError::Internal` if the store or the
    ///   hasher fails
    pub async fn verify(&self, header: Option<&HeaderValue>) -> Result<Identity, AppError> {
        match self.check(header).await {
            Ok(identity) => {
                tracing::debug!(user_id = identity.id, "Authentication successful");
                Ok(identity)
            }
            Err(AppError::Unauthorized(failure)) => {
                tracing::warn!(reason = failure.reason(), "{failure}");
                AUTH_FAILURES_TOTAL
                    .with_label_values(&[failure.reason()])
                    .inc();
                Err(AppError::Unauthorized(failure))
            }
            Err(other) => Err(other),
        }
    }

    async fn check(&self, header: Option<&HeaderValue>) -> Result<Identity, AppError> {
        let BasicCredentials { email, password } = parse_basic_credentials(header)?;

        let Some(identity) = self.store.find_identity_by_email(&email).await? else {
            verify_password(password, self.dummy_hash.clone()).await?;
            return Err(AuthFailure::UserNotFound(email).into());
        };

        if verify_password(password, identity.password_hash.clone()).await? {
            Ok(identity)
        } else {
            Err(AuthFailure::BadCredentials(identity.email_address).into())
        }
    }
}
