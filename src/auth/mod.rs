//! Basic authentication and ownership authorization
//!
//! Handles:
//! - Credential verification (Basic header + bcrypt)
//! - Authentication middleware and current-user extractor
//! - Course ownership checks

mod credentials;
mod middleware;
mod ownership;

pub use credentials::{
    AuthFailure, BasicCredentials, CredentialVerifier, hash_password, parse_basic_credentials,
};
pub use middleware::{CurrentUser, require_auth};
pub use ownership::{AuthorizationFailure, authorize_owner};
