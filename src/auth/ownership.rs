//! Course ownership checks

use thiserror::Error;

use crate::data::{Course, Identity};
use crate::metrics::OWNERSHIP_DENIALS_TOTAL;

/// Authenticated caller is not allowed to act on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthorizationFailure {
    #[error("User is not owner of the requested course")]
    NotOwner,
}

/// Allow the mutation only if `identity` owns `course`
pub fn authorize_owner(course: &Course, identity: &Identity) -> Result<(), AuthorizationFailure> {
    if course.user_id == identity.id {
        return Ok(());
    }

    tracing::warn!(
        course_id = course.id,
        owner_id = course.user_id,
        user_id = identity.id,
        "Course mutation denied to non-owner"
    );
    OWNERSHIP_DENIALS_TOTAL.inc();
    Err(AuthorizationFailure::NotOwner)
}
