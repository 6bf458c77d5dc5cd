//! API response DTOs
//!
//! Public projections of the data models. Field names are camelCase
//! on the wire.

use serde::{Deserialize, Serialize};

use crate::data::{CourseOwner, CourseWithOwner, Identity};

/// Public fields of a user; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

impl From<&Identity> for UserResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            email_address: identity.email_address.clone(),
        }
    }
}

impl From<CourseOwner> for UserResponse {
    fn from(owner: CourseOwner) -> Self {
        Self {
            id: owner.id,
            first_name: owner.first_name,
            last_name: owner.last_name,
            email_address: owner.email_address,
        }
    }
}

/// Course with its embedded owner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub estimated_time: String,
    pub materials_needed: String,
    pub user_id: i64,
    pub owner: UserResponse,
}

impl From<CourseWithOwner> for CourseResponse {
    fn from(CourseWithOwner { course, owner }: CourseWithOwner) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            estimated_time: course.estimated_time,
            materials_needed: course.materials_needed,
            user_id: course.user_id,
            owner: owner.into(),
        }
    }
}

/// `{ "message": ... }` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
