//! Service layer
//!
//! Contains business logic separated from HTTP handlers.
//! Services orchestrate validation, hashing, authorization and store access.

mod courses;
mod users;

pub use courses::CourseService;
pub use users::{Registration, UserService};
