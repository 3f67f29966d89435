//! Business logic services for the application layer.

pub mod auth_service;
pub mod category_service;
pub mod course_service;
pub mod enrollment_service;

pub use auth_service::AuthService;
pub use category_service::CategoryService;
pub use course_service::CourseService;
pub use enrollment_service::EnrollmentService;

/// Message for a write that references a record that does not exist.
pub(crate) fn does_not_exist(id: i64) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}
