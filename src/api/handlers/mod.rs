//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one resource.

pub mod categories;
pub mod courses;
pub mod enrollments;
pub mod health;

pub use categories::{
    create_category_handler, delete_category_handler, get_category_handler,
    list_categories_handler, replace_category_handler, update_category_handler,
};
pub use courses::{
    create_course_handler, delete_course_handler, get_course_handler, list_courses_handler,
    replace_course_handler, update_course_handler,
};
pub use enrollments::{
    create_enrollment_handler, delete_enrollment_handler, get_enrollment_handler,
    list_enrollments_handler, replace_enrollment_handler, update_enrollment_handler,
};
pub use health::health_handler;
