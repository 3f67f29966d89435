//! Application layer services implementing catalog rules.
//!
//! Services coordinate repository calls, reference checks and the enrollment
//! uniqueness rule. They receive the request's [`crate::domain::Actor`]
//! explicitly wherever a "current user" default applies.
//!
//! # Available Services
//!
//! - [`services::category_service::CategoryService`] - Category management
//! - [`services::course_service::CourseService`] - Course management
//! - [`services::enrollment_service::EnrollmentService`] - Enrollment validation and admission
//! - [`services::auth_service::AuthService`] - Bearer token authentication

pub mod services;
