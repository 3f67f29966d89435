//! Repository trait definitions for the domain layer.
//!
//! These traits are the data-access interface the services depend on:
//! reference lookups, the `(student, course)` existence check, and the
//! annotated read models that carry derived fields.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - User lookups
//! - [`CategoryRepository`] - Category CRUD
//! - [`CourseRepository`] - Course CRUD and annotated reads
//! - [`EnrollmentRepository`] - Enrollment CRUD, annotated reads and pair existence
//! - [`TokenRepository`] - API token authentication
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod category_repository;
pub mod course_repository;
pub mod enrollment_repository;
pub mod token_repository;
pub mod user_repository;

pub use category_repository::CategoryRepository;
pub use course_repository::CourseRepository;
pub use enrollment_repository::EnrollmentRepository;
pub use token_repository::{ApiToken, TokenRepository};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use course_repository::MockCourseRepository;
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
