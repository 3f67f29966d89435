//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries
//! are checked at runtime and decoded through `FromRow` row structs, so the
//! crate builds without a live database.
//!
//! # Repositories
//!
//! - [`PgUserRepository`] - User lookups
//! - [`PgCategoryRepository`] - Category storage
//! - [`PgCourseRepository`] - Course storage and annotated reads
//! - [`PgEnrollmentRepository`] - Enrollment storage, annotated reads and pair checks
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_category_repository;
pub mod pg_course_repository;
pub mod pg_enrollment_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_category_repository::PgCategoryRepository;
pub use pg_course_repository::PgCourseRepository;
pub use pg_enrollment_repository::PgEnrollmentRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
