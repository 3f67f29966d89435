//! Repository trait for courses.

use crate::domain::entities::{AnnotatedCourse, Course, CoursePatch, NewCourse};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing courses.
///
/// Reads that feed the wire representation return [`AnnotatedCourse`]: the
/// instructor and category names are joined in and `enrollment_count` is
/// aggregated by the query, so callers never count enrollments themselves.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCourseRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Inserts a course. `id`, `created_at` and `updated_at` are assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_course: NewCourse) -> Result<Course, AppError>;

    /// Finds a course by ID without annotations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, AppError>;

    /// Finds a course by ID with its derived fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_annotated(&self, id: i64) -> Result<Option<AnnotatedCourse>, AppError>;

    /// Lists all courses with their derived fields, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_annotated(&self) -> Result<Vec<AnnotatedCourse>, AppError>;

    /// Applies a partial update and bumps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the course does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, patch: CoursePatch) -> Result<Course, AppError>;

    /// Deletes a course and, by cascade, its enrollments.
    ///
    /// Returns `Ok(false)` if no course had that ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
