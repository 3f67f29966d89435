//! Repository trait for enrollments.

use crate::domain::entities::{AnnotatedEnrollment, Enrollment, EnrollmentPatch, NewEnrollment};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing enrollments.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgEnrollmentRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Uniqueness
///
/// The storage layer enforces one enrollment per `(student, course)` pair.
/// Implementations report a violation of that constraint as the same
/// validation error the service raises for a detected duplicate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Inserts an enrollment. `id` and `enrolled_at` are assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the pair is already enrolled.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_enrollment: NewEnrollment) -> Result<Enrollment, AppError>;

    /// Finds an enrollment by ID without annotations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Enrollment>, AppError>;

    /// Finds an enrollment by ID with course title and student name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_annotated(&self, id: i64) -> Result<Option<AnnotatedEnrollment>, AppError>;

    /// Lists all enrollments with their derived fields, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_annotated(&self) -> Result<Vec<AnnotatedEnrollment>, AppError>;

    /// Checks whether an enrollment exists for the pair.
    ///
    /// `exclude_id` leaves one enrollment out of the check, so that an
    /// enrollment being updated does not count as its own duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists_for(
        &self,
        student_id: i64,
        course_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the enrollment does not exist.
    /// Returns [`AppError::Validation`] if the update would duplicate a pair.
    async fn update(&self, id: i64, patch: EnrollmentPatch) -> Result<Enrollment, AppError>;

    /// Deletes an enrollment. Returns `Ok(false)` if no enrollment had that ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
