//! Enrollment validation and admission.
//!
//! Every write goes through the same gate before anything is persisted:
//!
//! 1. Field checks: a supplied `student` must exist, `course` must be
//!    supplied and exist. All field errors are reported together.
//! 2. The effective student is resolved as the supplied student, or else the
//!    request's actor.
//! 3. If both the effective student and the course are known and an
//!    enrollment for that pair already exists, the write fails with
//!    [`ALREADY_ENROLLED`] as a record-level error. Otherwise the check is
//!    skipped and left to the storage constraint.
//!
//! The existence check and the insert are separate statements, so two
//! concurrent requests can both pass step 3. The `UNIQUE (student_id,
//! course_id)` constraint catches the loser and the repository reports it
//! with the same error.

use serde_json::{Map, Value, json};
use std::sync::Arc;

use super::does_not_exist;
use crate::domain::Actor;
use crate::domain::entities::{
    ALREADY_ENROLLED, AnnotatedEnrollment, EnrollmentDraft, EnrollmentPatch, NewEnrollment,
};
use crate::domain::repositories::{CourseRepository, EnrollmentRepository, UserRepository};
use crate::error::{AppError, FIELD_REQUIRED};

/// Service admitting, updating and reading enrollments.
pub struct EnrollmentService<E: EnrollmentRepository, C: CourseRepository, U: UserRepository> {
    enrollments: Arc<E>,
    courses: Arc<C>,
    users: Arc<U>,
}

impl<E, C, U> EnrollmentService<E, C, U>
where
    E: EnrollmentRepository,
    C: CourseRepository,
    U: UserRepository,
{
    /// Creates a new enrollment service.
    pub fn new(enrollments: Arc<E>, courses: Arc<C>, users: Arc<U>) -> Self {
        Self {
            enrollments,
            courses,
            users,
        }
    }

    /// Validates a new enrollment without writing anything.
    ///
    /// `actor` supplies the student when the draft omits one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] keyed to `student` or `course` when a
    /// reference is missing or unknown, and keyed to `non_field_errors` with
    /// the message [`ALREADY_ENROLLED`] when the pair is already enrolled.
    pub async fn validate(
        &self,
        draft: &EnrollmentDraft,
        actor: Option<&Actor>,
    ) -> Result<NewEnrollment, AppError> {
        self.admit(draft, actor, None).await
    }

    /// Runs the full write gate. `exclude_id` is the enrollment being replaced.
    async fn admit(
        &self,
        draft: &EnrollmentDraft,
        actor: Option<&Actor>,
        exclude_id: Option<i64>,
    ) -> Result<NewEnrollment, AppError> {
        let mut errors = Map::new();
        self.check_student(draft.student_id, &mut errors).await?;
        match draft.course_id {
            None => {
                errors.insert("course".to_string(), json!([FIELD_REQUIRED]));
            }
            Some(course_id) => self.check_course(course_id, &mut errors).await?,
        }
        if !errors.is_empty() {
            return Err(AppError::fields(errors));
        }

        let student_id = draft.student_id.or(actor.map(|a| a.user_id));
        self.ensure_not_enrolled(student_id, draft.course_id, exclude_id)
            .await?;

        let Some(student_id) = student_id else {
            return Err(AppError::field("student", FIELD_REQUIRED));
        };
        let Some(course_id) = draft.course_id else {
            return Err(AppError::field("course", FIELD_REQUIRED));
        };

        Ok(NewEnrollment {
            student_id,
            course_id,
            progress: draft.progress,
            completed: draft.completed,
        })
    }

    /// Validates and persists a new enrollment.
    ///
    /// # Errors
    ///
    /// See [`Self::validate`]. Nothing is written when validation fails.
    pub async fn enroll(
        &self,
        draft: EnrollmentDraft,
        actor: Option<&Actor>,
    ) -> Result<AnnotatedEnrollment, AppError> {
        let new_enrollment = self.validate(&draft, actor).await?;
        let enrollment = self.enrollments.create(new_enrollment).await?;

        tracing::info!(
            enrollment_id = enrollment.id,
            student_id = enrollment.student_id,
            course_id = enrollment.course_id,
            "Enrollment admitted"
        );

        self.get_enrollment(enrollment.id).await
    }

    /// Replaces every writable field of an enrollment.
    ///
    /// The draft goes through the same gate as [`Self::enroll`], so an omitted
    /// student defaults to `actor`. The duplicate check excludes this
    /// enrollment, which lets a replace keep its own pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the enrollment does not exist.
    /// See [`Self::validate`] for validation failures.
    pub async fn replace_enrollment(
        &self,
        id: i64,
        draft: EnrollmentDraft,
        actor: Option<&Actor>,
    ) -> Result<AnnotatedEnrollment, AppError> {
        if self.enrollments.find_by_id(id).await?.is_none() {
            return Err(AppError::not_found(
                "Enrollment not found",
                json!({"id": id}),
            ));
        }

        let replacement = self.admit(&draft, actor, Some(id)).await?;
        let patch = EnrollmentPatch {
            student_id: Some(replacement.student_id),
            course_id: Some(replacement.course_id),
            progress: Some(replacement.progress),
            completed: Some(replacement.completed),
        };
        self.enrollments.update(id, patch).await?;

        tracing::info!(
            enrollment_id = id,
            student_id = replacement.student_id,
            course_id = replacement.course_id,
            "Enrollment replaced"
        );

        self.get_enrollment(id).await
    }

    /// Partially updates an enrollment.
    ///
    /// When the patch moves the enrollment to another student or course, the
    /// duplicate check runs against the resulting pair with this enrollment
    /// excluded. Progress-only updates skip the check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the enrollment does not exist.
    /// Returns [`AppError::Validation`] for unknown references or a duplicate pair.
    pub async fn update_enrollment(
        &self,
        id: i64,
        patch: EnrollmentPatch,
    ) -> Result<AnnotatedEnrollment, AppError> {
        let existing = self
            .enrollments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Enrollment not found", json!({"id": id})))?;

        let mut errors = Map::new();
        self.check_student(patch.student_id, &mut errors).await?;
        if let Some(course_id) = patch.course_id {
            self.check_course(course_id, &mut errors).await?;
        }
        if !errors.is_empty() {
            return Err(AppError::fields(errors));
        }

        if patch.changes_pair() {
            let student_id = patch.student_id.unwrap_or(existing.student_id);
            let course_id = patch.course_id.unwrap_or(existing.course_id);
            self.ensure_not_enrolled(Some(student_id), Some(course_id), Some(id))
                .await?;
        }

        self.enrollments.update(id, patch).await?;
        self.get_enrollment(id).await
    }

    /// Lists all enrollments with derived fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_enrollments(&self) -> Result<Vec<AnnotatedEnrollment>, AppError> {
        self.enrollments.list_annotated().await
    }

    /// Retrieves an enrollment with derived fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the enrollment does not exist.
    pub async fn get_enrollment(&self, id: i64) -> Result<AnnotatedEnrollment, AppError> {
        self.enrollments
            .find_annotated(id)
            .await?
            .ok_or_else(|| AppError::not_found("Enrollment not found", json!({"id": id})))
    }

    /// Deletes an enrollment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the enrollment does not exist.
    pub async fn delete_enrollment(&self, id: i64) -> Result<(), AppError> {
        if !self.enrollments.delete(id).await? {
            return Err(AppError::not_found(
                "Enrollment not found",
                json!({"id": id}),
            ));
        }
        Ok(())
    }

    async fn check_student(
        &self,
        student_id: Option<i64>,
        errors: &mut Map<String, Value>,
    ) -> Result<(), AppError> {
        if let Some(student_id) = student_id
            && self.users.find_by_id(student_id).await?.is_none()
        {
            errors.insert("student".to_string(), json!([does_not_exist(student_id)]));
        }
        Ok(())
    }

    async fn check_course(
        &self,
        course_id: i64,
        errors: &mut Map<String, Value>,
    ) -> Result<(), AppError> {
        if self.courses.find_by_id(course_id).await?.is_none() {
            errors.insert("course".to_string(), json!([does_not_exist(course_id)]));
        }
        Ok(())
    }

    /// Fails if the pair is already enrolled. Skipped when either side is unknown.
    async fn ensure_not_enrolled(
        &self,
        student_id: Option<i64>,
        course_id: Option<i64>,
        exclude_id: Option<i64>,
    ) -> Result<(), AppError> {
        let (Some(student_id), Some(course_id)) = (student_id, course_id) else {
            tracing::debug!("Duplicate enrollment check skipped, pair not fully resolved");
            return Ok(());
        };

        if self
            .enrollments
            .exists_for(student_id, course_id, exclude_id)
            .await?
        {
            tracing::info!(student_id, course_id, "Duplicate enrollment rejected");
            return Err(AppError::non_field(ALREADY_ENROLLED));
        }

        Ok(())
    }
}
