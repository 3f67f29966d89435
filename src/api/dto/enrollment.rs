//! DTOs for enrollments.
//!
//! `course_title` and `student_name` are derived on read. `id` and
//! `enrolled_at` are assigned by the server and ignored on write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{AnnotatedEnrollment, EnrollmentDraft, EnrollmentPatch};

/// Wire representation of an enrollment.
#[derive(Debug, Serialize)]
pub struct EnrollmentRepresentation {
    pub id: i64,
    pub student: i64,
    pub student_name: String,
    pub course: i64,
    pub course_title: String,
    pub enrolled_at: DateTime<Utc>,
    pub progress: f64,
    pub completed: bool,
}

impl From<AnnotatedEnrollment> for EnrollmentRepresentation {
    fn from(a: AnnotatedEnrollment) -> Self {
        let e = a.enrollment;
        Self {
            id: e.id,
            student: e.student_id,
            student_name: a.student_name,
            course: e.course_id,
            course_title: a.course_title,
            enrolled_at: e.enrolled_at,
            progress: e.progress,
            completed: e.completed,
        }
    }
}

/// Request body for `POST /api/enrollments` and `PUT /api/enrollments/{id}`.
///
/// `student` may be omitted, in which case the authenticated user is enrolled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EnrollmentWriteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student: Option<i64>,

    pub course: Option<i64>,

    #[serde(default)]
    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "Ensure this value is between 0 and 100."
    ))]
    pub progress: f64,

    #[serde(default)]
    pub completed: bool,
}

impl EnrollmentWriteRequest {
    /// Converts a validated request into a draft for the enrollment service.
    ///
    /// A missing `student` stays `None` here; the service resolves it from the
    /// actor before the duplicate check.
    pub fn into_draft(self) -> EnrollmentDraft {
        EnrollmentDraft {
            student_id: self.student,
            course_id: self.course,
            progress: self.progress,
            completed: self.completed,
        }
    }
}

/// Request body for `PATCH /api/enrollments/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct EnrollmentPatchRequest {
    pub student: Option<i64>,

    pub course: Option<i64>,

    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "Ensure this value is between 0 and 100."
    ))]
    pub progress: Option<f64>,

    pub completed: Option<bool>,
}

impl From<EnrollmentPatchRequest> for EnrollmentPatch {
    fn from(r: EnrollmentPatchRequest) -> Self {
        Self {
            student_id: r.student,
            course_id: r.course,
            progress: r.progress,
            completed: r.completed,
        }
    }
}
