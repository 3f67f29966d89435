//! Enrollment entity linking a student to a course.

use chrono::{DateTime, Utc};

/// Message reported when a student is already enrolled in the course.
pub const ALREADY_ENROLLED: &str = "Already enrolled in this course";

/// A student's enrollment in a course.
///
/// At most one enrollment exists per `(student_id, course_id)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    pub enrolled_at: DateTime<Utc>,
    pub progress: f64,
    pub completed: bool,
}

/// An enrollment with the display values of the records it references.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedEnrollment {
    pub enrollment: Enrollment,
    pub course_title: String,
    pub student_name: String,
}

/// Client-supplied enrollment fields.
///
/// Either reference may be missing: `student_id` falls back to the request's
/// actor, and a missing `course_id` is reported as a field error.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentDraft {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub progress: f64,
    pub completed: bool,
}

/// Input data for inserting an enrollment that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEnrollment {
    pub student_id: i64,
    pub course_id: i64,
    pub progress: f64,
    pub completed: bool,
}

/// Partial update for an existing enrollment. `None` fields are unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrollmentPatch {
    pub student_id: Option<i64>,
    pub course_id: Option<i64>,
    pub progress: Option<f64>,
    pub completed: Option<bool>,
}

impl EnrollmentPatch {
    /// Returns true if the patch moves the enrollment to another student or course.
    pub fn changes_pair(&self) -> bool {
        self.student_id.is_some() || self.course_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_changes_pair() {
        let progress_only = EnrollmentPatch {
            progress: Some(50.0),
            ..Default::default()
        };
        assert!(!progress_only.changes_pair());

        let move_course = EnrollmentPatch {
            course_id: Some(7),
            ..Default::default()
        };
        assert!(move_course.changes_pair());
    }
}
