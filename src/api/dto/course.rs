//! DTOs for courses.
//!
//! The representation has a fixed allowlist. `category_name`,
//! `instructor_name` and `enrollment_count` are derived and read-only;
//! `id`, `instructor`, `created_at` and `updated_at` are read-only and
//! silently dropped when a client sends them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;
use crate::domain::entities::{AnnotatedCourse, CourseDraft, CoursePatch};

/// Wire representation of a course.
///
/// Derived names are omitted when the reference is null.
#[derive(Debug, Serialize)]
pub struct CourseRepresentation {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub instructor: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_name: Option<String>,
    pub thumbnail: Option<String>,
    pub duration_hours: i32,
    pub is_published: bool,
    pub enrollment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AnnotatedCourse> for CourseRepresentation {
    fn from(a: AnnotatedCourse) -> Self {
        let c = a.course;
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            category: c.category_id,
            category_name: a.category_name,
            instructor: c.instructor_id,
            instructor_name: a.instructor_name,
            thumbnail: c.thumbnail,
            duration_hours: c.duration_hours,
            is_published: c.is_published,
            enrollment_count: a.enrollment_count,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Request body for `POST /api/courses` and `PUT /api/courses/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank"),
        length(max = 200)
    )]
    pub title: Option<String>,

    #[serde(default)]
    pub description: String,

    pub category: Option<i64>,

    pub thumbnail: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub duration_hours: i32,

    #[serde(default)]
    pub is_published: bool,
}

impl CreateCourseRequest {
    /// Converts a validated request into the client-controlled part of a course.
    pub fn into_draft(self) -> CourseDraft {
        CourseDraft {
            title: self.title.unwrap_or_default().trim().to_string(),
            description: self.description,
            category_id: self.category,
            thumbnail: self.thumbnail,
            duration_hours: self.duration_hours,
            is_published: self.is_published,
        }
    }

    /// Converts a validated request into a full replacement of a course.
    ///
    /// Every client-controlled field is overwritten; absent optional fields
    /// take their create-time defaults, so `category` and `thumbnail` are
    /// cleared. The instructor is never touched.
    pub fn into_patch(self) -> CoursePatch {
        let draft = self.into_draft();
        CoursePatch {
            title: Some(draft.title),
            description: Some(draft.description),
            category_id: Some(draft.category_id),
            thumbnail: Some(draft.thumbnail),
            duration_hours: Some(draft.duration_hours),
            is_published: Some(draft.is_published),
        }
    }
}

/// Request body for `PATCH /api/courses/{id}`.
///
/// Absent fields are unchanged. `category: null` and `thumbnail: null` clear
/// the value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub category: Option<Option<i64>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub thumbnail: Option<Option<String>>,

    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub duration_hours: Option<i32>,

    pub is_published: Option<bool>,
}

impl From<UpdateCourseRequest> for CoursePatch {
    fn from(r: UpdateCourseRequest) -> Self {
        Self {
            title: r.title.map(|t| t.trim().to_string()),
            description: r.description,
            category_id: r.category,
            thumbnail: r.thumbnail,
            duration_hours: r.duration_hours,
            is_published: r.is_published,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Course;
    use crate::error::{AppError, FIELD_BLANK};
    use serde_json::json;

    fn annotated(
        category_name: Option<&str>,
        instructor_name: Option<&str>,
        enrollment_count: i64,
    ) -> AnnotatedCourse {
        let now = Utc::now();
        AnnotatedCourse {
            course: Course {
                id: 1,
                title: "Rust 101".to_string(),
                description: "Ownership".to_string(),
                category_id: category_name.map(|_| 2),
                instructor_id: instructor_name.map(|_| 3),
                thumbnail: None,
                duration_hours: 8,
                is_published: true,
                created_at: now,
                updated_at: now,
            },
            instructor_name: instructor_name.map(str::to_string),
            category_name: category_name.map(str::to_string),
            enrollment_count,
        }
    }

    #[test]
    fn test_representation_field_allowlist() {
        let value = serde_json::to_value(CourseRepresentation::from(annotated(
            Some("Programming"),
            Some("Grace Hopper"),
            0,
        )))
        .unwrap();

        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();

        assert_eq!(
            keys,
            [
                "category",
                "category_name",
                "created_at",
                "description",
                "duration_hours",
                "enrollment_count",
                "id",
                "instructor",
                "instructor_name",
                "is_published",
                "thumbnail",
                "title",
                "updated_at",
            ]
        );
    }

    #[test]
    fn test_enrollment_count_passes_through() {
        let value = serde_json::to_value(CourseRepresentation::from(annotated(None, None, 17)))
            .unwrap();
        assert_eq!(value["enrollment_count"], 17);
    }

    #[test]
    fn test_derived_names_follow_references() {
        let value = serde_json::to_value(CourseRepresentation::from(annotated(
            Some("Programming"),
            Some("Grace Hopper"),
            0,
        )))
        .unwrap();

        assert_eq!(value["category"], 2);
        assert_eq!(value["category_name"], "Programming");
        assert_eq!(value["instructor"], 3);
        assert_eq!(value["instructor_name"], "Grace Hopper");
    }

    #[test]
    fn test_null_references_omit_derived_names() {
        let value = serde_json::to_value(CourseRepresentation::from(annotated(None, None, 0)))
            .unwrap();

        assert!(value["category"].is_null());
        assert!(value["instructor"].is_null());
        assert!(value.get("category_name").is_none());
        assert!(value.get("instructor_name").is_none());
    }

    #[test]
    fn test_read_only_fields_are_ignored_on_write() {
        let req: CreateCourseRequest = serde_json::from_value(json!({
            "id": 999,
            "title": "Rust 101",
            "instructor": 12345,
            "created_at": "2000-01-01T00:00:00Z",
            "updated_at": "2000-01-01T00:00:00Z",
            "enrollment_count": 1000,
            "duration_hours": 5
        }))
        .unwrap();

        assert!(req.validate().is_ok());
        let draft = req.into_draft();
        assert_eq!(draft.title, "Rust 101");
        assert_eq!(draft.duration_hours, 5);
        assert!(!draft.is_published);
    }

    #[test]
    fn test_missing_title_is_a_field_error() {
        let req: CreateCourseRequest = serde_json::from_value(json!({})).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_whitespace_title_is_blank() {
        let req: CreateCourseRequest = serde_json::from_value(json!({"title": "   "})).unwrap();
        let err = AppError::from(req.validate().unwrap_err());
        assert_eq!(err.messages_for("title"), vec![FIELD_BLANK]);

        let patch: UpdateCourseRequest = serde_json::from_value(json!({"title": "  "})).unwrap();
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_title_is_trimmed() {
        let req: CreateCourseRequest =
            serde_json::from_value(json!({"title": "  Rust 101 "})).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.into_draft().title, "Rust 101");
    }

    #[test]
    fn test_replace_overwrites_every_writable_field() {
        let req: CreateCourseRequest = serde_json::from_value(json!({
            "title": "Rust 102",
            "instructor": 99,
            "created_at": "2000-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(req.validate().is_ok());

        let patch = req.into_patch();
        assert_eq!(patch.title.as_deref(), Some("Rust 102"));
        assert_eq!(patch.description.as_deref(), Some(""));
        assert_eq!(patch.category_id, Some(None));
        assert_eq!(patch.thumbnail, Some(None));
        assert_eq!(patch.duration_hours, Some(0));
        assert_eq!(patch.is_published, Some(false));
    }

    #[test]
    fn test_negative_duration_rejected() {
        let req: CreateCourseRequest =
            serde_json::from_value(json!({"title": "Rust", "duration_hours": -1})).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_request_clears_category_with_null() {
        let req: UpdateCourseRequest =
            serde_json::from_value(json!({"category": null, "instructor": 5})).unwrap();
        let patch = CoursePatch::from(req);

        assert_eq!(patch.category_id, Some(None));
        assert_eq!(patch.thumbnail, None);
        assert_eq!(patch.title, None);
    }
}
