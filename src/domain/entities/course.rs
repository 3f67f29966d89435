//! Course entity and its annotated read model.

use chrono::{DateTime, Utc};

/// A course as persisted.
///
/// `category_id` and `instructor_id` are nullable: the referenced rows may be
/// deleted without deleting the course.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category_id: Option<i64>,
    pub instructor_id: Option<i64>,
    pub thumbnail: Option<String>,
    pub duration_hours: i32,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A course together with the values derived from its references.
///
/// Built by the repository in a single query: the names come from one-hop
/// joins and `enrollment_count` from an aggregate over `enrollments`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedCourse {
    pub course: Course,
    pub instructor_name: Option<String>,
    pub category_name: Option<String>,
    pub enrollment_count: i64,
}

/// Client-supplied course fields, before the server assigns the instructor.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub category_id: Option<i64>,
    pub thumbnail: Option<String>,
    pub duration_hours: i32,
    pub is_published: bool,
}

/// Input data for inserting a course.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub category_id: Option<i64>,
    pub instructor_id: i64,
    pub thumbnail: Option<String>,
    pub duration_hours: i32,
    pub is_published: bool,
}

impl NewCourse {
    /// Combines client input with the server-assigned instructor.
    pub fn from_draft(draft: CourseDraft, instructor_id: i64) -> Self {
        Self {
            title: draft.title,
            description: draft.description,
            category_id: draft.category_id,
            instructor_id,
            thumbnail: draft.thumbnail,
            duration_hours: draft.duration_hours,
            is_published: draft.is_published,
        }
    }
}

/// Partial update for an existing course.
///
/// `None` fields are left unchanged. For the nullable columns,
/// `Some(None)` clears the value and `Some(Some(v))` sets it.
/// There is deliberately no way to change `instructor_id` or the timestamps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Option<i64>>,
    pub thumbnail: Option<Option<String>>,
    pub duration_hours: Option<i32>,
    pub is_published: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_course_takes_instructor_from_server() {
        let draft = CourseDraft {
            title: "Rust 101".to_string(),
            description: "Ownership and borrowing".to_string(),
            category_id: Some(2),
            thumbnail: None,
            duration_hours: 12,
            is_published: true,
        };

        let new_course = NewCourse::from_draft(draft, 42);

        assert_eq!(new_course.instructor_id, 42);
        assert_eq!(new_course.title, "Rust 101");
        assert_eq!(new_course.category_id, Some(2));
        assert_eq!(new_course.duration_hours, 12);
        assert!(new_course.is_published);
    }

    #[test]
    fn test_course_patch_default_changes_nothing() {
        let patch = CoursePatch::default();

        assert!(patch.title.is_none());
        assert!(patch.category_id.is_none());
        assert!(patch.thumbnail.is_none());
        assert!(patch.is_published.is_none());
    }
}
