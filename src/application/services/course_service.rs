//! Course management service.

use serde_json::{Map, Value, json};
use std::sync::Arc;

use super::does_not_exist;
use crate::domain::Actor;
use crate::domain::entities::{AnnotatedCourse, CourseDraft, CoursePatch, NewCourse};
use crate::domain::repositories::{CategoryRepository, CourseRepository};
use crate::error::{AppError, FIELD_BLANK};
use crate::utils::url_normalizer::normalize_url;

/// Service for managing courses.
///
/// Reads always return [`AnnotatedCourse`] so the representation can expose
/// `instructor_name`, `category_name` and `enrollment_count` without further
/// lookups. On writes the instructor comes from the actor and never from the
/// client.
pub struct CourseService<C: CourseRepository, K: CategoryRepository> {
    courses: Arc<C>,
    categories: Arc<K>,
}

impl<C: CourseRepository, K: CategoryRepository> CourseService<C, K> {
    /// Creates a new course service.
    pub fn new(courses: Arc<C>, categories: Arc<K>) -> Self {
        Self {
            courses,
            categories,
        }
    }

    /// Creates a course taught by `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if there is no actor to act as instructor.
    /// Returns [`AppError::Validation`] if the title is blank, the category
    /// does not exist or the thumbnail is not a usable URL.
    pub async fn create_course(
        &self,
        mut draft: CourseDraft,
        actor: Option<&Actor>,
    ) -> Result<AnnotatedCourse, AppError> {
        let Some(actor) = actor else {
            return Err(AppError::unauthorized(
                "Authentication credentials were not provided.",
                json!({"reason": "A course needs an authenticated instructor"}),
            ));
        };

        let mut errors = Map::new();
        draft.title = normalize_title(&draft.title, &mut errors);
        self.check_category(draft.category_id, &mut errors).await?;
        draft.thumbnail = normalize_thumbnail(draft.thumbnail, &mut errors);
        if !errors.is_empty() {
            return Err(AppError::fields(errors));
        }

        let course = self
            .courses
            .create(NewCourse::from_draft(draft, actor.user_id))
            .await?;

        tracing::info!(
            course_id = course.id,
            instructor_id = actor.user_id,
            "Course created"
        );

        self.get_course(course.id).await
    }

    /// Lists all courses with derived fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_courses(&self) -> Result<Vec<AnnotatedCourse>, AppError> {
        self.courses.list_annotated().await
    }

    /// Retrieves a course with derived fields.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the course does not exist.
    pub async fn get_course(&self, id: i64) -> Result<AnnotatedCourse, AppError> {
        self.courses
            .find_annotated(id)
            .await?
            .ok_or_else(|| AppError::not_found("Course not found", json!({"id": id})))
    }

    /// Updates a course. Fields absent from `patch` are kept.
    ///
    /// Also backs `PUT`, where the handler builds a patch with every
    /// writable field set.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a new title is blank, a new
    /// category does not exist or a new thumbnail is not a usable URL.
    /// Returns [`AppError::NotFound`] if the course does not exist.
    pub async fn update_course(
        &self,
        id: i64,
        mut patch: CoursePatch,
    ) -> Result<AnnotatedCourse, AppError> {
        let mut errors = Map::new();
        if let Some(title) = patch.title.take() {
            patch.title = Some(normalize_title(&title, &mut errors));
        }
        if let Some(category_id) = patch.category_id {
            self.check_category(category_id, &mut errors).await?;
        }
        if let Some(thumbnail) = patch.thumbnail.take() {
            patch.thumbnail = Some(normalize_thumbnail(thumbnail, &mut errors));
        }
        if !errors.is_empty() {
            return Err(AppError::fields(errors));
        }

        self.courses.update(id, patch).await?;
        self.get_course(id).await
    }

    /// Deletes a course together with its enrollments.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the course does not exist.
    pub async fn delete_course(&self, id: i64) -> Result<(), AppError> {
        if !self.courses.delete(id).await? {
            return Err(AppError::not_found("Course not found", json!({"id": id})));
        }
        tracing::info!(course_id = id, "Course deleted");
        Ok(())
    }

    async fn check_category(
        &self,
        category_id: Option<i64>,
        errors: &mut Map<String, Value>,
    ) -> Result<(), AppError> {
        if let Some(category_id) = category_id
            && self.categories.find_by_id(category_id).await?.is_none()
        {
            errors.insert("category".to_string(), json!([does_not_exist(category_id)]));
        }
        Ok(())
    }
}

/// Trims a title, recording a field error when nothing is left.
fn normalize_title(title: &str, errors: &mut Map<String, Value>) -> String {
    let title = title.trim();
    if title.is_empty() {
        errors.insert("title".to_string(), json!([FIELD_BLANK]));
    }
    title.to_string()
}

/// Normalizes an optional thumbnail, recording a field error on failure.
fn normalize_thumbnail(
    thumbnail: Option<String>,
    errors: &mut Map<String, Value>,
) -> Option<String> {
    let thumbnail = thumbnail?;
    match normalize_url(&thumbnail) {
        Ok(url) => Some(url),
        Err(e) => {
            errors.insert("thumbnail".to_string(), json!([e.to_string()]));
            None
        }
    }
}
