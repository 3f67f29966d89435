//! Handlers for course endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::ListResponse;
use crate::api::dto::course::{CourseRepresentation, CreateCourseRequest, UpdateCourseRequest};
use crate::api::middleware::CurrentActor;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all courses with their derived fields.
///
/// # Endpoint
///
/// `GET /api/courses`
pub async fn list_courses_handler(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<CourseRepresentation>>, AppError> {
    let courses = state.course_service.list_courses().await?;

    Ok(Json(ListResponse::new(
        courses.into_iter().map(Into::into).collect(),
    )))
}

/// Creates a course taught by the authenticated user.
///
/// # Endpoint
///
/// `POST /api/courses`
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Rust 101",
///   "description": "Ownership and borrowing",
///   "category": 2,
///   "thumbnail": "https://cdn.example.com/rust.png",
///   "duration_hours": 12,
///   "is_published": true
/// }
/// ```
///
/// `id`, `instructor`, `created_at` and `updated_at` are ignored if sent.
///
/// # Errors
///
/// Returns 401 if the request is anonymous.
/// Returns 400 if a field is invalid or the category does not exist.
pub async fn create_course_handler(
    State(state): State<AppState>,
    actor: CurrentActor,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseRepresentation>), AppError> {
    payload.validate()?;

    let course = state
        .course_service
        .create_course(payload.into_draft(), actor.actor())
        .await?;

    Ok((StatusCode::CREATED, Json(course.into())))
}

/// Returns one course.
///
/// # Endpoint
///
/// `GET /api/courses/{id}`
pub async fn get_course_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<CourseRepresentation>, AppError> {
    let course = state.course_service.get_course(id).await?;
    Ok(Json(course.into()))
}

/// Partially updates a course.
///
/// # Endpoint
///
/// `PATCH /api/courses/{id}`
///
/// `category: null` and `thumbnail: null` clear the value. The instructor
/// cannot be changed.
///
/// # Errors
///
/// Returns 404 if the course does not exist.
/// Returns 400 if a field is invalid or the category does not exist.
pub async fn update_course_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateCourseRequest>,
) -> Result<Json<CourseRepresentation>, AppError> {
    payload.validate()?;

    let course = state
        .course_service
        .update_course(id, payload.into())
        .await?;

    Ok(Json(course.into()))
}

/// Replaces a course.
///
/// # Endpoint
///
/// `PUT /api/courses/{id}`
///
/// Takes the same body as `POST /api/courses`. `title` is required and every
/// other writable field falls back to its default when absent. The instructor
/// and timestamps are ignored if sent.
///
/// # Errors
///
/// Returns 404 if the course does not exist.
/// Returns 400 if a field is invalid or the category does not exist.
pub async fn replace_course_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<Json<CourseRepresentation>, AppError> {
    payload.validate()?;

    let course = state
        .course_service
        .update_course(id, payload.into_patch())
        .await?;

    Ok(Json(course.into()))
}

/// Deletes a course and its enrollments.
///
/// # Endpoint
///
/// `DELETE /api/courses/{id}`
pub async fn delete_course_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.course_service.delete_course(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
