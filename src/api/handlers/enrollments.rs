//! Handlers for enrollment endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::ListResponse;
use crate::api::dto::enrollment::{
    EnrollmentPatchRequest, EnrollmentRepresentation, EnrollmentWriteRequest,
};
use crate::api::middleware::CurrentActor;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all enrollments.
///
/// # Endpoint
///
/// `GET /api/enrollments`
pub async fn list_enrollments_handler(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<EnrollmentRepresentation>>, AppError> {
    let enrollments = state.enrollment_service.list_enrollments().await?;

    Ok(Json(ListResponse::new(
        enrollments.into_iter().map(Into::into).collect(),
    )))
}

/// Enrolls a student in a course.
///
/// # Endpoint
///
/// `POST /api/enrollments`
///
/// # Request Body
///
/// ```json
/// { "course": 9, "student": 3, "progress": 0, "completed": false }
/// ```
///
/// When `student` is omitted the authenticated user is enrolled.
///
/// # Errors
///
/// Returns 400 with `non_field_errors: ["Already enrolled in this course"]`
/// if the student is already enrolled.
/// Returns 400 keyed to `student` or `course` for missing or unknown references.
pub async fn create_enrollment_handler(
    State(state): State<AppState>,
    actor: CurrentActor,
    Json(payload): Json<EnrollmentWriteRequest>,
) -> Result<(StatusCode, Json<EnrollmentRepresentation>), AppError> {
    payload.validate()?;

    let enrollment = state
        .enrollment_service
        .enroll(payload.into_draft(), actor.actor())
        .await?;

    Ok((StatusCode::CREATED, Json(enrollment.into())))
}

/// Returns one enrollment.
///
/// # Endpoint
///
/// `GET /api/enrollments/{id}`
pub async fn get_enrollment_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<EnrollmentRepresentation>, AppError> {
    let enrollment = state.enrollment_service.get_enrollment(id).await?;
    Ok(Json(enrollment.into()))
}

/// Partially updates an enrollment.
///
/// # Endpoint
///
/// `PATCH /api/enrollments/{id}`
///
/// # Errors
///
/// Returns 404 if the enrollment does not exist.
/// Returns 400 if the resulting student/course pair is already enrolled.
pub async fn update_enrollment_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<EnrollmentPatchRequest>,
) -> Result<Json<EnrollmentRepresentation>, AppError> {
    payload.validate()?;

    let enrollment = state
        .enrollment_service
        .update_enrollment(id, payload.into())
        .await?;

    Ok(Json(enrollment.into()))
}

/// Replaces an enrollment.
///
/// # Endpoint
///
/// `PUT /api/enrollments/{id}`
///
/// Takes the same body as `POST /api/enrollments`. An omitted `student`
/// defaults to the authenticated user.
///
/// # Errors
///
/// Returns 404 if the enrollment does not exist.
/// Returns 400 if `course` is missing or the pair is already enrolled
/// by another record.
pub async fn replace_enrollment_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    actor: CurrentActor,
    Json(payload): Json<EnrollmentWriteRequest>,
) -> Result<Json<EnrollmentRepresentation>, AppError> {
    payload.validate()?;

    let enrollment = state
        .enrollment_service
        .replace_enrollment(id, payload.into_draft(), actor.actor())
        .await?;

    Ok(Json(enrollment.into()))
}

/// Deletes an enrollment.
///
/// # Endpoint
///
/// `DELETE /api/enrollments/{id}`
pub async fn delete_enrollment_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.enrollment_service.delete_enrollment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
