//! Handlers for category endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::ListResponse;
use crate::api::dto::category::{
    CategoryRepresentation, CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all categories.
///
/// # Endpoint
///
/// `GET /api/categories`
pub async fn list_categories_handler(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<CategoryRepresentation>>, AppError> {
    let categories = state.category_service.list_categories().await?;

    Ok(Json(ListResponse::new(
        categories.into_iter().map(Into::into).collect(),
    )))
}

/// Creates a category.
///
/// # Endpoint
///
/// `POST /api/categories`
///
/// # Errors
///
/// Returns 400 if the name is missing, blank or too long.
/// Returns 409 if the name is taken.
pub async fn create_category_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryRepresentation>), AppError> {
    payload.validate()?;

    let (name, description) = payload.into_parts();
    let category = state
        .category_service
        .create_category(name, description)
        .await?;

    Ok((StatusCode::CREATED, Json(category.into())))
}

/// Returns one category.
///
/// # Endpoint
///
/// `GET /api/categories/{id}`
pub async fn get_category_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<CategoryRepresentation>, AppError> {
    let category = state.category_service.get_category(id).await?;
    Ok(Json(category.into()))
}

/// Partially updates a category.
///
/// # Endpoint
///
/// `PATCH /api/categories/{id}`
///
/// All fields are optional. `description: null` clears the description.
///
/// # Errors
///
/// Returns 404 if the category does not exist.
/// Returns 409 if the new name is taken.
pub async fn update_category_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryRepresentation>, AppError> {
    payload.validate()?;

    let category = state
        .category_service
        .update_category(id, payload.into())
        .await?;

    Ok(Json(category.into()))
}

/// Replaces a category.
///
/// # Endpoint
///
/// `PUT /api/categories/{id}`
///
/// `name` is required. An absent `description` clears it.
///
/// # Errors
///
/// Returns 404 if the category does not exist.
/// Returns 400 if the name is missing or blank.
/// Returns 409 if the name is taken.
pub async fn replace_category_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<Json<CategoryRepresentation>, AppError> {
    payload.validate()?;

    let category = state
        .category_service
        .update_category(id, payload.into_patch())
        .await?;

    Ok(Json(category.into()))
}

/// Deletes a category. Courses in it are kept and lose their category.
///
/// # Endpoint
///
/// `DELETE /api/categories/{id}`
pub async fn delete_category_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.category_service.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
