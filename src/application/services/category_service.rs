//! Category management service.

use crate::domain::entities::{Category, CategoryPatch, NewCategory};
use crate::domain::repositories::CategoryRepository;
use crate::error::{AppError, FIELD_BLANK};
use serde_json::json;
use std::sync::Arc;

/// Service for managing course categories.
///
/// Field shapes are checked by the request DTOs; this service enforces
/// unique names and existence.
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    /// Creates a new category service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Creates a new category.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the name is blank after trimming.
    /// Returns [`AppError::Conflict`] if a category with this name exists.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_category(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<Category, AppError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::field("name", FIELD_BLANK));
        }

        if self.repository.find_by_name(&name).await?.is_some() {
            return Err(AppError::conflict(
                "Category already exists",
                json!({"name": name}),
            ));
        }

        let category = self
            .repository
            .create(NewCategory { name, description })
            .await?;

        tracing::info!(category_id = category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Lists all categories.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.repository.list().await
    }

    /// Retrieves a category by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    pub async fn get_category(&self, id: i64) -> Result<Category, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found", json!({"id": id})))
    }

    /// Partially updates a category.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the new name is blank after trimming.
    /// Returns [`AppError::Conflict`] if the new name belongs to another category.
    /// Returns [`AppError::NotFound`] if the category does not exist.
    pub async fn update_category(
        &self,
        id: i64,
        mut patch: CategoryPatch,
    ) -> Result<Category, AppError> {
        if let Some(name) = patch.name.take() {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::field("name", FIELD_BLANK));
            }
            if let Some(existing) = self.repository.find_by_name(&name).await?
                && existing.id != id
            {
                return Err(AppError::conflict(
                    "Category already exists",
                    json!({"name": name}),
                ));
            }
            patch.name = Some(name);
        }

        self.repository.update(id, patch).await
    }

    /// Deletes a category. Its courses are kept without a category.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    pub async fn delete_category(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(AppError::not_found(
                "Category not found",
                json!({"id": id}),
            ));
        }
        Ok(())
    }
}
