//! Repository trait for course categories.

use crate::domain::entities::{Category, CategoryPatch, NewCategory};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing categories.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCategoryRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Creates a new category.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a category with the same name exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_category: NewCategory) -> Result<Category, AppError>;

    /// Finds a category by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError>;

    /// Finds a category by its exact name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError>;

    /// Lists all categories ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<Category>, AppError>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the category does not exist.
    /// Returns [`AppError::Conflict`] if the new name is taken.
    async fn update(&self, id: i64, patch: CategoryPatch) -> Result<Category, AppError>;

    /// Deletes a category. Courses in it keep existing with no category.
    ///
    /// Returns `Ok(false)` if no category had that ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
