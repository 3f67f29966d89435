//! PostgreSQL implementation of the category repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Category, CategoryPatch, NewCategory};
use crate::domain::repositories::CategoryRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(r: CategoryRow) -> Self {
        Category::new(r.id, r.name, r.description, r.created_at)
    }
}

/// PostgreSQL repository for course categories.
///
/// Deleting a category leaves its courses in place with `category_id = NULL`.
pub struct PgCategoryRepository {
    pool: Arc<PgPool>,
}

impl PgCategoryRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, new_category: NewCategory) -> Result<Category, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(new_category.name)
        .bind(new_category.description)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, created_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Category::from))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, created_at FROM categories WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Category::from))
    }

    async fn list(&self) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, created_at FROM categories ORDER BY name",
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn update(&self, id: i64, patch: CategoryPatch) -> Result<Category, AppError> {
        let update_description = patch.description.is_some();
        let new_description = patch.description.flatten();

        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories SET
                name        = COALESCE($2::VARCHAR, name),
                description = CASE WHEN $3 THEN $4::TEXT ELSE description END
            WHERE id = $1
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(update_description)
        .bind(new_description)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Category::from)
            .ok_or_else(|| AppError::not_found("Category not found", json!({"id": id})))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
