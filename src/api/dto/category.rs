//! DTOs for categories.
//!
//! A category is exposed in full: every persisted field is part of the
//! representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;
use crate::domain::entities::{Category, CategoryPatch};

/// Full representation of a category.
#[derive(Debug, Serialize)]
pub struct CategoryRepresentation {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryRepresentation {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            created_at: c.created_at,
        }
    }
}

/// Request body for `POST /api/categories` and `PUT /api/categories/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(
        required(message = "This field is required."),
        custom(function = "not_blank"),
        length(max = 100)
    )]
    pub name: Option<String>,

    pub description: Option<String>,
}

impl CreateCategoryRequest {
    /// Splits a validated request into the trimmed name and the description.
    pub fn into_parts(self) -> (String, Option<String>) {
        (
            self.name.unwrap_or_default().trim().to_string(),
            self.description,
        )
    }

    /// Full replacement: an absent description is cleared.
    pub fn into_patch(self) -> CategoryPatch {
        let (name, description) = self.into_parts();
        CategoryPatch {
            name: Some(name),
            description: Some(description),
        }
    }
}

/// Request body for `PATCH /api/categories/{id}`.
///
/// `description: null` clears the description; an absent field is left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
}

impl From<UpdateCategoryRequest> for CategoryPatch {
    fn from(r: UpdateCategoryRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, FIELD_BLANK, FIELD_REQUIRED};
    use serde_json::json;

    #[test]
    fn test_representation_exposes_all_fields() {
        let category = Category::new(
            4,
            "Design".to_string(),
            Some("Visual design".to_string()),
            Utc::now(),
        );

        let value = serde_json::to_value(CategoryRepresentation::from(category)).unwrap();
        let obj = value.as_object().unwrap();

        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["created_at", "description", "id", "name"]);
        assert_eq!(value["name"], "Design");
    }

    #[test]
    fn test_create_request_rejects_empty_name() {
        let req: CreateCategoryRequest = serde_json::from_value(json!({"name": ""})).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_whitespace_name_is_blank() {
        let req: CreateCategoryRequest = serde_json::from_value(json!({"name": "  "})).unwrap();
        let err = AppError::from(req.validate().unwrap_err());
        assert_eq!(err.messages_for("name"), vec![FIELD_BLANK]);

        let patch: UpdateCategoryRequest =
            serde_json::from_value(json!({"name": "\t "})).unwrap();
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_missing_name_is_required() {
        let req: CreateCategoryRequest =
            serde_json::from_value(json!({"description": "No name"})).unwrap();
        let err = AppError::from(req.validate().unwrap_err());
        assert_eq!(err.messages_for("name"), vec![FIELD_REQUIRED]);
    }

    #[test]
    fn test_replace_trims_name_and_clears_absent_description() {
        let req: CreateCategoryRequest =
            serde_json::from_value(json!({"name": "  Design  "})).unwrap();
        assert!(req.validate().is_ok());

        let patch = req.into_patch();
        assert_eq!(patch.name.as_deref(), Some("Design"));
        assert_eq!(patch.description, Some(None));
    }

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let cleared: UpdateCategoryRequest =
            serde_json::from_value(json!({"description": null})).unwrap();
        assert_eq!(cleared.description, Some(None));

        let untouched: UpdateCategoryRequest =
            serde_json::from_value(json!({"name": "Data"})).unwrap();
        assert_eq!(untouched.description, None);
    }
}
