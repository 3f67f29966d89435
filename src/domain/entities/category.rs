//! Category entity grouping related courses.

use chrono::{DateTime, Utc};

/// A course category. Every persisted field is part of its wire representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(
        id: i64,
        name: String,
        description: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            created_at,
        }
    }
}

/// Input data for creating a new category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

/// Partial update for an existing category.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_creation() {
        let now = Utc::now();
        let category = Category::new(3, "Programming".to_string(), None, now);

        assert_eq!(category.id, 3);
        assert_eq!(category.name, "Programming");
        assert!(category.description.is_none());
        assert_eq!(category.created_at, now);
    }

    #[test]
    fn test_category_patch_default_changes_nothing() {
        let patch = CategoryPatch::default();

        assert!(patch.name.is_none());
        assert!(patch.description.is_none());
    }
}
