use serde::{Deserialize, Serialize};

use vetforum_core::{CategoryId, DomainError, DomainResult};

/// A forum category as returned by the category service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(alias = "_id", alias = "categoriaforumid")]
    pub id: CategoryId,
    #[serde(rename = "nomecategoria")]
    pub name: String,
}

/// Body for creating or renaming a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDraft {
    #[serde(rename = "nomecategoria")]
    name: String,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("category name cannot be blank"));
        }
        Ok(Self { name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn draft_trims_and_rejects_blank_names() {
        assert_eq!(CategoryDraft::new("  Nutrition ").unwrap().name(), "Nutrition");
        assert!(matches!(CategoryDraft::new("   "), Err(DomainError::Validation(_))));
    }

    #[test]
    fn draft_serializes_to_service_body() {
        let body = serde_json::to_value(CategoryDraft::new("Surgery").unwrap()).unwrap();
        assert_eq!(body, json!({ "nomecategoria": "Surgery" }));
    }

    #[test]
    fn category_accepts_id_aliases() {
        let a: Category = serde_json::from_value(json!({ "id": 1, "nomecategoria": "A" })).unwrap();
        let b: Category =
            serde_json::from_value(json!({ "categoriaforumid": 1, "nomecategoria": "A" })).unwrap();
        assert_eq!(a, b);
    }
}
