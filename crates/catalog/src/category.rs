use serde::{Deserialize, Serialize};

use lumina_core::{CategoryId, DomainError, Entity};

/// A product category (e.g. "Audio").
///
/// Names are unique and compared case-sensitively; uniqueness itself is
/// enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

impl Category {
    pub fn new(name: &str) -> Result<Self, DomainError> {
        Ok(Self {
            id: CategoryId::new(),
            name: validate_category_name(name)?,
        })
    }

    /// Same category under a new name.
    pub fn renamed(&self, name: &str) -> Result<Self, DomainError> {
        Ok(Self {
            id: self.id,
            name: validate_category_name(name)?,
        })
    }
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Trim and check a category name.
pub fn validate_category_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("category name cannot be empty"));
    }
    Ok(name.to_string())
}
