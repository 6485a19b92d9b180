use crate::error::{Result, SanctuaryError};
use serde::{Deserialize, Serialize};

/// A loose categorical label for tags. Never persisted on its own; the set of
/// categories is always derived from the tags that reference them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    /// The category a tag's `category` label stands for.
    pub fn from_label(label: &str) -> Self {
        Self {
            id: label.to_string(),
            name: label.to_string(),
        }
    }

    /// Both fields need at least one character. Whitespace counts.
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && !self.name.is_empty()
    }
}

pub fn create_category(id: &str, name: &str) -> Result<Category> {
    let category = Category {
        id: id.to_string(),
        name: name.to_string(),
    };
    if category.is_valid() {
        Ok(category)
    } else {
        Err(SanctuaryError::InvalidCategory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_category_rejects_empty_fields() {
        assert!(create_category("ml", "Machine Learning").is_ok());
        assert!(matches!(
            create_category("", "Machine Learning"),
            Err(SanctuaryError::InvalidCategory)
        ));
        assert!(matches!(
            create_category("ml", ""),
            Err(SanctuaryError::InvalidCategory)
        ));
    }

    #[test]
    fn whitespace_is_a_valid_category_name() {
        let category = create_category("ml", "  ").unwrap();
        assert_eq!(category.name, "  ");
        assert!(Category::from_label("   ").is_valid());
    }

    #[test]
    fn from_label_mirrors_label() {
        let category = Category::from_label("Beginner");
        assert_eq!(category.id, "Beginner");
        assert_eq!(category.name, "Beginner");
        assert!(category.is_valid());
        assert!(!Category::from_label("").is_valid());
    }
}
