use crate::error::{Result, SanctuaryError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A label attachable to resources, optionally grouped under a category.
///
/// Tags without a category all share the "uncategorized" bucket for
/// duplicate detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Tag {
    /// Creates a tag without validating it. Use [`create_tag`] or the tag
    /// store to get the required-field checks.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// True when both tags land in the same duplicate-detection slot.
    pub fn collides_with(&self, other: &Tag) -> bool {
        self.category == other.category && self.name.to_lowercase() == other.name.to_lowercase()
    }
}

/// Builds a tag, failing when `id` or `name` is empty.
pub fn create_tag(id: &str, name: &str) -> Result<Tag> {
    if id.trim().is_empty() {
        return Err(SanctuaryError::missing("Tag", "id"));
    }
    if name.trim().is_empty() {
        return Err(SanctuaryError::missing("Tag", "name"));
    }
    Ok(Tag::new(id, name))
}

/// Shallow field overwrite applied by `TagStore::update_tag`.
///
/// `category: Some(None)` clears the category; `None` leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagUpdate {
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "double_option"
    )]
    pub category: Option<Option<String>>,
}

impl TagUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn category(category: Option<String>) -> Self {
        Self {
            category: Some(category),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none()
    }

    pub fn apply(&self, tag: &Tag) -> Tag {
        let mut merged = tag.clone();
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(category) = &self.category {
            merged.category = category.clone();
        }
        merged
    }
}

// Distinguishes an absent `category` key from an explicit `null`.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Option<String>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Option<String>>, D::Error> {
        Option::<String>::deserialize(deserializer).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_tag_requires_id_and_name() {
        assert!(create_tag("t1", "AI").is_ok());
        assert_eq!(
            create_tag("", "AI").unwrap_err().to_string(),
            "Tag id is required"
        );
        assert_eq!(
            create_tag("t1", " ").unwrap_err().to_string(),
            "Tag name is required"
        );
    }

    #[test]
    fn collision_is_case_insensitive_within_category() {
        let a = Tag::new("1", "Intro").with_category("Beginner");
        let b = Tag::new("2", "intro").with_category("Beginner");
        let c = Tag::new("3", "Intro").with_category("Advanced");
        let d = Tag::new("4", "INTRO");
        let e = Tag::new("5", "intro");
        assert!(a.collides_with(&b));
        assert!(!a.collides_with(&c));
        assert!(!a.collides_with(&d));
        assert!(d.collides_with(&e));
    }

    #[test]
    fn update_overwrites_only_given_fields() {
        let tag = Tag::new("1", "Intro").with_category("Beginner");

        let renamed = TagUpdate::name("Basics").apply(&tag);
        assert_eq!(renamed.name, "Basics");
        assert_eq!(renamed.category.as_deref(), Some("Beginner"));
        assert_eq!(renamed.id, "1");

        let uncategorized = TagUpdate::category(None).apply(&tag);
        assert_eq!(uncategorized.category, None);
        assert_eq!(uncategorized.name, "Intro");
    }

    #[test]
    fn update_json_distinguishes_null_from_absent() {
        let clear: TagUpdate = serde_json::from_str(r#"{"category": null}"#).unwrap();
        assert_eq!(clear.category, Some(None));

        let keep: TagUpdate = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        assert_eq!(keep.category, None);
    }

    #[test]
    fn stored_tags_without_timestamp_still_load() {
        let tag: Tag = serde_json::from_str(r#"{"id": "1", "name": "AI"}"#).unwrap();
        assert_eq!(tag.name, "AI");
        assert_eq!(tag.category, None);
    }
}
