//! Required-field predicates.
//!
//! Every predicate here is total: it answers `false` for a missing or blank
//! required field and never fails. Ids are strings everywhere; a blank id is
//! invalid, a numeric-looking one is not special.
//!
//! The `*_record` variants check untyped JSON records, such as entries read
//! back from storage, before they are trusted as typed values.
//!
//! ```
//! use sanctuary::model::{create_resource, NewResource, ResourceKind};
//! use sanctuary::validation::{is_valid_resource, is_valid_video_resource};
//!
//! let r = create_resource(
//!     NewResource::new(ResourceKind::Video, "Intro", "https://youtu.be/dQw4w9WgXcQ").with_id("1"),
//! )
//! .unwrap();
//! assert!(is_valid_resource(&r));
//! assert!(is_valid_video_resource(&r));
//! ```

use crate::model::{Category, Resource, ResourceKind, ResourceTag, Tag};
use serde_json::Value;

fn present(s: &str) -> bool {
    !s.trim().is_empty()
}

pub fn is_valid_resource(resource: &Resource) -> bool {
    present(&resource.id) && present(&resource.title) && present(&resource.url)
}

pub fn is_valid_resource_of_kind(resource: &Resource, kind: ResourceKind) -> bool {
    is_valid_resource(resource) && resource.kind == kind
}

pub fn is_valid_video_resource(resource: &Resource) -> bool {
    is_valid_resource_of_kind(resource, ResourceKind::Video)
}

pub fn is_valid_book_resource(resource: &Resource) -> bool {
    is_valid_resource_of_kind(resource, ResourceKind::Book)
}

pub fn is_valid_article_resource(resource: &Resource) -> bool {
    is_valid_resource_of_kind(resource, ResourceKind::Article)
}

pub fn is_valid_tag(tag: &Tag) -> bool {
    present(&tag.id) && present(&tag.name)
}

pub fn is_valid_category(category: &Category) -> bool {
    category.is_valid()
}

pub fn is_valid_resource_tag(link: &ResourceTag) -> bool {
    present(&link.resource_id) && present(&link.tag_id)
}

fn string_field<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str).filter(|s| present(s))
}

/// Checks an untyped resource record: string `id`, `title`, `url`, and a
/// `type` naming one of the known kinds.
pub fn is_valid_resource_record(record: &Value) -> bool {
    let has_fields = ["id", "title", "url"]
        .iter()
        .all(|key| string_field(record, key).is_some());
    let has_kind = string_field(record, "type")
        .map(|t| t.parse::<ResourceKind>().is_ok())
        .unwrap_or(false);
    has_fields && has_kind
}

/// Checks an untyped tag record: string `id` and `name`.
pub fn is_valid_tag_record(record: &Value) -> bool {
    string_field(record, "id").is_some() && string_field(record, "name").is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{create_resource, NewResource, ResourceKind};
    use serde_json::json;

    fn resource(kind: ResourceKind) -> Resource {
        create_resource(NewResource::new(kind, "Title", "https://example.com").with_id("1"))
            .unwrap()
    }

    #[test]
    fn valid_resource_passes() {
        assert!(is_valid_resource(&resource(ResourceKind::Book)));
    }

    #[test]
    fn blank_fields_fail() {
        let mut r = resource(ResourceKind::Video);
        r.title = " ".into();
        assert!(!is_valid_resource(&r));

        let mut r = resource(ResourceKind::Video);
        r.id = String::new();
        assert!(!is_valid_resource(&r));
    }

    #[test]
    fn numeric_looking_string_ids_are_fine() {
        let mut r = resource(ResourceKind::Video);
        r.id = "42".into();
        assert!(is_valid_resource(&r));
    }

    #[test]
    fn kind_validators_check_discriminator() {
        let video = resource(ResourceKind::Video);
        let book = resource(ResourceKind::Book);
        let article = resource(ResourceKind::Article);

        assert!(is_valid_video_resource(&video));
        assert!(!is_valid_video_resource(&book));
        assert!(is_valid_book_resource(&book));
        assert!(!is_valid_book_resource(&article));
        assert!(is_valid_article_resource(&article));
        assert!(!is_valid_article_resource(&video));
    }

    #[test]
    fn tag_and_category_predicates() {
        assert!(is_valid_tag(&Tag::new("1", "AI")));
        assert!(!is_valid_tag(&Tag::new("1", "")));
        assert!(!is_valid_tag(&Tag::new(" ", "AI")));
        assert!(is_valid_category(&Category::from_label("ML")));
        assert!(is_valid_category(&Category::from_label(" ")));
        assert!(!is_valid_category(&Category::from_label("")));
    }

    #[test]
    fn resource_tag_predicate() {
        let link = crate::model::create_resource_tag("r1", "t1").unwrap();
        assert!(is_valid_resource_tag(&link));
        let blank = ResourceTag {
            tag_id: "".into(),
            ..link
        };
        assert!(!is_valid_resource_tag(&blank));
    }

    #[test]
    fn record_predicates() {
        assert!(is_valid_resource_record(&json!({
            "id": "1", "type": "book", "title": "T", "url": "u"
        })));
        assert!(!is_valid_resource_record(&json!({
            "id": 1, "type": "book", "title": "T", "url": "u"
        })));
        assert!(!is_valid_resource_record(&json!({
            "id": "1", "type": "podcast", "title": "T", "url": "u"
        })));
        assert!(!is_valid_resource_record(&json!({"id": "3", "type": "article"})));
        assert!(!is_valid_resource_record(&json!("not an object")));

        assert!(is_valid_tag_record(&json!({"id": "1", "name": "AI"})));
        assert!(!is_valid_tag_record(&json!({"id": "1"})));
    }
}
