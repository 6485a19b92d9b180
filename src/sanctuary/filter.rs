//! Derived views over resource, tag and video collections.
//!
//! Every function here borrows its input, preserves input order, and returns
//! references into the input. An empty filter set returns the whole
//! collection.
//!
//! Search terms match case-insensitively as substrings. Tag selection is AND
//! logic: an item must carry every selected tag.

use crate::model::{Resource, ResourceKind, Tag, Video};
use serde::{Deserialize, Serialize};

/// Which resources the resource view currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceFilters {
    #[serde(rename = "type")]
    pub kind: Option<ResourceKind>,
    /// Tag ids that must all be present
    pub tags: Vec<String>,
    pub search: String,
}

impl ResourceFilters {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.tags.is_empty() && self.search.is_empty()
    }
}

/// Which tags the tag view currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagFilters {
    pub category: Option<String>,
    pub search: String,
}

impl TagFilters {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.search.is_empty()
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Type, then title-or-description search, then all selected tags.
pub fn filter_resources<'a>(
    resources: &'a [Resource],
    filters: &ResourceFilters,
) -> Vec<&'a Resource> {
    let search = filters.search.to_lowercase();
    resources
        .iter()
        .filter(|r| filters.kind.is_none() || filters.kind == Some(r.kind))
        .filter(|r| {
            search.is_empty()
                || contains_ci(&r.title, &search)
                || contains_ci(&r.description, &search)
        })
        .filter(|r| filters.tags.iter().all(|tag_id| r.has_tag(tag_id)))
        .collect()
}

/// Category, then name search.
pub fn filter_tags<'a>(tags: &'a [Tag], filters: &TagFilters) -> Vec<&'a Tag> {
    let search = filters.search.to_lowercase();
    tags.iter()
        .filter(|t| match &filters.category {
            Some(category) => t.category.as_ref() == Some(category),
            None => true,
        })
        .filter(|t| search.is_empty() || contains_ci(&t.name, &search))
        .collect()
}

/// Title search, then (only when tags are selected) all selected tags.
pub fn filter_videos<'a>(
    videos: &'a [Video],
    search_term: &str,
    selected_tags: &[String],
) -> Vec<&'a Video> {
    let search = search_term.to_lowercase();
    videos
        .iter()
        .filter(|v| contains_ci(&v.title, &search))
        .filter(|v| selected_tags.iter().all(|tag| v.has_tag(tag)))
        .collect()
}

pub fn find_resource<'a>(resources: &'a [Resource], id: &str) -> Option<&'a Resource> {
    resources.iter().find(|r| r.id == id)
}

pub fn resources_by_kind(resources: &[Resource], kind: ResourceKind) -> Vec<&Resource> {
    resources.iter().filter(|r| r.kind == kind).collect()
}

pub fn resources_by_tag<'a>(resources: &'a [Resource], tag_id: &str) -> Vec<&'a Resource> {
    resources.iter().filter(|r| r.has_tag(tag_id)).collect()
}
