//! Many-to-many association between resources and tags.

use crate::error::{Result, SanctuaryError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTag {
    pub resource_id: String,
    pub tag_id: String,
    pub created_at: DateTime<Utc>,
}

pub fn create_resource_tag(resource_id: &str, tag_id: &str) -> Result<ResourceTag> {
    if resource_id.trim().is_empty() {
        return Err(SanctuaryError::missing("ResourceTag", "resourceId"));
    }
    if tag_id.trim().is_empty() {
        return Err(SanctuaryError::missing("ResourceTag", "tagId"));
    }
    Ok(ResourceTag {
        resource_id: resource_id.to_string(),
        tag_id: tag_id.to_string(),
        created_at: Utc::now(),
    })
}

/// One association per tag id, failing on the first empty id.
pub fn add_tags_to_resource<S: AsRef<str>>(
    resource_id: &str,
    tag_ids: &[S],
) -> Result<Vec<ResourceTag>> {
    tag_ids
        .iter()
        .map(|tag_id| create_resource_tag(resource_id, tag_id.as_ref()))
        .collect()
}

pub fn resource_tag_ids(resource_id: &str, links: &[ResourceTag]) -> Vec<String> {
    links
        .iter()
        .filter(|rt| rt.resource_id == resource_id)
        .map(|rt| rt.tag_id.clone())
        .collect()
}

pub fn tag_resource_ids(tag_id: &str, links: &[ResourceTag]) -> Vec<String> {
    links
        .iter()
        .filter(|rt| rt.tag_id == tag_id)
        .map(|rt| rt.resource_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projections_follow_links() {
        let mut links = add_tags_to_resource("r1", &["ai", "ml"]).unwrap();
        links.extend(add_tags_to_resource("r2", &["ai"]).unwrap());

        assert_eq!(resource_tag_ids("r1", &links), vec!["ai", "ml"]);
        assert_eq!(resource_tag_ids("r3", &links), Vec::<String>::new());
        assert_eq!(tag_resource_ids("ai", &links), vec!["r1", "r2"]);
        assert_eq!(tag_resource_ids("ml", &links), vec!["r1"]);
    }

    #[test]
    fn empty_ids_are_rejected() {
        assert_eq!(
            create_resource_tag("", "ai").unwrap_err().to_string(),
            "ResourceTag resourceId is required"
        );
        assert!(add_tags_to_resource("r1", &["ai", " "]).is_err());
    }
}
