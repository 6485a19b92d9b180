//! The flat video record served by the video endpoints.
//!
//! This shape predates [`Resource`] and is only used at the ingestion
//! boundary: [`Video::to_resource`] adapts it into the canonical model.

use super::resource::{create_video_resource, Metadata, NewResource, Resource};
use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(alias = "videoId")]
    pub id: String,
    pub title: String,
    #[serde(default, alias = "channelTitle")]
    pub channel: String,
    #[serde(default)]
    pub duration: String,
    #[serde(
        default,
        alias = "thumbnails",
        deserialize_with = "deserialize_thumbnail",
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbnail: Option<String>,
    /// Plain tag names, not tag ids
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Video {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }

    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.id)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Adapts the video into a `video` resource. The plain tag names are
    /// carried over as-is into `tags`.
    pub fn to_resource(&self) -> Result<Resource> {
        let mut metadata = Metadata::new();
        if !self.duration.is_empty() {
            metadata.insert("duration".into(), Value::String(self.duration.clone()));
        }
        if !self.channel.is_empty() {
            metadata.insert("channelTitle".into(), Value::String(self.channel.clone()));
        }
        if let Some(thumbnail) = &self.thumbnail {
            metadata.insert("thumbnail".into(), Value::String(thumbnail.clone()));
        }

        create_video_resource(
            NewResource {
                id: Some(self.id.clone()),
                title: Some(self.title.clone()),
                url: Some(self.watch_url()),
                ..Default::default()
            }
            .with_tags(self.tags.iter().cloned())
            .with_metadata(metadata),
        )
    }
}

/// Accepts either a bare URL string or the `{ high: { url }, medium: ..., default: ... }`
/// object and keeps the best available URL.
fn deserialize_thumbnail<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(url)) => Some(url),
        Some(Value::Object(sizes)) => ["high", "medium", "default"]
            .iter()
            .filter_map(|size| sizes.get(*size))
            .find_map(|entry| entry.get("url").and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    })
}
