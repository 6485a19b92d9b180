use crate::error::{Result, SanctuaryError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Type-specific fields of a resource. Open by design of the stored format:
/// each kind reads the keys it knows about and ignores the rest.
pub type Metadata = serde_json::Map<String, Value>;

/// The closed set of resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Video,
    Book,
    Article,
    Course,
    Tool,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Video,
        ResourceKind::Book,
        ResourceKind::Article,
        ResourceKind::Course,
        ResourceKind::Tool,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Video => "video",
            ResourceKind::Book => "book",
            ResourceKind::Article => "article",
            ResourceKind::Course => "course",
            ResourceKind::Tool => "tool",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = SanctuaryError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower)
            .ok_or_else(|| SanctuaryError::UnknownResourceType(s.to_string()))
    }
}

/// A learning resource.
///
/// `id`, `kind`, `title` and `url` are mandatory and non-empty for any resource
/// built through [`create_resource`]. Serialized field names follow the stored
/// format (`type`, `createdAt`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    /// Tag ids
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: Metadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|t| t == tag_id)
    }

    /// Kind-specific view of the metadata map.
    pub fn details(&self) -> ResourceDetails {
        match self.kind {
            ResourceKind::Video => ResourceDetails::Video(read_metadata(&self.metadata)),
            ResourceKind::Book => ResourceDetails::Book(read_metadata(&self.metadata)),
            ResourceKind::Article => ResourceDetails::Article,
            ResourceKind::Course => ResourceDetails::Course,
            ResourceKind::Tool => ResourceDetails::Tool,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn read_metadata<T: for<'de> Deserialize<'de> + Default>(metadata: &Metadata) -> T {
    serde_json::from_value(Value::Object(metadata.clone())).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceDetails {
    Video(VideoMetadata),
    Book(BookMetadata),
    Article,
    Course,
    Tool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoMetadata {
    pub duration: Option<String>,
    pub channel_title: Option<String>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookMetadata {
    pub authors: Vec<String>,
    pub published_year: Option<i32>,
    pub edition: Option<String>,
    pub isbn: Option<String>,
}

/// Input for [`create_resource`]. Every field is optional here so that missing
/// mandatory fields surface as a [`SanctuaryError::MissingField`] instead of
/// being impossible to express.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewResource {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ResourceKind>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub metadata: Option<Metadata>,
}

impl NewResource {
    pub fn new(
        kind: ResourceKind,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            kind: Some(kind),
            title: Some(title.into()),
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(SanctuaryError::missing("Resource", field)),
    }
}

/// Builds a resource, failing on the first missing mandatory field.
///
/// Optional fields get their defaults (empty description, no tags, empty
/// metadata). Duplicate tag ids are collapsed, keeping first occurrence order.
pub fn create_resource(draft: NewResource) -> Result<Resource> {
    let id = required(draft.id, "id")?;
    let kind = draft
        .kind
        .ok_or_else(|| SanctuaryError::missing("Resource", "type"))?;
    let title = required(draft.title, "title")?;
    let url = required(draft.url, "url")?;

    let mut tags: Vec<String> = Vec::new();
    for tag in draft.tags.unwrap_or_default() {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    let now = Utc::now();
    Ok(Resource {
        id,
        kind,
        title,
        url,
        description: draft.description.unwrap_or_default(),
        tags,
        metadata: draft.metadata.unwrap_or_default(),
        created_at: now,
        updated_at: now,
    })
}

pub fn create_video_resource(draft: NewResource) -> Result<Resource> {
    create_resource(NewResource {
        kind: Some(ResourceKind::Video),
        ..draft
    })
}

pub fn create_book_resource(draft: NewResource) -> Result<Resource> {
    create_resource(NewResource {
        kind: Some(ResourceKind::Book),
        ..draft
    })
}

pub fn create_article_resource(draft: NewResource) -> Result<Resource> {
    create_resource(NewResource {
        kind: Some(ResourceKind::Article),
        ..draft
    })
}
