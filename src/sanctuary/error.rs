use thiserror::Error;

#[derive(Error, Debug)]
pub enum SanctuaryError {
    #[error("{entity} {field} is required")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("Cannot {action} a {entity} without an id")]
    MissingId {
        action: &'static str,
        entity: &'static str,
    },

    #[error("Unknown resource type: {0}")]
    UnknownResourceType(String),

    #[error("Invalid tag: missing required fields")]
    InvalidTag,

    #[error("Invalid category")]
    InvalidCategory,

    #[error("Tag \"{name}\" already exists in {} category", category.as_deref().unwrap_or("uncategorized"))]
    DuplicateTag {
        name: String,
        category: Option<String>,
    },

    #[error("Tag with ID {0} already exists")]
    DuplicateTagId(String),

    #[error("Tag with ID {0} not found")]
    TagNotFound(String),

    #[error("Resource with ID {0} already exists")]
    DuplicateResourceId(String),

    #[error("Resource with ID {0} not found")]
    ResourceNotFound(String),

    #[error("Video with ID {0} not found")]
    VideoNotFound(String),

    #[error("URL must be a non-empty string")]
    EmptyUrl,

    #[error("Invalid YouTube URL format")]
    InvalidUrl(String),

    #[error("Failed to {action}: {reason}")]
    Http {
        action: &'static str,
        status: u16,
        reason: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl SanctuaryError {
    pub(crate) fn missing(entity: &'static str, field: &'static str) -> Self {
        SanctuaryError::MissingField { entity, field }
    }

    pub(crate) fn missing_id(action: &'static str, entity: &'static str) -> Self {
        SanctuaryError::MissingId { action, entity }
    }
}

pub type Result<T> = std::result::Result<T, SanctuaryError>;
