//! Operations behind the API facade.
//!
//! Each submodule works on the stores in [`crate::app`] and returns a
//! [`CmdResult`]: the records it touched or listed, plus user-facing
//! messages. Nothing here prints.

use crate::config::SanctuaryConfig;
use crate::model::{Resource, Tag, Video};

pub mod config;
pub mod resources;
pub mod tags;
pub mod videos;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_resources: Vec<Resource>,
    pub listed_resources: Vec<Resource>,
    pub affected_tags: Vec<Tag>,
    pub listed_tags: Vec<Tag>,
    pub categories: Vec<String>,
    pub listed_videos: Vec<Video>,
    pub config: Option<SanctuaryConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_resources(mut self, resources: Vec<Resource>) -> Self {
        self.affected_resources = resources;
        self
    }

    pub fn with_listed_resources(mut self, resources: Vec<Resource>) -> Self {
        self.listed_resources = resources;
        self
    }

    pub fn with_affected_tags(mut self, tags: Vec<Tag>) -> Self {
        self.affected_tags = tags;
        self
    }

    pub fn with_listed_tags(mut self, tags: Vec<Tag>) -> Self {
        self.listed_tags = tags;
        self
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_listed_videos(mut self, videos: Vec<Video>) -> Self {
        self.listed_videos = videos;
        self
    }

    pub fn with_config(mut self, config: SanctuaryConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// A generated id for records added without one.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}
