use crate::error::{Result, SanctuaryError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_API_BASE_URL: &str = "https://ai-hub-server.vercel.app/api";
const DEFAULT_STATIC_VIDEOS_PATH: &str = "videos.json";
const DEFAULT_LIST_ENDPOINT: &str = "videos";
const DEFAULT_SUBMIT_ENDPOINT: &str = "parse-video";

pub const CONFIG_KEYS: [&str; 5] = [
    "video-source",
    "api-base-url",
    "static-videos-path",
    "list-endpoint",
    "submit-endpoint",
];

/// Where the video page gets its videos from. Exactly one is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoSourceKind {
    #[default]
    Remote,
    Static,
}

impl fmt::Display for VideoSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoSourceKind::Remote => f.write_str("remote"),
            VideoSourceKind::Static => f.write_str("static"),
        }
    }
}

impl FromStr for VideoSourceKind {
    type Err = SanctuaryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "remote" => Ok(VideoSourceKind::Remote),
            "static" => Ok(VideoSourceKind::Static),
            other => Err(SanctuaryError::Config(format!(
                "video-source must be 'remote' or 'static', got '{}'",
                other
            ))),
        }
    }
}

/// Configuration for sanctuary, stored as `config.json` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct SanctuaryConfig {
    #[serde(default)]
    pub video_source: VideoSourceKind,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Relative paths resolve against the data directory
    #[serde(default = "default_static_videos_path")]
    pub static_videos_path: String,

    #[serde(default = "default_list_endpoint")]
    pub list_endpoint: String,

    #[serde(default = "default_submit_endpoint")]
    pub submit_endpoint: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_static_videos_path() -> String {
    DEFAULT_STATIC_VIDEOS_PATH.to_string()
}

fn default_list_endpoint() -> String {
    DEFAULT_LIST_ENDPOINT.to_string()
}

fn default_submit_endpoint() -> String {
    DEFAULT_SUBMIT_ENDPOINT.to_string()
}

impl Default for SanctuaryConfig {
    fn default() -> Self {
        Self {
            video_source: VideoSourceKind::default(),
            api_base_url: default_api_base_url(),
            static_videos_path: default_static_videos_path(),
            list_endpoint: default_list_endpoint(),
            submit_endpoint: default_submit_endpoint(),
        }
    }
}

impl SanctuaryConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: SanctuaryConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "video-source" => Some(self.video_source.to_string()),
            "api-base-url" => Some(self.api_base_url.clone()),
            "static-videos-path" => Some(self.static_videos_path.clone()),
            "list-endpoint" => Some(self.list_endpoint.clone()),
            "submit-endpoint" => Some(self.submit_endpoint.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(SanctuaryError::Config(format!("{} cannot be empty", key)));
        }
        match key {
            "video-source" => self.video_source = value.parse()?,
            "api-base-url" => self.api_base_url = value.trim_end_matches('/').to_string(),
            "static-videos-path" => self.static_videos_path = value.to_string(),
            "list-endpoint" => self.list_endpoint = value.trim_matches('/').to_string(),
            "submit-endpoint" => self.submit_endpoint = value.trim_matches('/').to_string(),
            _ => {
                return Err(SanctuaryError::Config(format!(
                    "Unknown config key: {}",
                    key
                )))
            }
        }
        Ok(())
    }

    pub fn list_url(&self) -> String {
        format!("{}/{}", self.api_base_url, self.list_endpoint)
    }

    pub fn submit_url(&self) -> String {
        format!("{}/{}", self.api_base_url, self.submit_endpoint)
    }
}
