//! Video sources.
//!
//! [`VideoSource`] is the port the video page and the add-video form talk
//! to. Two adapters exist and configuration picks exactly one:
//!
//! - [`HttpVideoSource`]: the remote API. The list endpoint answers
//!   `{ "data": Video[] }`; the submit endpoint takes `{ tags, url }`.
//! - [`StaticVideoSource`]: a local JSON file holding a bare `Video[]`. It
//!   cannot accept submissions.

use crate::config::{SanctuaryConfig, VideoSourceKind};
use crate::error::{Result, SanctuaryError};
use crate::model::Video;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Body of a video submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub tags: Vec<String>,
    pub url: String,
}

#[async_trait]
pub trait VideoSource: Send + Sync {
    async fn fetch_videos(&self) -> Result<Vec<Video>>;

    /// Returns the parsed response body.
    async fn submit_video(&self, request: &SubmitRequest) -> Result<Value>;

    fn source_name(&self) -> &'static str;
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    data: Vec<Video>,
}

fn http_failure(action: &'static str, status: StatusCode) -> SanctuaryError {
    SanctuaryError::Http {
        action,
        status: status.as_u16(),
        reason: status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_u16().to_string()),
    }
}

pub struct HttpVideoSource {
    client: reqwest::Client,
    list_url: String,
    submit_url: String,
}

impl HttpVideoSource {
    pub fn new(list_url: impl Into<String>, submit_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("sanctuary/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            list_url: list_url.into(),
            submit_url: submit_url.into(),
        })
    }

    pub fn from_config(config: &SanctuaryConfig) -> Result<Self> {
        Self::new(config.list_url(), config.submit_url())
    }
}

#[async_trait]
impl VideoSource for HttpVideoSource {
    async fn fetch_videos(&self) -> Result<Vec<Video>> {
        debug!(url = %self.list_url, "fetching videos");
        let response = self.client.get(&self.list_url).send().await?;
        if !response.status().is_success() {
            return Err(http_failure("fetch videos", response.status()));
        }
        let body: ListResponse = response.json().await?;
        info!(count = body.data.len(), "videos fetched");
        Ok(body.data)
    }

    async fn submit_video(&self, request: &SubmitRequest) -> Result<Value> {
        debug!(url = %self.submit_url, video = %request.url, "submitting video");
        let response = self
            .client
            .post(&self.submit_url)
            .json(request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(http_failure("add video", response.status()));
        }
        Ok(response.json().await?)
    }

    fn source_name(&self) -> &'static str {
        "remote"
    }
}

pub struct StaticVideoSource {
    path: PathBuf,
}

impl StaticVideoSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl VideoSource for StaticVideoSource {
    async fn fetch_videos(&self) -> Result<Vec<Video>> {
        debug!(path = %self.path.display(), "reading static videos");
        let content = tokio::fs::read_to_string(&self.path).await?;
        let videos: Vec<Video> = serde_json::from_str(&content)?;
        Ok(videos)
    }

    async fn submit_video(&self, _request: &SubmitRequest) -> Result<Value> {
        Err(SanctuaryError::Api(
            "the static video source does not accept submissions".to_string(),
        ))
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

/// Builds the source `config` selects. A relative static path resolves
/// against `data_dir`.
pub fn source_from_config(
    config: &SanctuaryConfig,
    data_dir: &Path,
) -> Result<Arc<dyn VideoSource>> {
    match config.video_source {
        VideoSourceKind::Remote => Ok(Arc::new(HttpVideoSource::from_config(config)?)),
        VideoSourceKind::Static => {
            let path = Path::new(&config.static_videos_path);
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                data_dir.join(path)
            };
            Ok(Arc::new(StaticVideoSource::new(path)))
        }
    }
}
