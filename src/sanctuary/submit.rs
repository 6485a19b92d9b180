//! The add-video form.

use crate::app::VideoPage;
use crate::error::Result;
use crate::reducers::VideoAction;
use crate::remote::{SubmitRequest, VideoSource};
use crate::youtube::extract_video_id;
use serde_json::Value;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddVideoForm {
    pub url: String,
    pub selected_tags: Vec<String>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AddVideoForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.selected_tags.iter().position(|t| t == tag) {
            self.selected_tags.remove(pos);
        } else {
            self.selected_tags.push(tag.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.url.clear();
        self.selected_tags.clear();
        self.error = None;
    }

    /// Validates the URL and posts it with the selected tags.
    ///
    /// On success the form is cleared. On failure the message is kept in
    /// `error` and the input stays for another attempt. `is_loading` is
    /// false again when this returns, whatever the outcome.
    pub async fn submit(&mut self, source: &dyn VideoSource) -> Result<Value> {
        self.is_loading = true;
        self.error = None;
        let outcome = self.send(source).await;
        self.is_loading = false;

        match &outcome {
            Ok(_) => {
                info!(url = %self.url, "video submitted");
                self.clear();
            }
            Err(e) => {
                debug!(error = %e, "video submission failed");
                self.error = Some(e.to_string());
            }
        }
        outcome
    }

    async fn send(&self, source: &dyn VideoSource) -> Result<Value> {
        extract_video_id(&self.url)?;
        let request = SubmitRequest {
            tags: self.selected_tags.clone(),
            url: self.url.clone(),
        };
        source.submit_video(&request).await
    }
}

impl VideoPage {
    pub fn open_add_video(&mut self) {
        self.dispatch(VideoAction::SetIsAddVideoModalOpen(true));
    }

    /// Closing the modal discards whatever was typed into `form`.
    pub fn close_add_video(&mut self, form: &mut AddVideoForm) {
        form.clear();
        self.dispatch(VideoAction::SetIsAddVideoModalOpen(false));
    }

    /// Submits `form`; on success closes the modal and reloads the list so
    /// the new video shows up.
    pub async fn submit_video(
        &mut self,
        form: &mut AddVideoForm,
        source: &dyn VideoSource,
    ) -> Result<Value> {
        let body = form.submit(source).await?;
        self.dispatch(VideoAction::SetIsAddVideoModalOpen(false));
        self.load(source).await;
        Ok(body)
    }
}
