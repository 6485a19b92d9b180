//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every sanctuary operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the matching function in `commands/*.rs`
//! - **Normalizes inputs**: tag references given by name are resolved to tag
//!   ids before they reach a resource
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It holds no business logic and never prints.
//!
//! ## Wiring
//!
//! [`SanctuaryApi::open`] is the production constructor: a file-backed
//! [`App`] over the data directory, mounted, plus the video source the
//! config selects. [`SanctuaryApi::new`] takes prebuilt parts, which is how
//! tests run against an in-memory `App` and a fake source.

use crate::app::{App, VideoPage};
use crate::commands;
use crate::config::SanctuaryConfig;
use crate::error::Result;
use crate::filter::{ResourceFilters, TagFilters};
use crate::model::{NewResource, Resource, ResourceKind, Tag, TagUpdate};
use crate::remote::{source_from_config, VideoSource};
use crate::storage::fs::FsBackend;
use crate::storage::Persistence;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;
use tracing::debug;

pub struct SanctuaryApi {
    app: App,
    page: VideoPage,
    source: Arc<dyn VideoSource>,
    data_dir: PathBuf,
}

impl SanctuaryApi {
    pub fn new(app: App, source: Arc<dyn VideoSource>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            app,
            page: VideoPage::new(),
            source,
            data_dir: data_dir.into(),
        }
    }

    /// Opens the library stored in `data_dir` and loads it.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let config = SanctuaryConfig::load(&data_dir)?;
        let source = source_from_config(&config, &data_dir)?;

        let backend = Rc::new(FsBackend::new(data_dir.clone()));
        let mut app = App::new(Persistence::new(backend));
        app.mount();
        debug!(
            dir = %data_dir.display(),
            source = source.source_name(),
            "library opened"
        );
        Ok(Self::new(app, source, data_dir))
    }

    pub fn add_resource(&mut self, mut draft: NewResource) -> Result<commands::CmdResult> {
        if let Some(tags) = draft.tags.take() {
            draft.tags = Some(commands::tags::resolve(&self.app, &tags)?);
        }
        commands::resources::add(&mut self.app, draft)
    }

    pub fn update_resource(&mut self, resource: Resource) -> Result<commands::CmdResult> {
        commands::resources::update(&mut self.app, resource)
    }

    pub fn edit_resource(
        &mut self,
        id: &str,
        mut changes: ResourceChanges,
    ) -> Result<commands::CmdResult> {
        if let Some(tags) = changes.tags.take() {
            changes.tags = Some(commands::tags::resolve(&self.app, &tags)?);
        }
        commands::resources::edit(&mut self.app, id, changes)
    }

    pub fn delete_resource(&mut self, id: &str) -> Result<commands::CmdResult> {
        commands::resources::delete(&mut self.app, id)
    }

    pub fn list_resources(&mut self, mut filters: ResourceFilters) -> Result<commands::CmdResult> {
        filters.tags = commands::tags::resolve(&self.app, &filters.tags)?;
        commands::resources::list(&mut self.app, filters)
    }

    pub fn get_resource(&self, id: &str) -> Result<commands::CmdResult> {
        commands::resources::get(&self.app, id)
    }

    pub fn resources_by_kind(&self, kind: ResourceKind) -> commands::CmdResult {
        commands::resources::by_kind(&self.app, kind)
    }

    pub fn resources_by_tag(&self, tag: &str) -> Result<commands::CmdResult> {
        let ids = commands::tags::resolve(&self.app, &[tag.to_string()])?;
        Ok(commands::resources::by_tag(&self.app, &ids[0]))
    }

    pub fn add_tag(
        &mut self,
        name: &str,
        category: Option<String>,
    ) -> Result<commands::CmdResult> {
        let mut tag = Tag::new("", name);
        tag.category = category;
        commands::tags::add(&mut self.app, tag)
    }

    pub fn update_tag(&mut self, tag: &str, updates: TagUpdate) -> Result<commands::CmdResult> {
        let id = self.resolve_tag(tag)?;
        commands::tags::update(&mut self.app, &id, updates)
    }

    pub fn delete_tag(&mut self, tag: &str) -> Result<commands::CmdResult> {
        let id = self.resolve_tag(tag)?;
        commands::tags::delete(&mut self.app, &id)
    }

    pub fn list_tags(&mut self, filters: TagFilters) -> Result<commands::CmdResult> {
        commands::tags::list(&mut self.app, filters)
    }

    pub fn tags_by_category(&self, category: Option<&str>) -> commands::CmdResult {
        commands::tags::by_category(&self.app, category)
    }

    pub fn categories(&self) -> commands::CmdResult {
        commands::tags::categories(&self.app)
    }

    pub async fn list_videos(
        &mut self,
        search: String,
        tags: Vec<String>,
    ) -> Result<commands::CmdResult> {
        commands::videos::list(&mut self.page, self.source.as_ref(), search, tags).await
    }

    /// Only videos already loaded by [`SanctuaryApi::list_videos`] can be opened.
    pub fn open_video(&mut self, id: &str) -> Result<commands::CmdResult> {
        commands::videos::open(&mut self.page, id)
    }

    pub async fn submit_video(
        &mut self,
        url: String,
        tags: Vec<String>,
    ) -> Result<commands::CmdResult> {
        commands::videos::submit(&mut self.page, self.source.as_ref(), url, tags).await
    }

    pub async fn import_videos(&mut self) -> Result<commands::CmdResult> {
        commands::videos::import(&mut self.app, &mut self.page, self.source.as_ref()).await
    }

    /// Runs a config action. A changed config also swaps the video source.
    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let changes = matches!(action, ConfigAction::Set(..));
        let result = commands::config::run(&self.data_dir, action)?;
        if changes {
            if let Some(config) = &result.config {
                self.source = source_from_config(config, &self.data_dir)?;
            }
        }
        Ok(result)
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn page(&self) -> &VideoPage {
        &self.page
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn is_persistent(&self) -> bool {
        self.app.is_persistent()
    }

    fn resolve_tag(&self, tag: &str) -> Result<String> {
        let mut ids = commands::tags::resolve(&self.app, &[tag.to_string()])?;
        Ok(ids.remove(0))
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::resources::ResourceChanges;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SanctuaryError;
    use crate::model::Video;
    use crate::remote::SubmitRequest;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    struct NoVideos;

    #[async_trait]
    impl VideoSource for NoVideos {
        async fn fetch_videos(&self) -> Result<Vec<Video>> {
            Ok(Vec::new())
        }

        async fn submit_video(&self, _request: &SubmitRequest) -> Result<Value> {
            Ok(json!({}))
        }

        fn source_name(&self) -> &'static str {
            "none"
        }
    }

    fn api(dir: &Path) -> SanctuaryApi {
        SanctuaryApi::new(App::in_memory(), Arc::new(NoVideos), dir)
    }

    #[test]
    fn tag_names_are_resolved_for_resources() {
        let dir = tempdir().unwrap();
        let mut api = api(dir.path());
        let tag_id = api.add_tag("AI", Some("Topics".into())).unwrap().affected_tags[0]
            .id
            .clone();

        let draft = NewResource::new(ResourceKind::Book, "Deep Learning", "https://example.com")
            .with_tags(["ai"]);
        let added = api.add_resource(draft).unwrap().affected_resources.remove(0);
        assert_eq!(added.tags, vec![tag_id.clone()]);

        let filters = ResourceFilters {
            tags: vec!["AI".into()],
            ..Default::default()
        };
        assert_eq!(api.list_resources(filters).unwrap().listed_resources.len(), 1);
        assert_eq!(api.resources_by_tag("ai").unwrap().listed_resources.len(), 1);
    }

    #[test]
    fn unknown_tag_reference_fails_before_adding() {
        let dir = tempdir().unwrap();
        let mut api = api(dir.path());
        let draft = NewResource::new(ResourceKind::Book, "Deep Learning", "https://example.com")
            .with_tags(["missing"]);
        assert!(matches!(
            api.add_resource(draft),
            Err(SanctuaryError::TagNotFound(_))
        ));
        assert!(api.app().resources().resources().is_empty());
    }

    #[test]
    fn tags_are_addressed_by_name_or_id() {
        let dir = tempdir().unwrap();
        let mut api = api(dir.path());
        api.add_tag("AI", None).unwrap();
        api.update_tag("ai", TagUpdate::category(Some("Topics".into())))
            .unwrap();
        assert_eq!(api.categories().categories, vec!["Topics"]);
        api.delete_tag("AI").unwrap();
        assert!(api.list_tags(TagFilters::default()).unwrap().listed_tags.is_empty());
    }

    #[test]
    fn config_set_writes_into_data_dir() {
        let dir = tempdir().unwrap();
        let mut api = api(dir.path());
        api.config(ConfigAction::Set("video-source".into(), "static".into()))
            .unwrap();
        assert!(dir.path().join("config.json").exists());
    }

    #[test]
    fn open_persists_across_instances() {
        let dir = tempdir().unwrap();
        {
            let mut api = SanctuaryApi::open(dir.path()).unwrap();
            assert!(api.is_persistent());
            api.add_resource(NewResource::new(
                ResourceKind::Article,
                "Attention",
                "https://example.com/attention",
            ))
            .unwrap();
        }
        let api = SanctuaryApi::open(dir.path()).unwrap();
        assert_eq!(api.app().resources().resources()[0].title, "Attention");
    }
}
