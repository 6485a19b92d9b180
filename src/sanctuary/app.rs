//! # Store wiring
//!
//! [`App`] owns one [`ResourceStore`], the single [`TagStore`] and the tag
//! view's [`TagState`]. It decides once, at construction, whether storage is
//! usable and hands either the shared [`Persistence`] or nothing to the stores.
//! [`App::mount`] performs the initial load of both.
//!
//! [`VideoPage`] holds the video page state and loads it from a
//! [`VideoSource`]. It is independent of storage.
//!
//! ## Dispatch
//!
//! Reducers are pure. The store that owns a slice runs the reducer, then
//! performs the side effects the action implies: for resources, every
//! mutating action writes the whole resulting collection back to storage.
//! Subscribers are notified after that.

use crate::error::Result;
use crate::events::{Listeners, SubscriptionId};
use crate::model::Resource;
use crate::reducers::{resource, tag, video};
use crate::reducers::{ResourceAction, ResourceState, TagAction, TagState, VideoAction, VideoState};
use crate::remote::VideoSource;
use crate::storage::{Persistence, RESOURCES_KEY};
use crate::tags::TagStore;
use crate::validation::is_valid_resource_record;
use serde_json::Value;
use std::mem;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct ResourceStore {
    state: ResourceState,
    persistence: Option<Persistence>,
    listeners: Listeners<ResourceState>,
}

impl ResourceStore {
    pub fn new(persistence: Persistence) -> Self {
        Self {
            persistence: Some(persistence),
            ..Default::default()
        }
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ResourceState {
        &self.state
    }

    pub fn resources(&self) -> &[Resource] {
        &self.state.resources
    }

    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&ResourceState) + 'static,
    ) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn dispatch(&mut self, action: ResourceAction) {
        let persist = action.mutates_resources();
        let state = mem::take(&mut self.state);
        self.state = resource::reduce(state, action);

        if persist {
            if let Some(persistence) = &self.persistence {
                persistence.save(RESOURCES_KEY, &self.state.resources);
            }
        }
        self.listeners.emit(&self.state);
    }

    /// Initial load: `FETCH_RESOURCES_START`, read storage, then
    /// `FETCH_RESOURCES_SUCCESS`. Stored records missing a required field
    /// are skipped.
    pub fn mount(&mut self) {
        self.dispatch(ResourceAction::FetchResourcesStart);
        let resources = self.read_stored();
        debug!(count = resources.len(), "resources loaded");
        self.dispatch(ResourceAction::FetchResourcesSuccess(resources));
    }

    fn read_stored(&self) -> Vec<Resource> {
        let Some(persistence) = &self.persistence else {
            return Vec::new();
        };
        let records: Vec<Value> = persistence.load(RESOURCES_KEY, Vec::new());
        let total = records.len();
        let resources: Vec<Resource> = records
            .into_iter()
            .filter(is_valid_resource_record)
            .filter_map(|record| serde_json::from_value(record).ok())
            .collect();
        if resources.len() < total {
            warn!(
                skipped = total - resources.len(),
                "ignored malformed resource records in storage"
            );
        }
        resources
    }
}

/// The application coordinator.
#[derive(Debug, Default)]
pub struct App {
    resources: ResourceStore,
    tags: TagStore,
    tag_state: TagState,
    tag_listeners: Listeners<TagState>,
}

impl App {
    /// Wires both stores to `persistence` when it passes the availability
    /// check, otherwise runs without persistence.
    pub fn new(persistence: Persistence) -> Self {
        if persistence.is_available() {
            Self {
                resources: ResourceStore::new(persistence.clone()),
                tags: TagStore::new(persistence),
                ..Default::default()
            }
        } else {
            warn!("storage is not available. Resources and tags will not persist.");
            Self::in_memory()
        }
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn is_persistent(&self) -> bool {
        self.tags.is_persistent()
    }

    pub fn mount(&mut self) {
        self.resources.mount();

        self.dispatch_tag(TagAction::FetchTagsStart);
        self.tags.load_tags();
        self.dispatch_tag(TagAction::FetchTagsSuccess);
    }

    pub fn resources(&self) -> &ResourceStore {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceStore {
        &mut self.resources
    }

    pub fn tags(&self) -> &TagStore {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut TagStore {
        &mut self.tags
    }

    pub fn tag_state(&self) -> &TagState {
        &self.tag_state
    }

    /// Registers a listener called with the tag view state after each tag
    /// dispatch.
    pub fn subscribe_tag_state(
        &mut self,
        listener: impl FnMut(&TagState) + 'static,
    ) -> SubscriptionId {
        self.tag_listeners.subscribe(listener)
    }

    pub fn unsubscribe_tag_state(&mut self, id: SubscriptionId) -> bool {
        self.tag_listeners.unsubscribe(id)
    }

    pub fn dispatch_resource(&mut self, action: ResourceAction) {
        self.resources.dispatch(action);
    }

    pub fn dispatch_tag(&mut self, action: TagAction) {
        let state = mem::take(&mut self.tag_state);
        self.tag_state = tag::reduce(state, action, &mut self.tags);
        self.tag_listeners.emit(&self.tag_state);
    }

    /// Same as [`App::dispatch_tag`], but a rejected mutation is also
    /// returned to the caller.
    pub fn try_dispatch_tag(&mut self, action: TagAction) -> Result<()> {
        let state = mem::take(&mut self.tag_state);
        let (state, outcome) = tag::apply(state, action, &mut self.tags);
        self.tag_state = state;
        self.tag_listeners.emit(&self.tag_state);
        outcome
    }
}

/// State of the video page.
#[derive(Debug, Default)]
pub struct VideoPage {
    state: VideoState,
}

impl VideoPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &VideoState {
        &self.state
    }

    pub fn dispatch(&mut self, action: VideoAction) {
        let state = mem::take(&mut self.state);
        self.state = video::reduce(state, action);
    }

    /// Loads the video list from `source`.
    ///
    /// Loading is flagged before the request goes out. A failure is recorded
    /// as the page error and leaves previously loaded videos in place.
    pub async fn load(&mut self, source: &dyn VideoSource) {
        self.dispatch(VideoAction::SetError(None));
        self.dispatch(VideoAction::SetLoading(true));

        match source.fetch_videos().await {
            Ok(videos) => {
                debug!(count = videos.len(), source = source.source_name(), "videos loaded");
                self.dispatch(VideoAction::SetVideos(videos));
            }
            Err(e) => {
                warn!(error = %e, source = source.source_name(), "failed to load videos");
                self.dispatch(VideoAction::SetError(Some(e.to_string())));
            }
        }
        self.dispatch(VideoAction::SetLoading(false));
    }

    pub fn open_video(&mut self, id: impl Into<String>) {
        self.dispatch(VideoAction::SetActiveVideo(Some(id.into())));
    }

    pub fn close_video(&mut self) {
        self.dispatch(VideoAction::SetActiveVideo(None));
    }
}
