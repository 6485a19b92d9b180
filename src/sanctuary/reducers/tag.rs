use crate::error::{Result, SanctuaryError};
use crate::filter::{filter_tags, TagFilters};
use crate::model::{Tag, TagUpdate};
use crate::tags::TagStore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace};

/// Loading/error flags and filters for the tag view. The tags themselves are
/// read from the [`TagStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagState {
    pub loading: bool,
    pub error: Option<String>,
    pub filters: TagFilters,
}

impl TagState {
    pub fn visible_tags<'a>(&self, store: &'a TagStore) -> Vec<&'a Tag> {
        filter_tags(store.tags(), &self.filters)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "lowercase")]
pub enum TagFilterUpdate {
    Category(Option<String>),
    Search(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    remote = "Self",
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum TagAction {
    FetchTagsStart,
    FetchTagsSuccess,
    FetchTagsError(String),
    AddTag(Tag),
    UpdateTag { id: String, updates: TagUpdate },
    DeleteTag(String),
    SetFilter(TagFilterUpdate),
    ClearFilters,
    #[serde(other)]
    Unknown,
}

impl Serialize for TagAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        TagAction::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for TagAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        super::decode_action(deserializer, TagAction::deserialize, TagAction::Unknown)
    }
}

/// Applies `action`, forwarding tag mutations to `store`.
///
/// A rejected mutation never fails the dispatch: its message lands in
/// `error` and the store is left as it was. A successful mutation does not
/// clear an earlier error.
pub fn reduce(state: TagState, action: TagAction, store: &mut TagStore) -> TagState {
    apply(state, action, store).0
}

/// Like [`reduce`], also handing back the rejection of a mutating action so
/// the dispatcher can report it.
pub fn apply(
    state: TagState,
    action: TagAction,
    store: &mut TagStore,
) -> (TagState, Result<()>) {
    match action {
        TagAction::FetchTagsStart => (
            TagState {
                loading: true,
                error: None,
                ..state
            },
            Ok(()),
        ),
        TagAction::FetchTagsSuccess => (
            TagState {
                loading: false,
                error: None,
                ..state
            },
            Ok(()),
        ),
        TagAction::FetchTagsError(error) => (
            TagState {
                loading: false,
                error: Some(error),
                ..state
            },
            Ok(()),
        ),
        TagAction::AddTag(tag) => record(state, store.add_tag(tag).map(drop)),
        TagAction::UpdateTag { id, updates } => {
            record(state, store.update_tag(&id, &updates).map(drop))
        }
        TagAction::DeleteTag(id) => {
            let outcome = if store.remove_tag(&id) {
                Ok(())
            } else {
                Err(SanctuaryError::TagNotFound(id))
            };
            record(state, outcome)
        }
        TagAction::SetFilter(update) => {
            let mut filters = state.filters;
            match update {
                TagFilterUpdate::Category(category) => filters.category = category,
                TagFilterUpdate::Search(search) => filters.search = search,
            }
            (TagState { filters, ..state }, Ok(()))
        }
        TagAction::ClearFilters => (
            TagState {
                filters: TagFilters::default(),
                ..state
            },
            Ok(()),
        ),
        TagAction::Unknown => {
            trace!("ignoring unknown tag action");
            (state, Ok(()))
        }
    }
}

fn record(state: TagState, outcome: Result<()>) -> (TagState, Result<()>) {
    match outcome {
        Ok(()) => (state, Ok(())),
        Err(e) => {
            debug!(error = %e, "tag action rejected");
            let state = TagState {
                error: Some(e.to_string()),
                ..state
            };
            (state, Err(e))
        }
    }
}
