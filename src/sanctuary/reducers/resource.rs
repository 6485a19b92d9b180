use crate::filter::{filter_resources, ResourceFilters};
use crate::model::{Resource, ResourceKind};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::trace;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    pub resources: Vec<Resource>,
    pub loading: bool,
    pub error: Option<String>,
    pub filters: ResourceFilters,
}

impl ResourceState {
    pub fn visible_resources(&self) -> Vec<&Resource> {
        filter_resources(&self.resources, &self.filters)
    }
}

/// One filter key and its new value, as carried by `SET_FILTER`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "lowercase")]
pub enum ResourceFilterUpdate {
    Type(Option<ResourceKind>),
    Tags(Vec<String>),
    Search(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    remote = "Self",
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
pub enum ResourceAction {
    FetchResourcesStart,
    FetchResourcesSuccess(Vec<Resource>),
    FetchResourcesError(String),
    AddResource(Resource),
    /// Replaces the resource with the same id; unknown ids change nothing
    UpdateResource(Resource),
    DeleteResource(String),
    SetFilter(ResourceFilterUpdate),
    ClearFilters,
    #[serde(other)]
    Unknown,
}

impl Serialize for ResourceAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        ResourceAction::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for ResourceAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        super::decode_action(deserializer, ResourceAction::deserialize, ResourceAction::Unknown)
    }
}

impl ResourceAction {
    /// Whether the action changes the resource collection and so needs the
    /// collection written back to storage.
    pub fn mutates_resources(&self) -> bool {
        matches!(
            self,
            ResourceAction::AddResource(_)
                | ResourceAction::UpdateResource(_)
                | ResourceAction::DeleteResource(_)
        )
    }
}

pub fn reduce(state: ResourceState, action: ResourceAction) -> ResourceState {
    match action {
        ResourceAction::FetchResourcesStart => ResourceState {
            loading: true,
            error: None,
            ..state
        },
        ResourceAction::FetchResourcesSuccess(resources) => ResourceState {
            resources,
            loading: false,
            error: None,
            ..state
        },
        ResourceAction::FetchResourcesError(error) => ResourceState {
            error: Some(error),
            loading: false,
            ..state
        },
        ResourceAction::AddResource(resource) => {
            let mut resources = state.resources;
            resources.push(resource);
            ResourceState { resources, ..state }
        }
        ResourceAction::UpdateResource(resource) => {
            let resources = state
                .resources
                .into_iter()
                .map(|r| if r.id == resource.id { resource.clone() } else { r })
                .collect();
            ResourceState { resources, ..state }
        }
        ResourceAction::DeleteResource(id) => {
            let mut resources = state.resources;
            resources.retain(|r| r.id != id);
            ResourceState { resources, ..state }
        }
        ResourceAction::SetFilter(update) => {
            let mut filters = state.filters;
            match update {
                ResourceFilterUpdate::Type(kind) => filters.kind = kind,
                ResourceFilterUpdate::Tags(tags) => filters.tags = tags,
                ResourceFilterUpdate::Search(search) => filters.search = search,
            }
            ResourceState { filters, ..state }
        }
        ResourceAction::ClearFilters => ResourceState {
            filters: ResourceFilters::default(),
            ..state
        },
        ResourceAction::Unknown => {
            trace!("ignoring unknown resource action");
            state
        }
    }
}
