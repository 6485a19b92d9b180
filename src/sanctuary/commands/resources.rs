use super::{is_blank, new_id, CmdMessage, CmdResult};
use crate::app::App;
use crate::error::{Result, SanctuaryError};
use crate::filter::{find_resource, resources_by_kind, resources_by_tag, ResourceFilters};
use crate::model::{create_resource, NewResource, Resource, ResourceKind};
use crate::reducers::{ResourceAction, ResourceFilterUpdate};

/// Field changes for [`edit`]. `None` leaves the field as it is.
#[derive(Debug, Clone, Default)]
pub struct ResourceChanges {
    pub kind: Option<ResourceKind>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ResourceChanges {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.title.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.tags.is_none()
    }
}

/// Adds a resource. A missing id is generated; ids must be unique.
pub fn add(app: &mut App, mut draft: NewResource) -> Result<CmdResult> {
    if is_blank(draft.id.as_deref()) {
        draft.id = Some(new_id());
    }
    let resource = create_resource(draft)?;
    if find_resource(app.resources().resources(), &resource.id).is_some() {
        return Err(SanctuaryError::DuplicateResourceId(resource.id));
    }

    app.dispatch_resource(ResourceAction::AddResource(resource.clone()));

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added {} \"{}\"",
        resource.kind, resource.title
    )));
    Ok(result.with_affected_resources(vec![resource]))
}

/// Replaces the stored resource with the same id and stamps `updated_at`.
pub fn update(app: &mut App, mut resource: Resource) -> Result<CmdResult> {
    if resource.id.trim().is_empty() {
        return Err(SanctuaryError::missing_id("update", "resource"));
    }
    if find_resource(app.resources().resources(), &resource.id).is_none() {
        return Err(SanctuaryError::ResourceNotFound(resource.id));
    }
    resource.touch();

    app.dispatch_resource(ResourceAction::UpdateResource(resource.clone()));

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Updated \"{}\"",
        resource.title
    )));
    Ok(result.with_affected_resources(vec![resource]))
}

/// Applies `changes` to the resource with `id`, then [`update`]s it.
pub fn edit(app: &mut App, id: &str, changes: ResourceChanges) -> Result<CmdResult> {
    let mut resource = find_resource(app.resources().resources(), id)
        .cloned()
        .ok_or_else(|| SanctuaryError::ResourceNotFound(id.to_string()))?;

    if let Some(kind) = changes.kind {
        resource.kind = kind;
    }
    if let Some(title) = changes.title {
        if title.trim().is_empty() {
            return Err(SanctuaryError::missing("Resource", "title"));
        }
        resource.title = title;
    }
    if let Some(url) = changes.url {
        if url.trim().is_empty() {
            return Err(SanctuaryError::missing("Resource", "url"));
        }
        resource.url = url;
    }
    if let Some(description) = changes.description {
        resource.description = description;
    }
    if let Some(tags) = changes.tags {
        resource.tags.clear();
        for tag in tags {
            if !resource.tags.contains(&tag) {
                resource.tags.push(tag);
            }
        }
    }
    update(app, resource)
}

pub fn delete(app: &mut App, id: &str) -> Result<CmdResult> {
    if id.trim().is_empty() {
        return Err(SanctuaryError::missing_id("delete", "resource"));
    }
    let removed = find_resource(app.resources().resources(), id)
        .cloned()
        .ok_or_else(|| SanctuaryError::ResourceNotFound(id.to_string()))?;

    app.dispatch_resource(ResourceAction::DeleteResource(id.to_string()));

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Deleted \"{}\"",
        removed.title
    )));
    Ok(result.with_affected_resources(vec![removed]))
}

/// Sets the resource view filters and lists what they let through.
pub fn list(app: &mut App, filters: ResourceFilters) -> Result<CmdResult> {
    app.dispatch_resource(ResourceAction::ClearFilters);
    if filters.kind.is_some() {
        app.dispatch_resource(ResourceAction::SetFilter(ResourceFilterUpdate::Type(
            filters.kind,
        )));
    }
    if !filters.tags.is_empty() {
        app.dispatch_resource(ResourceAction::SetFilter(ResourceFilterUpdate::Tags(
            filters.tags,
        )));
    }
    if !filters.search.is_empty() {
        app.dispatch_resource(ResourceAction::SetFilter(ResourceFilterUpdate::Search(
            filters.search,
        )));
    }

    let state = app.resources().state();
    let listed: Vec<Resource> = state.visible_resources().into_iter().cloned().collect();
    let mut result = CmdResult::default();
    if let Some(error) = &state.error {
        result.add_message(CmdMessage::warning(error.clone()));
    }
    Ok(result.with_listed_resources(listed))
}

pub fn get(app: &App, id: &str) -> Result<CmdResult> {
    let resource = find_resource(app.resources().resources(), id)
        .cloned()
        .ok_or_else(|| SanctuaryError::ResourceNotFound(id.to_string()))?;
    Ok(CmdResult::default().with_listed_resources(vec![resource]))
}

pub fn by_kind(app: &App, kind: ResourceKind) -> CmdResult {
    let listed = resources_by_kind(app.resources().resources(), kind)
        .into_iter()
        .cloned()
        .collect();
    CmdResult::default().with_listed_resources(listed)
}

pub fn by_tag(app: &App, tag_id: &str) -> CmdResult {
    let listed = resources_by_tag(app.resources().resources(), tag_id)
        .into_iter()
        .cloned()
        .collect();
    CmdResult::default().with_listed_resources(listed)
}

/// Adds an already built resource unless its id is taken. Returns whether
/// it was added.
pub fn import(app: &mut App, resource: Resource) -> bool {
    if find_resource(app.resources().resources(), &resource.id).is_some() {
        return false;
    }
    app.dispatch_resource(ResourceAction::AddResource(resource));
    true
}
