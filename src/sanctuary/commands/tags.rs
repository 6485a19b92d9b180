use super::{is_blank, new_id, CmdMessage, CmdResult};
use crate::app::App;
use crate::error::{Result, SanctuaryError};
use crate::filter::TagFilters;
use crate::model::{Tag, TagUpdate};
use crate::reducers::{TagAction, TagFilterUpdate};

/// Adds a tag through the tag reducer. A missing id is generated.
pub fn add(app: &mut App, mut tag: Tag) -> Result<CmdResult> {
    if is_blank(Some(&tag.id)) {
        tag.id = new_id();
    }
    let id = tag.id.clone();
    app.try_dispatch_tag(TagAction::AddTag(tag))?;

    let added: Vec<Tag> = app.tags().get_tag_by_id(&id).cloned().into_iter().collect();
    let mut result = CmdResult::default();
    for tag in &added {
        result.add_message(CmdMessage::success(format!("Added tag \"{}\"", tag.name)));
    }
    Ok(result.with_affected_tags(added))
}

pub fn update(app: &mut App, id: &str, updates: TagUpdate) -> Result<CmdResult> {
    if id.trim().is_empty() {
        return Err(SanctuaryError::missing_id("update", "tag"));
    }
    let mut result = CmdResult::default();
    if updates.is_empty() {
        result.add_message(CmdMessage::info("Nothing to update"));
        return Ok(result);
    }

    app.try_dispatch_tag(TagAction::UpdateTag {
        id: id.to_string(),
        updates,
    })?;

    let updated: Vec<Tag> = app.tags().get_tag_by_id(id).cloned().into_iter().collect();
    for tag in &updated {
        result.add_message(CmdMessage::success(format!("Updated tag \"{}\"", tag.name)));
    }
    Ok(result.with_affected_tags(updated))
}

pub fn delete(app: &mut App, id: &str) -> Result<CmdResult> {
    if id.trim().is_empty() {
        return Err(SanctuaryError::missing_id("delete", "tag"));
    }
    let removed: Vec<Tag> = app.tags().get_tag_by_id(id).cloned().into_iter().collect();
    app.try_dispatch_tag(TagAction::DeleteTag(id.to_string()))?;

    let mut result = CmdResult::default();
    for tag in &removed {
        result.add_message(CmdMessage::success(format!("Deleted tag \"{}\"", tag.name)));
    }
    Ok(result.with_affected_tags(removed))
}

/// Sets the tag view filters and lists what they let through.
pub fn list(app: &mut App, filters: TagFilters) -> Result<CmdResult> {
    app.dispatch_tag(TagAction::ClearFilters);
    if filters.category.is_some() {
        app.dispatch_tag(TagAction::SetFilter(TagFilterUpdate::Category(
            filters.category,
        )));
    }
    if !filters.search.is_empty() {
        app.dispatch_tag(TagAction::SetFilter(TagFilterUpdate::Search(
            filters.search,
        )));
    }

    let listed: Vec<Tag> = app
        .tag_state()
        .visible_tags(app.tags())
        .into_iter()
        .cloned()
        .collect();
    Ok(CmdResult::default().with_listed_tags(listed))
}

pub fn get(app: &App, id: &str) -> Result<CmdResult> {
    let tag = app
        .tags()
        .get_tag_by_id(id)
        .cloned()
        .ok_or_else(|| SanctuaryError::TagNotFound(id.to_string()))?;
    Ok(CmdResult::default().with_listed_tags(vec![tag]))
}

pub fn by_category(app: &App, category: Option<&str>) -> CmdResult {
    let listed = app
        .tags()
        .get_tags_by_category(category)
        .into_iter()
        .cloned()
        .collect();
    CmdResult::default().with_listed_tags(listed)
}

pub fn categories(app: &App) -> CmdResult {
    CmdResult::default().with_categories(app.tags().get_all_categories())
}

/// Maps each reference to a tag id. A reference is either a tag id or a tag
/// name (case-insensitive); names shared across categories are ambiguous.
pub fn resolve(app: &App, refs: &[String]) -> Result<Vec<String>> {
    let tags = app.tags().tags();
    refs.iter()
        .map(|reference| {
            if let Some(tag) = app.tags().get_tag_by_id(reference) {
                return Ok(tag.id.clone());
            }
            let wanted = reference.to_lowercase();
            let matches: Vec<&Tag> = tags
                .iter()
                .filter(|t| t.name.to_lowercase() == wanted)
                .collect();
            match matches.as_slice() {
                [only] => Ok(only.id.clone()),
                [] => Err(SanctuaryError::TagNotFound(reference.clone())),
                _ => Err(SanctuaryError::Api(format!(
                    "Tag name \"{}\" is ambiguous, use its id",
                    reference
                ))),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_tags() -> App {
        let mut app = App::in_memory();
        add(&mut app, Tag::new("1", "Intro").with_category("Beginner")).unwrap();
        add(&mut app, Tag::new("2", "AI").with_category("Topics")).unwrap();
        add(&mut app, Tag::new("3", "Intro").with_category("Advanced")).unwrap();
        app
    }

    #[test]
    fn add_generates_missing_id() {
        let mut app = App::in_memory();
        let result = add(&mut app, Tag::new("", "Rust")).unwrap();
        assert_eq!(result.affected_tags.len(), 1);
        assert!(!result.affected_tags[0].id.is_empty());
    }

    #[test]
    fn duplicate_is_returned_and_recorded() {
        let mut app = app_with_tags();
        let err = add(&mut app, Tag::new("4", "intro").with_category("Beginner")).unwrap_err();
        assert!(matches!(err, SanctuaryError::DuplicateTag { .. }));
        assert_eq!(app.tag_state().error.as_deref(), Some(err.to_string().as_str()));
        assert_eq!(app.tags().len(), 3);
    }

    #[test]
    fn update_and_delete_need_ids() {
        let mut app = app_with_tags();
        assert_eq!(
            update(&mut app, "", TagUpdate::name("x")).unwrap_err().to_string(),
            "Cannot update a tag without an id"
        );
        assert_eq!(
            delete(&mut app, " ").unwrap_err().to_string(),
            "Cannot delete a tag without an id"
        );

        let result = update(&mut app, "2", TagUpdate::name("Machine Learning")).unwrap();
        assert_eq!(result.affected_tags[0].name, "Machine Learning");
        assert!(update(&mut app, "2", TagUpdate::default())
            .unwrap()
            .affected_tags
            .is_empty());

        delete(&mut app, "2").unwrap();
        assert!(matches!(
            delete(&mut app, "2"),
            Err(SanctuaryError::TagNotFound(_))
        ));
    }

    #[test]
    fn list_and_lookups() {
        let mut app = app_with_tags();
        let filters = TagFilters {
            search: "INTRO".into(),
            ..Default::default()
        };
        assert_eq!(list(&mut app, filters).unwrap().listed_tags.len(), 2);
        assert_eq!(
            list(&mut app, TagFilters::default()).unwrap().listed_tags.len(),
            3
        );
        assert_eq!(by_category(&app, Some("Topics")).listed_tags.len(), 1);
        assert_eq!(
            categories(&app).categories,
            vec!["Beginner", "Topics", "Advanced"]
        );
        assert_eq!(get(&app, "2").unwrap().listed_tags[0].name, "AI");
    }

    #[test]
    fn resolve_accepts_ids_and_unique_names() {
        let app = app_with_tags();
        assert_eq!(
            resolve(&app, &["2".into(), "ai".into()]).unwrap(),
            vec!["2", "2"]
        );
        assert!(resolve(&app, &["intro".into()]).is_err());
        assert!(matches!(
            resolve(&app, &["rust".into()]),
            Err(SanctuaryError::TagNotFound(_))
        ));
    }
}
