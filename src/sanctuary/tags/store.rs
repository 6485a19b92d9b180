use super::TagEvent;
use crate::error::{Result, SanctuaryError};
use crate::events::{Listeners, SubscriptionId};
use crate::model::{Category, Tag, TagUpdate};
use crate::storage::{Persistence, TAGS_KEY};
use crate::validation::{is_valid_tag, is_valid_tag_record};
use serde_json::Value;
use tracing::{debug, warn};

/// The tag collection.
///
/// Built with [`TagStore::new`] it writes through to storage on every
/// mutation; [`TagStore::in_memory`] gives a non-persistent working set for
/// when storage is unavailable.
#[derive(Debug, Default)]
pub struct TagStore {
    tags: Vec<Tag>,
    persistence: Option<Persistence>,
    listeners: Listeners<TagEvent>,
}

impl TagStore {
    pub fn new(persistence: Persistence) -> Self {
        Self {
            persistence: Some(persistence),
            ..Default::default()
        }
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn is_persistent(&self) -> bool {
        self.persistence.is_some()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&TagEvent) + 'static) -> SubscriptionId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Validates and appends `tag`, then persists.
    ///
    /// Fails with `InvalidTag`, `InvalidCategory`, `DuplicateTagId` or
    /// `DuplicateTag`, in that order of checking. A failed add leaves the
    /// store untouched.
    pub fn add_tag(&mut self, tag: Tag) -> Result<Tag> {
        let tag = self.checked(tag, None)?;
        if self.tags.iter().any(|t| t.id == tag.id) {
            return Err(SanctuaryError::DuplicateTagId(tag.id));
        }

        self.tags.push(tag.clone());
        debug!(id = %tag.id, name = %tag.name, "tag added");
        self.persist_tags();
        self.listeners.emit(&TagEvent::Added(tag.clone()));
        Ok(tag)
    }

    /// Merges `updates` onto the tag with `id` and re-validates the result
    /// with the same rules as [`TagStore::add_tag`], ignoring the tag itself
    /// in the duplicate check.
    pub fn update_tag(&mut self, id: &str, updates: &TagUpdate) -> Result<Tag> {
        let index = self
            .tags
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| SanctuaryError::TagNotFound(id.to_string()))?;

        let merged = self.checked(updates.apply(&self.tags[index]), Some(id))?;
        self.tags[index] = merged.clone();
        debug!(id, "tag updated");
        self.persist_tags();
        self.listeners.emit(&TagEvent::Updated(merged.clone()));
        Ok(merged)
    }

    /// Returns whether a tag was removed. Unknown ids are a no-op and do not
    /// touch storage.
    pub fn remove_tag(&mut self, id: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t.id != id);
        let removed = self.tags.len() < before;

        if removed {
            debug!(id, "tag removed");
            self.persist_tags();
            self.listeners.emit(&TagEvent::Removed(id.to_string()));
        }
        removed
    }

    pub fn get_tag_by_id(&self, id: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == id)
    }

    /// All tags when `category` is `None`, otherwise the tags in that category.
    pub fn get_tags_by_category(&self, category: Option<&str>) -> Vec<&Tag> {
        match category {
            Some(category) => self
                .tags
                .iter()
                .filter(|t| t.category.as_deref() == Some(category))
                .collect(),
            None => self.tags.iter().collect(),
        }
    }

    /// Distinct categories in first-seen order.
    pub fn get_all_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for category in self.tags.iter().filter_map(|t| t.category.as_ref()) {
            if !categories.contains(category) {
                categories.push(category.clone());
            }
        }
        categories
    }

    /// Replaces the collection with the stored one.
    ///
    /// An absent or unreadable `tags` key keeps the current collection.
    /// Stored records failing the required-field check are skipped. An empty
    /// stored category loads as uncategorized.
    pub fn load_tags(&mut self) {
        let Some(persistence) = &self.persistence else {
            return;
        };
        let Some(records) = persistence.load::<Option<Vec<Value>>>(TAGS_KEY, None) else {
            return;
        };

        let total = records.len();
        let tags: Vec<Tag> = records
            .into_iter()
            .filter(is_valid_tag_record)
            .filter_map(|record| serde_json::from_value::<Tag>(record).ok())
            .map(|mut tag| {
                tag.category = tag.category.filter(|c| !c.is_empty());
                tag
            })
            .collect();
        if tags.len() < total {
            warn!(
                skipped = total - tags.len(),
                "ignored malformed tag records in storage"
            );
        }

        self.tags = tags;
        debug!(count = self.tags.len(), "tags loaded");
        self.listeners.emit(&TagEvent::Loaded(self.tags.len()));
    }

    pub fn persist_tags(&self) {
        if let Some(persistence) = &self.persistence {
            persistence.save(TAGS_KEY, &self.tags);
        }
    }

    pub fn clear_tags(&mut self) {
        self.tags.clear();
        self.persist_tags();
        self.listeners.emit(&TagEvent::Cleared);
    }

    /// Required fields, category label, and name collisions. `own_id` is
    /// excluded from the collision check.
    fn checked(&self, mut tag: Tag, own_id: Option<&str>) -> Result<Tag> {
        if !is_valid_tag(&tag) {
            return Err(SanctuaryError::InvalidTag);
        }

        tag.category = match tag.category.take() {
            Some(label) if label.is_empty() => None,
            Some(label) if !Category::from_label(&label).is_valid() => {
                return Err(SanctuaryError::InvalidCategory)
            }
            other => other,
        };

        let duplicate = self
            .tags
            .iter()
            .filter(|t| Some(t.id.as_str()) != own_id)
            .any(|t| t.collides_with(&tag));
        if duplicate {
            return Err(SanctuaryError::DuplicateTag {
                name: tag.name,
                category: tag.category,
            });
        }
        Ok(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemBackend;
    use crate::storage::StorageBackend;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn setup() -> (Rc<MemBackend>, TagStore) {
        let backend = Rc::new(MemBackend::new());
        let store = TagStore::new(Persistence::new(backend.clone()));
        (backend, store)
    }

    fn stored_names(backend: &MemBackend) -> Vec<String> {
        let raw = backend.get_item(TAGS_KEY).unwrap().unwrap_or_default();
        let tags: Vec<Tag> = serde_json::from_str(&raw).unwrap_or_default();
        tags.into_iter().map(|t| t.name).collect()
    }

    #[test]
    fn add_appends_and_persists() {
        let (backend, mut store) = setup();
        store.add_tag(Tag::new("1", "AI")).unwrap();
        store
            .add_tag(Tag::new("2", "ML").with_category("Topics"))
            .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(stored_names(&backend), vec!["AI", "ML"]);
    }

    #[test]
    fn duplicate_name_same_category_is_rejected() {
        let (_, mut store) = setup();
        store
            .add_tag(Tag::new("1", "Intro").with_category("Beginner"))
            .unwrap();

        let err = store
            .add_tag(Tag::new("2", "intro").with_category("Beginner"))
            .unwrap_err();
        assert!(matches!(err, SanctuaryError::DuplicateTag { .. }));
        assert_eq!(
            err.to_string(),
            "Tag \"intro\" already exists in Beginner category"
        );

        store
            .add_tag(Tag::new("3", "Intro").with_category("Advanced"))
            .unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn uncategorized_is_one_bucket() {
        let (_, mut store) = setup();
        store.add_tag(Tag::new("1", "Misc")).unwrap();
        let err = store.add_tag(Tag::new("2", "MISC")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Tag \"MISC\" already exists in uncategorized category"
        );

        // empty label means uncategorized
        let mut blank = Tag::new("3", "misc");
        blank.category = Some(String::new());
        assert!(matches!(
            store.add_tag(blank),
            Err(SanctuaryError::DuplicateTag { .. })
        ));
    }

    #[test]
    fn invalid_tag_is_rejected() {
        let (backend, mut store) = setup();
        assert!(matches!(
            store.add_tag(Tag::new("1", "")),
            Err(SanctuaryError::InvalidTag)
        ));
        assert!(matches!(
            store.add_tag(Tag::new("", "AI")),
            Err(SanctuaryError::InvalidTag)
        ));
        assert!(store.is_empty());
        assert_eq!(backend.get_item(TAGS_KEY).unwrap(), None);
    }

    #[test]
    fn whitespace_category_is_its_own_bucket() {
        let (_backend, mut store) = setup();
        let added = store
            .add_tag(Tag::new("1", "AI").with_category("   "))
            .unwrap();
        assert_eq!(added.category.as_deref(), Some("   "));
        store.add_tag(Tag::new("2", "AI")).unwrap();
        assert_eq!(store.get_all_categories(), vec!["   "]);
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let (_, mut store) = setup();
        store.add_tag(Tag::new("1", "AI")).unwrap();
        assert!(matches!(
            store.add_tag(Tag::new("1", "ML")),
            Err(SanctuaryError::DuplicateTagId(_))
        ));
    }

    #[test]
    fn update_merges_and_revalidates() {
        let (backend, mut store) = setup();
        store
            .add_tag(Tag::new("1", "Intro").with_category("Beginner"))
            .unwrap();
        store
            .add_tag(Tag::new("2", "Basics").with_category("Beginner"))
            .unwrap();

        // renaming to its own name with different case is fine
        let updated = store.update_tag("1", &TagUpdate::name("INTRO")).unwrap();
        assert_eq!(updated.name, "INTRO");
        assert_eq!(updated.category.as_deref(), Some("Beginner"));

        let err = store
            .update_tag("1", &TagUpdate::name("basics"))
            .unwrap_err();
        assert!(matches!(err, SanctuaryError::DuplicateTag { .. }));
        assert_eq!(store.get_tag_by_id("1").unwrap().name, "INTRO");

        let moved = store
            .update_tag("2", &TagUpdate::category(Some("Advanced".into())))
            .unwrap();
        assert_eq!(moved.category.as_deref(), Some("Advanced"));
        assert_eq!(stored_names(&backend), vec!["INTRO", "Basics"]);
    }

    #[test]
    fn update_unknown_id_fails() {
        let (_, mut store) = setup();
        assert!(matches!(
            store.update_tag("nope", &TagUpdate::name("x")),
            Err(SanctuaryError::TagNotFound(_))
        ));
    }

    #[test]
    fn update_to_blank_name_fails() {
        let (_, mut store) = setup();
        store.add_tag(Tag::new("1", "AI")).unwrap();
        assert!(matches!(
            store.update_tag("1", &TagUpdate::name(" ")),
            Err(SanctuaryError::InvalidTag)
        ));
    }

    #[test]
    fn remove_reports_and_persists_only_on_change() {
        let (backend, mut store) = setup();
        assert!(!store.remove_tag("1"));
        assert_eq!(backend.get_item(TAGS_KEY).unwrap(), None);

        store.add_tag(Tag::new("1", "AI")).unwrap();
        assert!(store.remove_tag("1"));
        assert!(stored_names(&backend).is_empty());
        assert!(!store.remove_tag("1"));
    }

    #[test]
    fn categories_are_derived() {
        let (_, mut store) = setup();
        store.add_tag(Tag::new("1", "a").with_category("X")).unwrap();
        store.add_tag(Tag::new("2", "b")).unwrap();
        store.add_tag(Tag::new("3", "c").with_category("Y")).unwrap();
        store.add_tag(Tag::new("4", "d").with_category("X")).unwrap();
        assert_eq!(store.get_all_categories(), vec!["X", "Y"]);

        store.remove_tag("3");
        assert_eq!(store.get_all_categories(), vec!["X"]);

        let in_x: Vec<&str> = store
            .get_tags_by_category(Some("X"))
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(in_x, vec!["1", "4"]);
        assert_eq!(store.get_tags_by_category(None).len(), 3);
    }

    #[test]
    fn load_replaces_and_skips_malformed_records() {
        let (backend, mut store) = setup();
        backend
            .set_item(
                TAGS_KEY,
                r#"[{"id": "1", "name": "AI"}, {"id": "2"}, {"id": "3", "name": "ML", "category": "Topics"}]"#,
            )
            .unwrap();

        store.load_tags();
        let ids: Vec<&str> = store.tags().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn load_treats_empty_category_as_uncategorized() {
        let (backend, mut store) = setup();
        backend
            .set_item(
                TAGS_KEY,
                r#"[{"id": "1", "name": "AI", "category": ""},
                    {"id": "2", "name": "ML", "category": "Topics"}]"#,
            )
            .unwrap();

        store.load_tags();
        assert_eq!(store.get_tag_by_id("1").unwrap().category, None);
        assert_eq!(store.get_all_categories(), vec!["Topics"]);
        assert_eq!(store.get_tags_by_category(None).len(), 2);
    }

    #[test]
    fn load_keeps_current_tags_on_missing_or_malformed_key() {
        let (backend, mut store) = setup();
        store.add_tag(Tag::new("1", "AI")).unwrap();
        backend.remove_item(TAGS_KEY).unwrap();
        store.load_tags();
        assert_eq!(store.len(), 1);

        backend.set_item(TAGS_KEY, "{broken").unwrap();
        store.load_tags();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn persistence_failure_keeps_memory_authoritative() {
        let (backend, mut store) = setup();
        backend.set_simulate_write_error(true);
        store.add_tag(Tag::new("1", "AI")).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get_tag_by_id("1").is_some());
    }

    #[test]
    fn clear_empties_and_persists() {
        let (backend, mut store) = setup();
        store.add_tag(Tag::new("1", "AI")).unwrap();
        store.clear_tags();
        assert!(store.is_empty());
        assert_eq!(backend.get_item(TAGS_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn in_memory_store_never_touches_storage() {
        let mut store = TagStore::in_memory();
        store.add_tag(Tag::new("1", "AI")).unwrap();
        store.load_tags();
        assert_eq!(store.len(), 1);
        assert!(!store.is_persistent());
    }

    #[test]
    fn subscribers_see_committed_changes() {
        let (_, mut store) = setup();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sub = {
            let seen = seen.clone();
            store.subscribe(move |event| seen.borrow_mut().push(event.clone()))
        };

        store.add_tag(Tag::new("1", "AI")).unwrap();
        let _ = store.add_tag(Tag::new("2", "ai"));
        store.update_tag("1", &TagUpdate::name("A.I.")).unwrap();
        store.remove_tag("1");
        store.unsubscribe(sub);
        store.clear_tags();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert!(matches!(&seen[0], TagEvent::Added(t) if t.id == "1"));
        assert!(matches!(&seen[1], TagEvent::Updated(t) if t.name == "A.I."));
        assert_eq!(seen[2], TagEvent::Removed("1".into()));
    }
}
