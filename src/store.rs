//! The data store: single writable owner of the local snapshot.
//!
//! Every mutating operation round-trips through the authority first and
//! applies only the authority's response, so server-assigned fields (ids,
//! timestamps) are never guessed locally. A failed round-trip leaves the
//! snapshot untouched.

use crate::authority::{Authority, Request};
use crate::error::Error;
use crate::model::{Category, Note, Snapshot};

pub struct DataStore<A: Authority> {
    authority: A,
    snapshot: Snapshot,
    active_category: Option<String>,
}

impl<A: Authority> DataStore<A> {
    pub fn new(authority: A) -> Self {
        Self { authority, snapshot: Snapshot::default(), active_category: None }
    }

    pub fn categories(&self) -> &[Category] {
        &self.snapshot.categories
    }

    pub fn notes(&self) -> &[Note] {
        &self.snapshot.notes
    }

    pub fn active_category(&self) -> Option<&str> {
        self.active_category.as_deref()
    }

    pub fn category(&self, category_id: &str) -> Option<&Category> {
        self.snapshot.categories.iter().find(|c| c.id == category_id)
    }

    pub fn note(&self, note_id: &str) -> Option<&Note> {
        self.snapshot.notes.iter().find(|n| n.id == note_id)
    }

    pub fn note_count_in(&self, category_id: &str) -> usize {
        self.snapshot
            .notes
            .iter()
            .filter(|n| n.category_id == category_id)
            .count()
    }

    /// Select a category tab. Unknown ids are ignored so the active
    /// category always references the snapshot.
    pub fn activate_category(&mut self, category_id: &str) {
        if self.category(category_id).is_some() {
            self.active_category = Some(category_id.to_string());
        }
    }

    /// Fetch the full snapshot and replace local state wholesale. If no
    /// category is active afterwards, the first returned category becomes
    /// active. Called once at startup, after localization has resolved.
    pub fn load(&mut self) -> Result<(), Error> {
        let snapshot =
            self.authority.call(Request::GetData)?.into_snapshot()?;
        log::debug!(
            "loaded {} categories and {} notes",
            snapshot.categories.len(),
            snapshot.notes.len()
        );
        self.snapshot = snapshot;

        let active_is_valid = self
            .active_category
            .as_deref()
            .is_some_and(|id| self.category(id).is_some());
        if !active_is_valid {
            self.active_category =
                self.snapshot.categories.first().map(|c| c.id.clone());
        }
        Ok(())
    }

    /// Create a category and make it the active tab.
    pub fn create_category(&mut self, name: &str) -> Result<Category, Error> {
        if name.trim().is_empty() {
            return Err(Error::validation("Category name is required"));
        }
        let category = self
            .authority
            .call(Request::CreateCategory { name: name.trim().to_string() })?
            .into_category()?;
        self.snapshot.categories.push(category.clone());
        self.active_category = Some(category.id.clone());
        Ok(category)
    }

    /// Delete a category and every note in it. Both removals happen in the
    /// same update once the authority acknowledges; the active tab moves to
    /// the first remaining category, or none.
    pub fn delete_category(&mut self, category_id: &str) -> Result<(), Error> {
        self.authority.call(Request::DeleteCategory {
            category_id: category_id.to_string(),
        })?;
        self.snapshot.notes.retain(|n| n.category_id != category_id);
        self.snapshot.categories.retain(|c| c.id != category_id);
        if self.active_category.as_deref() == Some(category_id) {
            self.active_category =
                self.snapshot.categories.first().map(|c| c.id.clone());
        }
        Ok(())
    }

    pub fn create_note(
        &mut self,
        category_id: &str,
        title: &str,
        content: &str,
        pinned: bool,
    ) -> Result<Note, Error> {
        if title.trim().is_empty() {
            return Err(Error::validation("Note title is required"));
        }
        let note = self
            .authority
            .call(Request::CreateNote {
                category_id: category_id.to_string(),
                title: title.to_string(),
                content: content.to_string(),
                pinned,
            })?
            .into_note()?;
        self.snapshot.notes.push(note.clone());
        Ok(note)
    }

    /// Replace a note with the authority's updated representation. The
    /// response is the source of truth; fields are never merged locally.
    pub fn update_note(
        &mut self,
        note_id: &str,
        title: &str,
        content: &str,
        pinned: bool,
    ) -> Result<Note, Error> {
        if title.trim().is_empty() {
            return Err(Error::validation("Note title is required"));
        }
        let note = self
            .authority
            .call(Request::UpdateNote {
                note_id: note_id.to_string(),
                title: title.to_string(),
                content: content.to_string(),
                pinned,
            })?
            .into_note()?;
        if let Some(slot) =
            self.snapshot.notes.iter_mut().find(|n| n.id == note.id)
        {
            *slot = note.clone();
        }
        Ok(note)
    }

    pub fn delete_note(&mut self, note_id: &str) -> Result<(), Error> {
        self.authority
            .call(Request::DeleteNote { note_id: note_id.to_string() })?;
        self.snapshot.notes.retain(|n| n.id != note_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::{
        AuthorityError, InMemoryAuthority, Response,
    };

    fn seeded_store() -> DataStore<InMemoryAuthority> {
        let mut auth = InMemoryAuthority::new();
        for name in ["Home", "Work"] {
            auth.call(Request::CreateCategory { name: name.to_string() })
                .unwrap();
        }
        let mut store = DataStore::new(auth);
        store.load().unwrap();
        store
    }

    /// Authority that rejects everything, for failure-path tests.
    struct RefusingAuthority;

    impl Authority for RefusingAuthority {
        fn call(&mut self, _request: Request) -> Result<Response, AuthorityError> {
            Err(AuthorityError::new("error", "authority unavailable"))
        }
    }

    #[test]
    fn test_load_activates_first_category() {
        let store = seeded_store();
        assert_eq!(store.categories().len(), 2);
        assert_eq!(store.active_category(), Some(store.categories()[0].id.as_str()));
    }

    #[test]
    fn test_load_keeps_existing_valid_active_category() {
        let mut store = seeded_store();
        let second = store.categories()[1].id.clone();
        store.activate_category(&second);
        store.load().unwrap();
        assert_eq!(store.active_category(), Some(second.as_str()));
    }

    #[test]
    fn test_create_category_activates_it() {
        let mut store = seeded_store();
        let created = store.create_category("Reading").unwrap();
        assert_eq!(store.active_category(), Some(created.id.as_str()));
        assert!(store.category(&created.id).is_some());
    }

    #[test]
    fn test_empty_category_name_fails_without_request() {
        let mut store = DataStore::new(RefusingAuthority);
        let err = store.create_category("   ").unwrap_err();
        assert!(err.is_validation());
        assert!(store.categories().is_empty());
    }

    #[test]
    fn test_empty_note_title_fails_without_request() {
        let mut store = DataStore::new(RefusingAuthority);
        let err = store.create_note("c1", "  ", "content", false).unwrap_err();
        assert!(err.is_validation());
        assert!(store.notes().is_empty());
    }

    #[test]
    fn test_remote_failure_leaves_snapshot_unchanged() {
        let mut store = DataStore::new(RefusingAuthority);
        let err = store.create_category("Home").unwrap_err();
        assert!(!err.is_validation());
        assert!(store.categories().is_empty());
        assert_eq!(store.active_category(), None);
    }

    #[test]
    fn test_create_note_appends_authority_representation() {
        let mut store = seeded_store();
        let category_id = store.active_category().unwrap().to_string();
        let note = store
            .create_note(&category_id, "Groceries", "- milk", true)
            .unwrap();
        assert!(!note.id.is_empty());
        assert!(!note.updated_at.is_empty());
        assert_eq!(store.note(&note.id).unwrap().title, "Groceries");
    }

    #[test]
    fn test_update_note_replaces_whole_note() {
        let mut store = seeded_store();
        let category_id = store.active_category().unwrap().to_string();
        let note =
            store.create_note(&category_id, "Draft", "v1", false).unwrap();
        let updated =
            store.update_note(&note.id, "Final", "v2", true).unwrap();
        let stored = store.note(&note.id).unwrap();
        assert_eq!(stored, &updated);
        assert_eq!(stored.title, "Final");
        assert_eq!(stored.content, "v2");
        assert!(stored.pinned);
    }

    #[test]
    fn test_delete_note_removes_by_id() {
        let mut store = seeded_store();
        let category_id = store.active_category().unwrap().to_string();
        let note = store.create_note(&category_id, "Gone", "", false).unwrap();
        store.delete_note(&note.id).unwrap();
        assert!(store.note(&note.id).is_none());
    }

    #[test]
    fn test_delete_active_category_removes_notes_and_reactivates() {
        let mut store = seeded_store();
        let first = store.categories()[0].id.clone();
        let second = store.categories()[1].id.clone();
        for title in ["One", "Two", "Three"] {
            store.create_note(&first, title, "", false).unwrap();
        }
        store.activate_category(&first);

        store.delete_category(&first).unwrap();
        assert!(store.category(&first).is_none());
        assert_eq!(store.note_count_in(&first), 0);
        assert_eq!(store.active_category(), Some(second.as_str()));
    }

    #[test]
    fn test_delete_last_category_clears_active() {
        let mut auth = InMemoryAuthority::new();
        auth.call(Request::CreateCategory { name: "Only".to_string() }).unwrap();
        let mut store = DataStore::new(auth);
        store.load().unwrap();
        let only = store.categories()[0].id.clone();
        store.delete_category(&only).unwrap();
        assert_eq!(store.active_category(), None);
        assert!(store.categories().is_empty());
    }

    #[test]
    fn test_activate_unknown_category_is_ignored() {
        let mut store = seeded_store();
        let before = store.active_category().unwrap().to_string();
        store.activate_category("nope");
        assert_eq!(store.active_category(), Some(before.as_str()));
    }
}
