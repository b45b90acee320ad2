//! Request/response channel to the remote authority.
//!
//! Every operation the panel can ask of the authority is an explicit
//! [`Request`] variant, validated at this boundary before any snapshot
//! state is touched. The authority itself is abstract; [`InMemoryAuthority`]
//! is the reference implementation used by the binary and the tests.

use crate::model::{Category, Note, Snapshot};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;
pub const MAX_NOTE_TITLE_LENGTH: usize = 200;
pub const MAX_NOTE_CONTENT_LENGTH: usize = 100_000;

/// One variant per wire operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    GetData,
    CreateCategory { name: String },
    DeleteCategory { category_id: String },
    CreateNote { category_id: String, title: String, content: String, pinned: bool },
    UpdateNote { note_id: String, title: String, content: String, pinned: bool },
    DeleteNote { note_id: String },
}

/// Successful reply to a [`Request`].
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Data(Snapshot),
    Category(Category),
    Note(Note),
    Ack,
}

impl Response {
    pub fn into_snapshot(self) -> Result<Snapshot, AuthorityError> {
        match self {
            Self::Data(snapshot) => Ok(snapshot),
            other => Err(AuthorityError::unexpected("snapshot", &other)),
        }
    }

    pub fn into_category(self) -> Result<Category, AuthorityError> {
        match self {
            Self::Category(category) => Ok(category),
            other => Err(AuthorityError::unexpected("category", &other)),
        }
    }

    pub fn into_note(self) -> Result<Note, AuthorityError> {
        match self {
            Self::Note(note) => Ok(note),
            other => Err(AuthorityError::unexpected("note", &other)),
        }
    }
}

/// Rejection from the authority. The message is human-readable and is shown
/// to the user verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct AuthorityError {
    pub code: String,
    pub message: String,
}

impl AuthorityError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self { code: code.to_string(), message: message.into() }
    }

    fn unexpected(wanted: &str, got: &Response) -> Self {
        Self::new("error", format!("Expected {wanted} response, got {got:?}"))
    }
}

/// The abstract channel to the system of record. A call suspends the
/// invoking operation until the round-trip completes; nothing else observes
/// intermediate state.
pub trait Authority {
    fn call(&mut self, request: Request) -> Result<Response, AuthorityError>;
}

/// In-process authority holding its own snapshot, mirroring the remote
/// backend's validation rules: trimmed non-empty names and titles, length
/// limits, case-insensitive duplicate checks, and cascade deletion of a
/// category's notes.
#[derive(Debug, Default)]
pub struct InMemoryAuthority {
    data: Snapshot,
}

impl InMemoryAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from pre-existing data, e.g. a seed file.
    pub fn with_data(data: Snapshot) -> Self {
        Self { data }
    }

    fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    fn timestamp() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    fn category(&self, category_id: &str) -> Option<&Category> {
        self.data.categories.iter().find(|c| c.id == category_id)
    }

    fn create_category(&mut self, name: &str) -> Result<Category, AuthorityError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthorityError::new(
                "invalid_input",
                "Category name is required",
            ));
        }
        if name.chars().count() > MAX_CATEGORY_NAME_LENGTH {
            return Err(AuthorityError::new(
                "invalid_input",
                format!(
                    "Category name exceeds maximum length of {MAX_CATEGORY_NAME_LENGTH} characters"
                ),
            ));
        }
        let lowered = name.to_lowercase();
        if self.data.categories.iter().any(|c| c.name.to_lowercase() == lowered)
        {
            return Err(AuthorityError::new("duplicate", "Category already exists"));
        }

        let category = Category {
            id: Self::generate_id(),
            name: name.to_string(),
            created_at: Self::timestamp(),
        };
        self.data.categories.push(category.clone());
        log::debug!("created category {}", category.name);
        Ok(category)
    }

    fn delete_category(&mut self, category_id: &str) -> Result<(), AuthorityError> {
        if self.category(category_id).is_none() {
            return Err(AuthorityError::new("not_found", "Category not found"));
        }
        self.data.notes.retain(|n| n.category_id != category_id);
        self.data.categories.retain(|c| c.id != category_id);
        log::debug!("deleted category {category_id}");
        Ok(())
    }

    fn validate_note_fields(
        &self,
        category_id: &str,
        title: &str,
        content: &str,
        exclude_note_id: Option<&str>,
    ) -> Result<(), AuthorityError> {
        if title.is_empty() {
            return Err(AuthorityError::new(
                "invalid_input",
                "Note title is required",
            ));
        }
        if title.chars().count() > MAX_NOTE_TITLE_LENGTH {
            return Err(AuthorityError::new(
                "invalid_input",
                format!(
                    "Note title exceeds maximum length of {MAX_NOTE_TITLE_LENGTH} characters"
                ),
            ));
        }
        if content.chars().count() > MAX_NOTE_CONTENT_LENGTH {
            return Err(AuthorityError::new(
                "invalid_input",
                format!(
                    "Note content exceeds maximum length of {MAX_NOTE_CONTENT_LENGTH} characters"
                ),
            ));
        }
        let lowered = title.to_lowercase();
        let duplicate = self.data.notes.iter().any(|n| {
            n.category_id == category_id
                && Some(n.id.as_str()) != exclude_note_id
                && n.title.to_lowercase() == lowered
        });
        if duplicate {
            return Err(AuthorityError::new(
                "duplicate",
                "Note title already exists in this category",
            ));
        }
        Ok(())
    }

    fn create_note(
        &mut self,
        category_id: &str,
        title: &str,
        content: &str,
        pinned: bool,
    ) -> Result<Note, AuthorityError> {
        let title = title.trim();
        if self.category(category_id).is_none() {
            return Err(AuthorityError::new("not_found", "Category not found"));
        }
        self.validate_note_fields(category_id, title, content, None)?;

        let now = Self::timestamp();
        let note = Note {
            id: Self::generate_id(),
            category_id: category_id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            pinned,
            created_at: now.clone(),
            updated_at: now,
        };
        self.data.notes.push(note.clone());
        log::debug!("created note {} in category {category_id}", note.title);
        Ok(note)
    }

    fn update_note(
        &mut self,
        note_id: &str,
        title: &str,
        content: &str,
        pinned: bool,
    ) -> Result<Note, AuthorityError> {
        let title = title.trim().to_string();
        let category_id = self
            .data
            .notes
            .iter()
            .find(|n| n.id == note_id)
            .map(|n| n.category_id.clone())
            .ok_or_else(|| AuthorityError::new("not_found", "Note not found"))?;
        self.validate_note_fields(&category_id, &title, content, Some(note_id))?;

        let note = self
            .data
            .notes
            .iter_mut()
            .find(|n| n.id == note_id)
            .ok_or_else(|| AuthorityError::new("not_found", "Note not found"))?;
        note.title = title;
        note.content = content.to_string();
        note.pinned = pinned;
        note.updated_at = Self::timestamp();
        log::debug!("updated note {note_id}");
        Ok(note.clone())
    }

    fn delete_note(&mut self, note_id: &str) -> Result<(), AuthorityError> {
        let before = self.data.notes.len();
        self.data.notes.retain(|n| n.id != note_id);
        if self.data.notes.len() == before {
            return Err(AuthorityError::new("not_found", "Note not found"));
        }
        log::debug!("deleted note {note_id}");
        Ok(())
    }
}

impl Authority for InMemoryAuthority {
    fn call(&mut self, request: Request) -> Result<Response, AuthorityError> {
        match request {
            Request::GetData => Ok(Response::Data(self.data.clone())),
            Request::CreateCategory { name } => {
                self.create_category(&name).map(Response::Category)
            }
            Request::DeleteCategory { category_id } => {
                self.delete_category(&category_id).map(|_| Response::Ack)
            }
            Request::CreateNote { category_id, title, content, pinned } => self
                .create_note(&category_id, &title, &content, pinned)
                .map(Response::Note),
            Request::UpdateNote { note_id, title, content, pinned } => self
                .update_note(&note_id, &title, &content, pinned)
                .map(Response::Note),
            Request::DeleteNote { note_id } => {
                self.delete_note(&note_id).map(|_| Response::Ack)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authority_with_category(name: &str) -> (InMemoryAuthority, Category) {
        let mut auth = InMemoryAuthority::new();
        let category = auth.create_category(name).unwrap();
        (auth, category)
    }

    #[test]
    fn test_create_category_trims_and_rejects_empty() {
        let mut auth = InMemoryAuthority::new();
        let category = auth.create_category("  Home  ").unwrap();
        assert_eq!(category.name, "Home");

        let err = auth.create_category("   ").unwrap_err();
        assert_eq!(err.code, "invalid_input");
    }

    #[test]
    fn test_duplicate_category_name_is_case_insensitive() {
        let (mut auth, _) = authority_with_category("Work");
        let err = auth.create_category("work").unwrap_err();
        assert_eq!(err.code, "duplicate");
    }

    #[test]
    fn test_create_note_requires_known_category() {
        let mut auth = InMemoryAuthority::new();
        let err = auth.create_note("missing", "Title", "", false).unwrap_err();
        assert_eq!(err.code, "not_found");
    }

    #[test]
    fn test_duplicate_note_title_within_category() {
        let (mut auth, cat) = authority_with_category("Home");
        auth.create_note(&cat.id, "Groceries", "", false).unwrap();
        let err =
            auth.create_note(&cat.id, "groceries", "", false).unwrap_err();
        assert_eq!(err.code, "duplicate");
    }

    #[test]
    fn test_update_note_refreshes_timestamp_and_allows_own_title() {
        let (mut auth, cat) = authority_with_category("Home");
        let note =
            auth.create_note(&cat.id, "Groceries", "milk", false).unwrap();
        let updated = auth
            .update_note(&note.id, "Groceries", "milk and eggs", true)
            .unwrap();
        assert_eq!(updated.id, note.id);
        assert_eq!(updated.content, "milk and eggs");
        assert!(updated.pinned);
        assert!(updated.updated_at >= note.updated_at);
    }

    #[test]
    fn test_delete_category_cascades_notes() {
        let (mut auth, cat) = authority_with_category("Home");
        auth.create_note(&cat.id, "One", "", false).unwrap();
        auth.create_note(&cat.id, "Two", "", false).unwrap();
        auth.delete_category(&cat.id).unwrap();
        assert!(auth.data.categories.is_empty());
        assert!(auth.data.notes.is_empty());
    }

    #[test]
    fn test_title_length_limit() {
        let (mut auth, cat) = authority_with_category("Home");
        let long = "x".repeat(MAX_NOTE_TITLE_LENGTH + 1);
        let err = auth.create_note(&cat.id, &long, "", false).unwrap_err();
        assert_eq!(err.code, "invalid_input");
    }

    #[test]
    fn test_request_wire_shape() {
        let req = Request::CreateCategory { name: "Home".to_string() };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "create_category");
        assert_eq!(json["name"], "Home");
    }
}
