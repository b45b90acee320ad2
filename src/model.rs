use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A named group of notes. Categories are never renamed; they are created
/// through the category dialog and destroyed only through the guarded
/// deletion workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub created_at: String,
}

/// A single Markdown note. `id` and both timestamps are assigned by the
/// authority; the client never fabricates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub category_id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub pinned: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// The local copy of everything the authority knows about. Owned and
/// mutated exclusively by the data store; everyone else reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

/// Working copy edited inside the note dialog. A draft is always a value
/// copy, so abandoning it can never touch the committed snapshot. Field
/// edits produce a new draft rather than mutating in place.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDraft {
    /// `None` until the authority has assigned an id (create mode).
    pub id: Option<String>,
    pub category_id: String,
    pub title: String,
    pub content: String,
    pub pinned: bool,
}

impl NoteDraft {
    /// Empty draft for a new note in the given category.
    pub fn blank(category_id: &str) -> Self {
        Self {
            id: None,
            category_id: category_id.to_string(),
            title: String::new(),
            content: String::new(),
            pinned: false,
        }
    }

    /// Draft seeded from an existing note for edit mode.
    pub fn from_note(note: &Note) -> Self {
        Self {
            id: Some(note.id.clone()),
            category_id: note.category_id.clone(),
            title: note.title.clone(),
            content: note.content.clone(),
            pinned: note.pinned,
        }
    }

    pub fn with_title(self, title: &str) -> Self {
        Self { title: title.to_string(), ..self }
    }

    pub fn with_content(self, content: &str) -> Self {
        Self { content: content.to_string(), ..self }
    }

    pub fn with_pinned(self, pinned: bool) -> Self {
        Self { pinned, ..self }
    }
}

pub fn parse_timestamp(ts: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(ts).ok()
}

/// Compare two authority timestamps. Unparseable timestamps sort before
/// parseable ones so malformed data sinks to the bottom of a descending
/// list instead of pinning itself to the top.
pub fn cmp_timestamp(a: &str, b: &str) -> Ordering {
    let a_dt = parse_timestamp(a);
    let b_dt = parse_timestamp(b);
    match (a_dt, b_dt) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}
