//! Modal dialog state machine. Exactly one state is active at a time;
//! `Closed` is the initial state and the state between interactions. The
//! dialogs own only drafts and form fields, never references into the
//! snapshot; committing a draft is the panel's job.

use crate::model::{Note, NoteDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEditorMode {
    Create,
    Edit,
}

/// What the category-deletion dialog is about to destroy, captured at the
/// moment the dialog opens.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteTarget {
    pub id: String,
    pub name: String,
    pub note_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    Closed,
    NoteEditor { mode: NoteEditorMode, draft: NoteDraft },
    CategoryCreator { name: String },
    CategoryDeleteConfirm { target: DeleteTarget, typed_name: String },
}

impl Dialog {
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Open the note editor with a blank draft bound to the given category.
    pub fn open_note_creator(&mut self, category_id: &str) {
        *self = Self::NoteEditor {
            mode: NoteEditorMode::Create,
            draft: NoteDraft::blank(category_id),
        };
    }

    /// Open the note editor on a value copy of an existing note.
    pub fn open_note_editor(&mut self, note: &Note) {
        *self = Self::NoteEditor {
            mode: NoteEditorMode::Edit,
            draft: NoteDraft::from_note(note),
        };
    }

    pub fn open_category_creator(&mut self) {
        *self = Self::CategoryCreator { name: String::new() };
    }

    pub fn open_category_delete(&mut self, target: DeleteTarget) {
        *self = Self::CategoryDeleteConfirm { target, typed_name: String::new() };
    }

    /// Cancel whatever is open; drafts are discarded.
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Apply a field edit to the note draft by replacing it with a new
    /// value. No-op outside the note editor.
    pub fn edit_draft(&mut self, edit: impl FnOnce(NoteDraft) -> NoteDraft) {
        if let Self::NoteEditor { draft, .. } = self {
            *draft = edit(draft.clone());
        }
    }

    pub fn draft(&self) -> Option<&NoteDraft> {
        match self {
            Self::NoteEditor { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn note_editor_mode(&self) -> Option<NoteEditorMode> {
        match self {
            Self::NoteEditor { mode, .. } => Some(*mode),
            _ => None,
        }
    }

    /// Update the name field of the category creator. No-op elsewhere.
    pub fn set_category_name(&mut self, value: &str) {
        if let Self::CategoryCreator { name } = self {
            *name = value.to_string();
        }
    }

    pub fn category_name(&self) -> Option<&str> {
        match self {
            Self::CategoryCreator { name } => Some(name),
            _ => None,
        }
    }

    /// Update the typed confirmation field. No-op outside the deletion
    /// confirmation dialog.
    pub fn set_typed_name(&mut self, value: &str) {
        if let Self::CategoryDeleteConfirm { typed_name, .. } = self {
            *typed_name = value.to_string();
        }
    }

    pub fn delete_target(&self) -> Option<&DeleteTarget> {
        match self {
            Self::CategoryDeleteConfirm { target, .. } => Some(target),
            _ => None,
        }
    }

    /// The destructive action is enabled only when the typed name matches
    /// the category name exactly: case-sensitive, no trimming.
    pub fn can_confirm_delete(&self) -> bool {
        match self {
            Self::CategoryDeleteConfirm { target, typed_name } => {
                typed_name == &target.name
            }
            _ => false,
        }
    }
}

impl Default for Dialog {
    fn default() -> Self {
        Self::Closed
    }
}
