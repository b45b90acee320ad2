//! Panel controller: composes the store, query engine, render pipeline and
//! dialog state machine into one interactive surface. The panel owns the
//! search query and re-derives visible content from the snapshot on every
//! read instead of caching it.

use crate::authority::Authority;
use crate::dialog::{DeleteTarget, Dialog, NoteEditorMode};
use crate::error::Error;
use crate::i18n::Localizer;
use crate::model::{Note, NoteDraft};
use crate::query::visible_notes;
use crate::render::render_markdown;
use crate::store::DataStore;

/// Card previews show at most this many characters of content.
const PREVIEW_LENGTH: usize = 150;

pub struct Panel<A: Authority> {
    store: DataStore<A>,
    dialog: Dialog,
    search_query: String,
    localizer: Option<Localizer>,
}

impl<A: Authority> Panel<A> {
    pub fn new(authority: A) -> Self {
        Self {
            store: DataStore::new(authority),
            dialog: Dialog::Closed,
            search_query: String::new(),
            localizer: None,
        }
    }

    /// Resolve localization, then load the snapshot. Localization comes
    /// first so nothing renders untranslated; the load replaces state
    /// wholesale before any derived read happens.
    pub fn init(
        &mut self,
        lang: &str,
        translations: Option<&str>,
    ) -> Result<(), Error> {
        self.localizer = Some(match translations {
            Some(json) => Localizer::from_json(lang, json),
            None => Localizer::new(lang),
        });
        self.store.load()
    }

    pub fn store(&self) -> &DataStore<A> {
        &self.store
    }

    /// Refresh the snapshot from the authority.
    pub fn reload(&mut self) -> Result<(), Error> {
        self.store.load()
    }

    pub fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    pub fn localize(&self, key: &str) -> String {
        match &self.localizer {
            Some(localizer) => localizer.localize(key),
            None => key.to_string(),
        }
    }

    pub fn localizer(&self) -> Option<&Localizer> {
        self.localizer.as_ref()
    }

    // --- search and selection ---

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// The query is owned here and persists across category switches; only
    /// user input changes it.
    pub fn set_search_query(&mut self, query: &str) {
        self.search_query = query.to_string();
    }

    pub fn select_category(&mut self, category_id: &str) {
        self.store.activate_category(category_id);
    }

    /// Notes of the active category in display order, narrowed by the
    /// current search query. Empty when no category is active.
    pub fn visible(&self) -> Vec<&Note> {
        match self.store.active_category() {
            Some(category_id) => {
                visible_notes(self.store.notes(), category_id, &self.search_query)
            }
            None => Vec::new(),
        }
    }

    /// Sanitized HTML preview of a note card: content truncated before
    /// rendering, as on the card grid.
    pub fn preview_html(&self, note: &Note) -> String {
        let content = truncate_content(&note.content, PREVIEW_LENGTH);
        render_markdown(&content)
    }

    /// Full sanitized HTML of a note's content.
    pub fn content_html(&self, note: &Note) -> String {
        render_markdown(&note.content)
    }

    // --- note editor workflow ---

    /// Open the editor on a blank draft for the active category. Without an
    /// active category there is nowhere to create the note, so nothing
    /// opens.
    pub fn open_note_creator(&mut self) {
        if let Some(category_id) = self.store.active_category() {
            let category_id = category_id.to_string();
            self.dialog.open_note_creator(&category_id);
        }
    }

    pub fn open_note_editor(&mut self, note_id: &str) {
        if let Some(note) = self.store.note(note_id) {
            let note = note.clone();
            self.dialog.open_note_editor(&note);
        }
    }

    pub fn edit_draft(&mut self, edit: impl FnOnce(NoteDraft) -> NoteDraft) {
        self.dialog.edit_draft(edit);
    }

    /// Commit the draft. On success the dialog closes; on failure it stays
    /// open with the draft intact and the error is returned for the
    /// notification layer.
    pub fn save_note(&mut self) -> Result<(), Error> {
        let (mode, draft) = match &self.dialog {
            Dialog::NoteEditor { mode, draft } => (*mode, draft.clone()),
            _ => return Ok(()),
        };
        match mode {
            NoteEditorMode::Create => {
                self.store.create_note(
                    &draft.category_id,
                    &draft.title,
                    &draft.content,
                    draft.pinned,
                )?;
            }
            NoteEditorMode::Edit => {
                let note_id = draft
                    .id
                    .as_deref()
                    .ok_or_else(|| Error::validation("Note has no id"))?;
                self.store.update_note(
                    note_id,
                    &draft.title,
                    &draft.content,
                    draft.pinned,
                )?;
            }
        }
        self.dialog.close();
        Ok(())
    }

    /// Delete the note being edited. `confirmed` is the answer from the
    /// external yes/no prompt; declining leaves the dialog open and makes
    /// no call.
    pub fn delete_edited_note(&mut self, confirmed: bool) -> Result<(), Error> {
        if !confirmed {
            return Ok(());
        }
        let note_id = match self.dialog.draft().and_then(|d| d.id.clone()) {
            Some(id) => id,
            None => return Ok(()),
        };
        self.store.delete_note(&note_id)?;
        self.dialog.close();
        Ok(())
    }

    // --- category creator workflow ---

    pub fn open_category_creator(&mut self) {
        self.dialog.open_category_creator();
    }

    pub fn set_category_name(&mut self, name: &str) {
        self.dialog.set_category_name(name);
    }

    pub fn save_category(&mut self) -> Result<(), Error> {
        let name = match self.dialog.category_name() {
            Some(name) => name.to_string(),
            None => return Ok(()),
        };
        self.store.create_category(&name)?;
        self.dialog.close();
        Ok(())
    }

    // --- guarded category deletion workflow ---

    /// Open the confirmation dialog. The target captures the category's
    /// name and note count at this moment.
    pub fn open_category_delete(&mut self, category_id: &str) {
        if let Some(category) = self.store.category(category_id) {
            let target = DeleteTarget {
                id: category.id.clone(),
                name: category.name.clone(),
                note_count: self.store.note_count_in(category_id),
            };
            self.dialog.open_category_delete(target);
        }
    }

    pub fn set_typed_name(&mut self, typed: &str) {
        self.dialog.set_typed_name(typed);
    }

    pub fn can_confirm_delete(&self) -> bool {
        self.dialog.can_confirm_delete()
    }

    /// Perform the destructive deletion. Rejected locally when the typed
    /// name does not match exactly; no request is made in that case.
    pub fn confirm_delete_category(&mut self) -> Result<(), Error> {
        let target = match self.dialog.delete_target() {
            Some(target) => target.clone(),
            None => return Ok(()),
        };
        if !self.dialog.can_confirm_delete() {
            return Err(Error::validation(
                "Typed name does not match the category name",
            ));
        }
        self.store.delete_category(&target.id)?;
        self.dialog.close();
        Ok(())
    }

    pub fn cancel_dialog(&mut self) {
        self.dialog.close();
    }
}

fn truncate_content(content: &str, max_chars: usize) -> String {
    if content.chars().count() <= max_chars {
        return content.to_string();
    }
    let mut out: String = content.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
