//! Client-side core of a Markdown note widget: an in-memory snapshot of
//! categories and notes synchronized with a remote authority through typed
//! request/response calls, plus the search/sort logic, the Markdown to
//! safe-HTML pipeline, and the modal dialog state machine that governs
//! create/edit/delete workflows.

pub mod authority;
pub mod dialog;
pub mod error;
pub mod format;
pub mod i18n;
pub mod model;
pub mod nav_label;
pub mod panel;
pub mod query;
pub mod render;
pub mod store;

pub use authority::{Authority, AuthorityError, InMemoryAuthority, Request, Response};
pub use dialog::{DeleteTarget, Dialog, NoteEditorMode};
pub use error::Error;
pub use i18n::Localizer;
pub use model::{Category, Note, NoteDraft, Snapshot};
pub use nav_label::NavLabelTask;
pub use panel::Panel;
pub use query::visible_notes;
pub use render::render_markdown;
pub use store::DataStore;
