//! Localization lookup. Resolution order: host-provided overrides, then the
//! loaded translation table under a normalized language bucket, then the
//! English table, then the literal key. A failed table load falls back to a
//! built-in English table; the failure is logged, never surfaced.

use serde_json;
use std::collections::HashMap;

/// Minimal English table compiled in, so the panel is usable even when the
/// translation file cannot be fetched.
const BUILT_IN_EN: &[(&str, &str)] = &[
    ("title", "Note Record"),
    ("add_note", "Add Note"),
    ("edit_note", "Edit Note"),
    ("create_note", "Create Note"),
    ("note_title", "Title"),
    ("content", "Content (Markdown)"),
    ("save", "Save"),
    ("cancel", "Cancel"),
    ("delete", "Delete"),
    ("create", "Create"),
    ("updated", "Updated"),
    ("preview", "Preview"),
    ("pin_note", "Pin this note"),
    ("note_title_placeholder", "Note title"),
    ("note_content_placeholder", "Write your note in Markdown..."),
    ("add_category", "Add Category"),
    ("create_category", "Create Category"),
    ("delete_category", "Delete Category"),
    ("category_name", "Category Name"),
    ("category_placeholder", "e.g., Passwords, Notes, Todo"),
    ("no_categories", "No categories yet. Create one to get started!"),
    ("no_notes", "No notes in this category yet."),
    ("error", "Error"),
    ("delete_category_confirm", "Delete category"),
    (
        "delete_category_warning",
        "This will permanently delete the category \"{name}\" and all {count} note(s) in it. This action cannot be undone.",
    ),
    (
        "delete_category_empty_warning",
        "This will permanently delete the empty category \"{name}\". This action cannot be undone.",
    ),
    ("delete_category_confirm_label", "Type \"{name}\" to confirm"),
    ("menu", "Menu"),
    ("search", "Search..."),
    ("add", "Add"),
    ("more_actions", "More actions"),
    ("add_note_to_category", "Add Note to this Category"),
];

/// Map a host language tag to one of the table buckets.
pub fn resolve_lang_key(lang: &str) -> &'static str {
    if lang.starts_with("zh-TW") || lang.starts_with("zh-HK") || lang == "zh-Hant"
    {
        "zh-Hant"
    } else if lang.starts_with("zh") {
        "zh-Hans"
    } else {
        "en"
    }
}

type Table = HashMap<String, String>;

pub struct Localizer {
    lang: String,
    tables: HashMap<String, Table>,
    host: Table,
}

impl Localizer {
    /// Localizer with only the built-in English table.
    pub fn new(lang: &str) -> Self {
        let en: Table = BUILT_IN_EN
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut tables = HashMap::new();
        tables.insert("en".to_string(), en);
        Self { lang: lang.to_string(), tables, host: Table::new() }
    }

    /// Parse a translation table keyed by language bucket. Any parse
    /// failure falls back to the built-in English table.
    pub fn from_json(lang: &str, json: &str) -> Self {
        match serde_json::from_str::<HashMap<String, Table>>(json) {
            Ok(tables) => {
                let mut localizer = Self::new(lang);
                // Loaded entries extend the built-in table, so a partial
                // file still resolves the remaining keys in English.
                for (bucket, table) in tables {
                    localizer
                        .tables
                        .entry(bucket)
                        .or_default()
                        .extend(table);
                }
                localizer
            }
            Err(err) => {
                log::warn!(
                    "failed to parse translations, using built-in English fallback: {err}"
                );
                Self::new(lang)
            }
        }
    }

    pub fn language(&self) -> &str {
        &self.lang
    }

    pub fn set_language(&mut self, lang: &str) {
        self.lang = lang.to_string();
    }

    /// Host-provided translations win over everything.
    pub fn set_host_override(&mut self, key: &str, value: &str) {
        self.host.insert(key.to_string(), value.to_string());
    }

    pub fn localize(&self, key: &str) -> String {
        if let Some(value) = self.host.get(key) {
            return value.clone();
        }
        let bucket = resolve_lang_key(&self.lang);
        if let Some(value) = self.tables.get(bucket).and_then(|t| t.get(key)) {
            return value.clone();
        }
        if let Some(value) = self.tables.get("en").and_then(|t| t.get(key)) {
            return value.clone();
        }
        key.to_string()
    }

    /// Localize a template and substitute `{name}`/`{count}` placeholders.
    pub fn localize_with(
        &self,
        key: &str,
        name: &str,
        count: usize,
    ) -> String {
        self.localize(key)
            .replace("{name}", name)
            .replace("{count}", &count.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_lang_key_buckets() {
        assert_eq!(resolve_lang_key("zh-TW"), "zh-Hant");
        assert_eq!(resolve_lang_key("zh-HK"), "zh-Hant");
        assert_eq!(resolve_lang_key("zh-Hant"), "zh-Hant");
        assert_eq!(resolve_lang_key("zh-CN"), "zh-Hans");
        assert_eq!(resolve_lang_key("zh"), "zh-Hans");
        assert_eq!(resolve_lang_key("en-US"), "en");
        assert_eq!(resolve_lang_key("de"), "en");
        assert_eq!(resolve_lang_key(""), "en");
    }

    #[test]
    fn test_built_in_fallback_on_bad_json() {
        let localizer = Localizer::from_json("en", "not json at all");
        assert_eq!(localizer.localize("title"), "Note Record");
    }

    #[test]
    fn test_loaded_table_wins_over_built_in() {
        let json = r#"{"en": {"title": "My Notes"}, "zh-Hans": {"title": "记事本"}}"#;
        let localizer = Localizer::from_json("en", json);
        assert_eq!(localizer.localize("title"), "My Notes");

        let localizer = Localizer::from_json("zh-CN", json);
        assert_eq!(localizer.localize("title"), "记事本");
    }

    #[test]
    fn test_missing_bucket_falls_back_to_english_then_key() {
        let json = r#"{"en": {"title": "My Notes"}}"#;
        let localizer = Localizer::from_json("zh-TW", json);
        assert_eq!(localizer.localize("title"), "My Notes");
        assert_eq!(localizer.localize("no_such_key"), "no_such_key");
    }

    #[test]
    fn test_host_override_wins() {
        let mut localizer = Localizer::new("en");
        localizer.set_host_override("title", "Host Title");
        assert_eq!(localizer.localize("title"), "Host Title");
    }

    #[test]
    fn test_placeholder_substitution() {
        let localizer = Localizer::new("en");
        let text =
            localizer.localize_with("delete_category_warning", "Work", 3);
        assert!(text.contains("\"Work\""));
        assert!(text.contains("all 3 note(s)"));
    }
}
