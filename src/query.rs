//! Pure filter/sort logic for the visible note list. Never mutates its
//! inputs; recomputed on every call.

use crate::model::{Note, cmp_timestamp};

/// Notes of one category, optionally narrowed by a search query, in display
/// order: pinned notes first, then most recently updated first. The sort is
/// stable, so ties keep their snapshot order.
pub fn visible_notes<'a>(
    notes: &'a [Note],
    category_id: &str,
    search: &str,
) -> Vec<&'a Note> {
    let query = search.trim().to_lowercase();
    let mut visible: Vec<&Note> = notes
        .iter()
        .filter(|n| n.category_id == category_id)
        .filter(|n| query.is_empty() || matches_query(n, &query))
        .collect();

    visible.sort_by(|a, b| {
        b.pinned
            .cmp(&a.pinned)
            .then_with(|| cmp_timestamp(&b.updated_at, &a.updated_at))
    });
    visible
}

fn matches_query(note: &Note, query: &str) -> bool {
    note.title.to_lowercase().contains(query)
        || note.content.to_lowercase().contains(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(
        id: &str,
        category_id: &str,
        title: &str,
        content: &str,
        pinned: bool,
        updated_at: &str,
    ) -> Note {
        Note {
            id: id.to_string(),
            category_id: category_id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            pinned,
            created_at: updated_at.to_string(),
            updated_at: updated_at.to_string(),
        }
    }

    #[test]
    fn test_filters_by_category() {
        let notes = vec![
            note("a", "c1", "One", "", false, "2024-01-01T00:00:00+00:00"),
            note("b", "c2", "Two", "", false, "2024-01-01T00:00:00+00:00"),
        ];
        let visible = visible_notes(&notes, "c1", "");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "a");
    }

    #[test]
    fn test_search_matches_title_or_content_case_insensitive() {
        let notes = vec![
            note("a", "c1", "Groceries", "", false, "2024-01-01T00:00:00+00:00"),
            note("b", "c1", "Todo", "buy GROCERIES", false, "2024-01-02T00:00:00+00:00"),
            note("c", "c1", "Other", "nothing here", false, "2024-01-03T00:00:00+00:00"),
        ];
        let visible = visible_notes(&notes, "c1", "groceries");
        let ids: Vec<&str> = visible.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_whitespace_query_returns_everything() {
        let notes = vec![
            note("a", "c1", "One", "", false, "2024-01-01T00:00:00+00:00"),
            note("b", "c1", "Two", "", false, "2024-01-02T00:00:00+00:00"),
        ];
        assert_eq!(visible_notes(&notes, "c1", "   ").len(), 2);
    }

    #[test]
    fn test_pinned_precedes_newer_unpinned() {
        let notes = vec![
            note("new", "c1", "New", "", false, "2024-06-01T00:00:00+00:00"),
            note("old", "c1", "Old", "", true, "2024-01-01T00:00:00+00:00"),
        ];
        let visible = visible_notes(&notes, "c1", "");
        let ids: Vec<&str> = visible.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["old", "new"]);
    }

    #[test]
    fn test_sort_is_stable_on_equal_timestamps() {
        let ts = "2024-01-01T00:00:00+00:00";
        let notes = vec![
            note("first", "c1", "A", "", false, ts),
            note("second", "c1", "B", "", false, ts),
            note("third", "c1", "C", "", false, ts),
        ];
        let visible = visible_notes(&notes, "c1", "");
        let ids: Vec<&str> = visible.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_inputs_are_untouched() {
        let notes = vec![
            note("a", "c1", "One", "", false, "2024-02-01T00:00:00+00:00"),
            note("b", "c1", "Two", "", false, "2024-03-01T00:00:00+00:00"),
        ];
        let before = notes.clone();
        let _ = visible_notes(&notes, "c1", "two");
        assert_eq!(notes, before);
    }
}
