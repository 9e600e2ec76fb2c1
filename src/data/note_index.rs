use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Formats a date the way the note index keys it (`YYYY-MM-DD`).
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Per-date notes. A date with no notes has no entry at all.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct NoteIndex {
    notes: BTreeMap<String, Vec<String>>,
}

impl NoteIndex {
    /// Appends `text` to the notes for `date_key`. Blank text is ignored.
    /// Returns true when a note was stored.
    pub fn add_note(&mut self, date_key: &str, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.notes
            .entry(date_key.to_string())
            .or_default()
            .push(text.to_string());
        true
    }

    pub fn has_notes(&self, date_key: &str) -> bool {
        self.notes.get(date_key).is_some_and(|v| !v.is_empty())
    }

    pub fn notes_for(&self, date_key: &str) -> &[String] {
        self.notes.get(date_key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_notes(&self) -> usize {
        self.notes.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_note_then_notes_for_in_order() {
        let mut index = NoteIndex::default();
        assert!(index.add_note("2024-03-15", "buy milk"));
        assert!(index.add_note("2024-03-15", "call mom"));
        assert_eq!(index.notes_for("2024-03-15"), ["buy milk", "call mom"]);
    }

    #[test]
    fn test_blank_note_is_ignored() {
        let mut index = NoteIndex::default();
        assert!(!index.add_note("2024-03-15", ""));
        assert!(!index.add_note("2024-03-15", "   \t "));
        assert_eq!(index, NoteIndex::default());
        assert!(!index.has_notes("2024-03-15"));
    }

    #[test]
    fn test_has_notes_flips_after_first_add() {
        let mut index = NoteIndex::default();
        assert!(!index.has_notes("2025-01-01"));
        index.add_note("2025-01-01", "New year");
        assert!(index.has_notes("2025-01-01"));
        assert!(!index.has_notes("2025-01-02"));
    }

    #[test]
    fn test_note_text_kept_as_entered() {
        let mut index = NoteIndex::default();
        index.add_note("2025-01-01", "  padded ");
        assert_eq!(index.notes_for("2025-01-01"), ["  padded "]);
    }

    #[test]
    fn test_notes_for_missing_key_is_empty() {
        let index = NoteIndex::default();
        assert!(index.notes_for("1999-12-31").is_empty());
    }

    #[test]
    fn test_blank_note_does_not_create_key() {
        let mut index = NoteIndex::default();
        assert!(!index.add_note("2025-05-05", " "));
        assert_eq!(index, NoteIndex::default());
    }

    #[test]
    fn test_total_notes_counts_across_dates() {
        let mut index = NoteIndex::default();
        index.add_note("2025-01-01", "a");
        index.add_note("2025-01-01", "b");
        index.add_note("2025-02-01", "c");
        assert_eq!(index.total_notes(), 3);
    }

    #[test]
    fn test_date_key_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(date_key(date), "2024-03-05");
    }
}
