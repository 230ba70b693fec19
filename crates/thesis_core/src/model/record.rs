//! Generic record contract shared by every managed collection.
//!
//! # Responsibility
//! - Describe one collection (table, natural key, label) as static data.
//! - Give store/validator/service code one shape to work against.
//!
//! # Invariants
//! - `id == UNSAVED_ID` means the record has not been persisted.
//! - Natural keys are compared through [`fold_key`] and nothing else.
//! - `apply_changes` never touches `id`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Store-assigned numeric identifier.
pub type RecordId = i64;

/// Id carried by candidates that have never been persisted.
pub const UNSAVED_ID: RecordId = 0;

/// Static description of one record collection.
///
/// Store SQL, validation order and user-facing messages are all derived from
/// this value, so adding a collection means adding one schema and one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
    /// Kind label used in messages, e.g. `Degree`.
    pub kind: &'static str,
    /// Backing SQLite table.
    pub table: &'static str,
    /// Column holding the natural key. The folded copy lives in
    /// `<key_column>_folded`.
    pub key_column: &'static str,
    /// Natural-key field name as shown to clients.
    pub key_display: &'static str,
    /// Column holding the descriptive label.
    pub label_column: &'static str,
    /// Label field name as shown to clients.
    pub label_display: &'static str,
    /// Whether create/update require a non-empty label.
    pub label_required: bool,
}

impl RecordSchema {
    /// Name of the column storing the case-folded natural key.
    pub fn folded_key_column(&self) -> String {
        format!("{}_folded", self.key_column)
    }
}

/// A record managed by the generic store/validator/service stack.
pub trait Record: Clone + Debug + PartialEq + Serialize + DeserializeOwned {
    const SCHEMA: RecordSchema;

    /// Builds a record from its persisted parts.
    fn from_parts(id: RecordId, key: Option<String>, label: Option<String>) -> Self;

    fn id(&self) -> RecordId;

    fn natural_key(&self) -> Option<&str>;

    fn label(&self) -> Option<&str>;

    /// Returns a copy carrying `id` instead of the current one.
    fn with_id(&self, id: RecordId) -> Self {
        Self::from_parts(
            id,
            self.natural_key().map(str::to_owned),
            self.label().map(str::to_owned),
        )
    }

    /// Overwrites every mutable field with the candidate's values.
    fn apply_changes(&mut self, candidate: &Self) {
        *self = candidate.with_id(self.id());
    }

    /// Whether this record has been assigned an id by a store.
    fn is_persisted(&self) -> bool {
        self.id() != UNSAVED_ID
    }
}

/// Case-folds a natural key for uniqueness comparison.
///
/// Uppercasing first collapses letters whose lowercase form depends on
/// context (final sigma) or expands (`ß` -> `SS`), so every case variant
/// of a key folds to the same string.
pub fn fold_key(key: &str) -> String {
    key.to_uppercase().to_lowercase()
}

/// Returns whether a raw optional field counts as missing.
///
/// Whitespace is not trimmed: `" "` is present.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::{fold_key, is_blank};

    #[test]
    fn fold_key_is_case_insensitive_beyond_ascii() {
        assert_eq!(fold_key("BSCS"), fold_key("bscs"));
        assert_eq!(fold_key("ÉCOLE"), fold_key("école"));
    }

    #[test]
    fn fold_key_merges_context_sensitive_letters() {
        assert_eq!(fold_key("ΑΣ"), fold_key("ασ"));
        assert_eq!(fold_key("ΑΣ"), fold_key("ας"));
        assert_eq!(fold_key("STRASSE"), fold_key("straße"));
        assert_ne!(fold_key("ΑΣ"), fold_key("ΑΒ"));
    }

    #[test]
    fn is_blank_checks_raw_emptiness_only() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(!is_blank(Some(" ")));
        assert!(!is_blank(Some("BSCS")));
    }
}
