//! Academic degree record.
//!
//! # Invariants
//! - `abbr` is the natural key and must be unique ignoring case.
//! - `name` is required on create/update.

use crate::model::record::{Record, RecordId, RecordSchema, UNSAVED_ID};
use serde::{Deserialize, Serialize};

pub const DEGREE_SCHEMA: RecordSchema = RecordSchema {
    kind: "Degree",
    table: "degrees",
    key_column: "abbr",
    key_display: "abbreviation",
    label_column: "name",
    label_display: "name",
    label_required: true,
};

/// Degree as stored and as exchanged with clients.
///
/// Missing JSON fields decode to `id = 0` and `None`, so a create payload may
/// omit `id` entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degree {
    #[serde(default)]
    pub id: RecordId,
    /// Short code, e.g. `BSCS`.
    #[serde(default)]
    pub abbr: Option<String>,
    /// Full title, e.g. `Bachelor of Science in Computer Science`.
    #[serde(default)]
    pub name: Option<String>,
}

impl Degree {
    /// Creates an unsaved degree candidate.
    pub fn new(abbr: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            abbr: Some(abbr.into()),
            name: Some(name.into()),
        }
    }
}

impl Record for Degree {
    const SCHEMA: RecordSchema = DEGREE_SCHEMA;

    fn from_parts(id: RecordId, key: Option<String>, label: Option<String>) -> Self {
        Self {
            id,
            abbr: key,
            name: label,
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn natural_key(&self) -> Option<&str> {
        self.abbr.as_deref()
    }

    fn label(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
