//! User role record.
//!
//! # Invariants
//! - `name` is the natural key and must be unique ignoring case.
//! - `description` is free-form and may be empty or absent.

use crate::model::record::{Record, RecordId, RecordSchema, UNSAVED_ID};
use serde::{Deserialize, Serialize};

pub const ROLE_SCHEMA: RecordSchema = RecordSchema {
    kind: "Role",
    table: "roles",
    key_column: "name",
    key_display: "name",
    label_column: "description",
    label_display: "description",
    label_required: false,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default)]
    pub id: RecordId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Role {
    /// Creates an unsaved role candidate.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: UNSAVED_ID,
            name: Some(name.into()),
            description: Some(description.into()),
        }
    }
}

impl Record for Role {
    const SCHEMA: RecordSchema = ROLE_SCHEMA;

    fn from_parts(id: RecordId, key: Option<String>, label: Option<String>) -> Self {
        Self {
            id,
            name: key,
            description: label,
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn natural_key(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn label(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
