//! Validation outcome types and their client-facing messages.

use crate::model::record::RecordSchema;
use std::fmt::{Display, Formatter};

/// Why a candidate was not admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// Natural key is absent or empty.
    KeyRequired,
    /// Label is absent or empty on a kind that requires it.
    LabelRequired,
    /// Another record already holds this natural key; carries the
    /// candidate's value as submitted.
    KeyConflict(String),
}

impl RejectReason {
    /// Renders the client-facing message for this reason.
    pub fn message(&self, schema: &RecordSchema) -> String {
        match self {
            Self::KeyRequired => format!("{} {} is required.", schema.kind, schema.key_display),
            Self::LabelRequired => {
                format!("{} {} is required.", schema.kind, schema.label_display)
            }
            Self::KeyConflict(value) => format!(
                "{} with {} '{}' already exists.",
                schema.kind, schema.key_display, value
            ),
        }
    }

    /// Stable machine-readable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::KeyRequired => "key_required",
            Self::LabelRequired => "label_required",
            Self::KeyConflict(_) => "key_conflict",
        }
    }
}

impl Display for RejectReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Admit/reject decision for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(RejectReason),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Returns the rejection reason, if any.
    pub fn reason(&self) -> Option<&RejectReason> {
        match self {
            Self::Accepted => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}
