//! Widget records persisted by the store adapter.
//!
//! # Responsibility
//! - Define the four independent collections (tasks, notes, bookmarks,
//!   alarms) and the settings record.
//! - Keep the JSON shape compatible with records written by earlier
//!   front ends (camelCase field names, `HH:MM` times).
//!
//! # Invariants
//! - Every record carries a stable random `EntityId`.
//! - Records never reference each other.

pub mod alarm;
pub mod bookmark;
pub mod note;
pub mod settings;
pub mod task;

use uuid::Uuid;

/// Stable identifier shared by all widget records.
pub type EntityId = Uuid;

/// Collapses blank optional text to `None`.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
