// src/snapshot.rs

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::changes::ChangeTree;
use crate::error::{AppError, AppResult};
use crate::types::FormState;

/// Full persisted snapshot of one form's state. Field names match the
/// original on-disk blob (`changes` / `expandedSections` / `activeSection` /
/// `lastChanged`), so drafts written by earlier versions load unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedFormState {
    #[serde(default)]
    pub changes: JsonValue,
    #[serde(default)]
    pub expanded_sections: Vec<String>,
    #[serde(default)]
    pub active_section: Option<String>,
    #[serde(default)]
    pub last_changed: Option<i64>,
}

pub fn encode(form: &FormState) -> AppResult<String> {
    let snap = PersistedFormState {
        changes: form.changes.to_json(),
        expanded_sections: form.expanded_sections.iter().cloned().collect(),
        active_section: form.active_section.clone(),
        last_changed: form.last_changed,
    };

    serde_json::to_string(&snap).map_err(|e| AppError::SnapshotEncodeFailed(e.to_string()))
}

pub fn decode(blob: &str) -> AppResult<PersistedFormState> {
    serde_json::from_str(blob).map_err(|e| AppError::SnapshotDecodeFailed(e.to_string()))
}

impl PersistedFormState {
    /// Apply a decoded snapshot onto a fresh in-memory state. Edit mode and
    /// pending scroll requests are never persisted.
    pub fn apply_to(&self, form: &mut FormState) {
        form.changes = ChangeTree::from_json(&self.changes);
        form.expanded_sections = self.expanded_sections.iter().cloned().collect();
        form.active_section = self
            .active_section
            .as_ref()
            .filter(|s| !s.is_empty())
            .cloned();
        form.last_changed = self.last_changed;
    }
}
