// src/types.rs

use std::collections::BTreeSet;
use std::sync::Mutex;

use crate::changes::ChangeTree;
use crate::config::FormConfig;

/// All mutable state for one mounted form.
#[derive(Debug, Default)]
pub struct FormState {
    pub changes: ChangeTree,
    pub expanded_sections: BTreeSet<String>,
    /// Last-interacted-with or scrolled-to section, at most one.
    pub active_section: Option<String>,
    /// Milliseconds since the epoch of the last value change.
    pub last_changed: Option<i64>,
    /// Gates whether widgets accept input; never persisted.
    pub edit_mode: bool,
    /// One-shot scroll request consumed by the renderer.
    pub pending_scroll: Option<String>,
}

pub struct AppState {
    pub form: Mutex<FormState>,
    pub config: Mutex<FormConfig>,
}

impl AppState {
    pub fn new(config: FormConfig) -> Self {
        Self {
            form: Mutex::new(FormState::default()),
            config: Mutex::new(config),
        }
    }
}
