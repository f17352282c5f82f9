// src/context.rs

use std::path::PathBuf;
use std::sync::Mutex;

use crate::state_store::FileStateStore;

pub const APP_QUALIFIER: &str = "dev";
pub const APP_ORG: &str = "formsmith";
pub const APP_ID: &str = "formsmith";

pub const FORMS_DIR: &str = "forms";

#[derive(Debug)]
pub struct AppCtx {
    pub app_data_dir: PathBuf,
    form_id: Mutex<Option<String>>,
    pub debug_ui: bool,
}

impl AppCtx {
    pub fn new(app_data_dir: PathBuf, form_id: Option<String>) -> Self {
        let debug_ui = std::env::var("FORMSMITH_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            app_data_dir,
            form_id: Mutex::new(form_id),
            debug_ui,
        }
    }

    /// <app_data>/forms
    pub fn forms_root(&self) -> PathBuf {
        self.app_data_dir.join(FORMS_DIR)
    }

    pub fn state_store(&self) -> FileStateStore {
        FileStateStore::new(self.forms_root())
    }

    pub fn form_id(&self) -> Option<String> {
        self.form_id.lock().ok().and_then(|g| g.clone())
    }

    pub fn set_form_id(&self, id: Option<String>) {
        if let Ok(mut g) = self.form_id.lock() {
            *g = id;
        }
    }
}
