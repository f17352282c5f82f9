// tests/common/mod.rs

use std::sync::Arc;

use tempfile::TempDir;

use formsmith_lib::config::{parse_config_str, FormConfig};
use formsmith_lib::context::AppCtx;
use formsmith_lib::types::AppState;

/// One app instance over a temp data dir. The tempdir handle is held so the
/// directory outlives the test body.
pub struct TestEnv {
    _td: Arc<TempDir>,
    pub ctx: AppCtx,
    pub state: AppState,
}

impl TestEnv {
    pub fn new(form_id: &str) -> Self {
        let td = Arc::new(TempDir::new().expect("create tempdir"));
        Self::with_dir(td, form_id, sample_config())
    }

    /// Second "launch" against the same data dir, as after an app restart.
    pub fn reopen(&self, form_id: &str) -> Self {
        Self::with_dir(Arc::clone(&self._td), form_id, sample_config())
    }

    fn with_dir(td: Arc<TempDir>, form_id: &str, config: FormConfig) -> Self {
        let ctx = AppCtx::new(td.path().join("data"), Some(form_id.to_string()));
        let state = AppState::new_for_tests(config, &ctx).expect("init state");
        Self {
            _td: td,
            ctx,
            state,
        }
    }
}

pub fn sample_config() -> FormConfig {
    parse_config_str(
        r#"
        {
          sections: [
            {
              id: "personal", title: "Personal Information", order: 1,
              fields: [
                { key: "name", label: "Full Name", type: "text", colSpan: 2, required: true },
                { key: "email", label: "Email", type: "text" },
                { key: "dob", label: "Date of Birth", type: "date" },
                { key: "active", label: "Active", type: "boolean" }
              ]
            },
            {
              id: "address", title: "Address", order: 2,
              fields: [
                { key: "address.street", label: "Street", type: "text", colSpan: 2 },
                { key: "address.city", label: "City", type: "text" },
                { key: "address.country", label: "Country", type: "select",
                  options: [
                    { label: "United States", value: "us" },
                    { label: "Canada", value: "ca" }
                  ] }
              ]
            },
            {
              id: "preferences", title: "Preferences", order: 3, layout: "right",
              fields: [
                { key: "prefs.theme", label: "Theme", type: "select",
                  options: [
                    { label: "Light", value: "light" },
                    { label: "Dark", value: "dark" }
                  ] }
              ]
            }
          ]
        }
        "#,
    )
    .expect("sample config parses")
}
