// src/main.rs

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use directories::ProjectDirs;

use formsmith_lib::config;
use formsmith_lib::context::{AppCtx, APP_ID, APP_ORG, APP_QUALIFIER};

const DEFAULT_CONFIG: &str = include_str!("../demos/sample_form.json5");

fn app_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FORMSMITH_DATA_DIR") {
        return PathBuf::from(dir);
    }

    // Debug builds write to a sandbox dir so development never touches a
    // real profile.
    if cfg!(debug_assertions) {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".local/share/formsmith-dev");
        }
    }

    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_ID)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("formsmith-data"))
}

fn main() -> eframe::Result {
    env_logger::init();

    let form_id = std::env::var("FORMSMITH_FORM_ID").unwrap_or_else(|_| "demo".to_string());

    let config = config::parse_config_str(DEFAULT_CONFIG)
        .expect("bundled demo configuration must parse");

    let ctx = Arc::new(AppCtx::new(app_data_dir(), Some(form_id)));
    let state = Arc::new(
        formsmith_lib::init_state(config, &ctx).expect("app data dir must be writable"),
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1080.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Formsmith",
        options,
        Box::new(move |_cc| Ok(Box::new(ui::UiApp::new(state, ctx)))),
    )
}
