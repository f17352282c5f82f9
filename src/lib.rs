// src/lib.rs

pub mod changes;
pub mod command;
pub mod config;
pub mod context;
pub mod error;
pub mod render;
pub mod snapshot;
pub mod state_store;
pub mod types;

use crate::config::FormConfig;
use crate::context::AppCtx;
use crate::error::AppResult;
use crate::types::AppState;

/// Build the app state for a configuration and restore any saved draft for
/// the context's form id. Restore is read-once; later writes are incremental.
pub fn init_state(config: FormConfig, ctx: &AppCtx) -> AppResult<AppState> {
    std::fs::create_dir_all(&ctx.app_data_dir)?;

    let state = AppState::new(config);
    command::restore_persisted(&state, ctx)?;
    Ok(state)
}

impl AppState {
    pub fn new_for_tests(config: FormConfig, ctx: &AppCtx) -> AppResult<Self> {
        crate::init_state(config, ctx)
    }
}
