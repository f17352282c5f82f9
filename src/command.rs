// src/command.rs
//
// Mutation surface of the form state store. Every operation locks, mutates,
// and re-persists the full snapshot; last write wins.

use std::sync::MutexGuard;

use crate::changes::FieldValue;
use crate::context::AppCtx;
use crate::error::{AppError, AppResult};
use crate::snapshot;
use crate::state_store::{state_key, StateStore};
use crate::types::{AppState, FormState};

pub(crate) fn lock_form<'a>(state: &'a AppState) -> AppResult<MutexGuard<'a, FormState>> {
    state.form.lock().map_err(|_| AppError::StateLockPoisoned)
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Set the leaf at `key` and stamp `last_changed`. The caller widget picked
/// the `FieldValue` variant; nothing here re-checks it against the config.
pub fn change_value(state: &AppState, ctx: &AppCtx, key: &str, value: FieldValue) -> AppResult<()> {
    {
        let mut form = lock_form(state)?;
        form.changes.set(key, value);
        form.last_changed = Some(now_ms());
    }
    persist_best_effort(state, ctx);
    Ok(())
}

/// Toggle a section open/closed and mark it active.
pub fn expand_section(state: &AppState, ctx: &AppCtx, id: &str) -> AppResult<()> {
    {
        let mut form = lock_form(state)?;
        if !form.expanded_sections.remove(id) {
            form.expanded_sections.insert(id.to_string());
        }
        form.active_section = Some(id.to_string());
    }
    persist_best_effort(state, ctx);
    Ok(())
}

/// Overwrite the expanded set with every configured section id.
pub fn expand_all(state: &AppState, ctx: &AppCtx) -> AppResult<()> {
    let all_ids = {
        let config = state.config.lock().map_err(|_| AppError::StateLockPoisoned)?;
        config.section_ids()
    };

    {
        let mut form = lock_form(state)?;
        form.expanded_sections = all_ids;
    }
    persist_best_effort(state, ctx);
    Ok(())
}

pub fn collapse_all(state: &AppState, ctx: &AppCtx) -> AppResult<()> {
    {
        let mut form = lock_form(state)?;
        form.expanded_sections.clear();
    }
    persist_best_effort(state, ctx);
    Ok(())
}

/// Ask the renderer to bring a section into view. Unknown ids are a silent
/// no-op; the changes map is never touched.
pub fn scroll_to_section(state: &AppState, ctx: &AppCtx, id: &str) -> AppResult<()> {
    let known = {
        let config = state.config.lock().map_err(|_| AppError::StateLockPoisoned)?;
        config.has_section(id)
    };
    if !known {
        return Ok(());
    }

    {
        let mut form = lock_form(state)?;
        form.active_section = Some(id.to_string());
        form.pending_scroll = Some(id.to_string());
    }
    persist_best_effort(state, ctx);
    Ok(())
}

/// Take the one-shot scroll request for this frame, if any.
pub fn take_pending_scroll(state: &AppState) -> Option<String> {
    lock_form(state).ok().and_then(|mut f| f.pending_scroll.take())
}

/// Clear all changes and the saved draft. Expansion and active section are
/// left alone; they re-persist on the next mutation.
pub fn reset(state: &AppState, ctx: &AppCtx) -> AppResult<()> {
    {
        let mut form = lock_form(state)?;
        form.changes.clear();
        form.last_changed = None;
    }
    clear_storage(ctx)
}

/// Remove the saved draft without touching in-memory state.
pub fn clear_storage(ctx: &AppCtx) -> AppResult<()> {
    let Some(form_id) = ctx.form_id() else {
        return Ok(());
    };
    ctx.state_store().remove(&state_key(&form_id))
}

pub fn set_edit_mode(state: &AppState, on: bool) -> AppResult<()> {
    let mut form = lock_form(state)?;
    form.edit_mode = on;
    Ok(())
}

/// One-time restore at startup. Missing or unparsable drafts fall back to
/// empty defaults; the failure is logged, never surfaced.
pub fn restore_persisted(state: &AppState, ctx: &AppCtx) -> AppResult<()> {
    let Some(form_id) = ctx.form_id() else {
        return Ok(());
    };

    let blob = match ctx.state_store().get(&state_key(&form_id)) {
        Ok(Some(blob)) => blob,
        Ok(None) => return Ok(()),
        Err(e) => {
            log::warn!("failed to read saved state for '{form_id}': {e}");
            return Ok(());
        }
    };

    match snapshot::decode(&blob) {
        Ok(snap) => {
            let mut form = lock_form(state)?;
            snap.apply_to(&mut form);
        }
        Err(e) => {
            log::warn!("discarding malformed saved state for '{form_id}': {e}");
        }
    }

    Ok(())
}

/// Replace the loaded configuration and retarget the context at a new form
/// id. In-memory state is wiped and any saved draft for the new id restored.
pub fn swap_config(
    state: &AppState,
    ctx: &AppCtx,
    config: crate::config::FormConfig,
    form_id: Option<String>,
) -> AppResult<()> {
    {
        let mut cfg = state.config.lock().map_err(|_| AppError::StateLockPoisoned)?;
        *cfg = config;
    }
    ctx.set_form_id(form_id);
    {
        let mut form = lock_form(state)?;
        *form = FormState::default();
    }
    restore_persisted(state, ctx)
}

/// Write the full snapshot after a mutation. Best-effort: a failed write is
/// logged and the in-memory state stays authoritative.
fn persist_best_effort(state: &AppState, ctx: &AppCtx) {
    let Some(form_id) = ctx.form_id() else {
        return;
    };

    let blob = match lock_form(state).and_then(|form| snapshot::encode(&form)) {
        Ok(blob) => blob,
        Err(e) => {
            log::warn!("failed to snapshot form '{form_id}': {e}");
            return;
        }
    };

    if let Err(e) = ctx.state_store().set(&state_key(&form_id), &blob) {
        log::warn!("failed to save form '{form_id}': {e}");
    }
}
