// src/ui/mod.rs

pub mod form_panel;
pub mod message;
pub mod nav;
pub mod widgets;

use std::sync::Arc;

use eframe::egui;

use formsmith_lib::command;
use formsmith_lib::config;
use formsmith_lib::context::AppCtx;
use formsmith_lib::state_store::state_key;
use formsmith_lib::types::AppState;

use self::form_panel::FormPanel;
use self::message::PanelMsgState;
use self::nav::{ControlNav, NavEvents, NavModel};

pub struct UiApp {
    state: Arc<AppState>,
    ctx: Arc<AppCtx>,
    nav: ControlNav,
    form: FormPanel,
    msg: PanelMsgState,
}

impl UiApp {
    pub fn new(state: Arc<AppState>, ctx: Arc<AppCtx>) -> Self {
        Self {
            state,
            ctx,
            nav: ControlNav::new(),
            form: FormPanel::new(),
            msg: PanelMsgState::default(),
        }
    }

    fn nav_model(&self) -> NavModel {
        let sections = self
            .state
            .config
            .lock()
            .map(|cfg| {
                let mut ordered: Vec<_> = cfg
                    .sections
                    .iter()
                    .map(|s| (s.order, s.id.clone(), s.title.clone()))
                    .collect();
                ordered.sort_by_key(|(order, _, _)| *order);
                ordered.into_iter().map(|(_, id, title)| (id, title)).collect()
            })
            .unwrap_or_default();

        let (edit_mode, active_section, last_changed_text) = self
            .state
            .form
            .lock()
            .map(|form| {
                let ts = form.last_changed.and_then(|ms| {
                    chrono::DateTime::from_timestamp_millis(ms)
                        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                });
                (form.edit_mode, form.active_section.clone(), ts)
            })
            .unwrap_or((false, None, None));

        let has_saved_draft = self
            .ctx
            .form_id()
            .map(|id| self.ctx.state_store().contains(&state_key(&id)))
            .unwrap_or(false);

        NavModel {
            sections,
            edit_mode,
            active_section,
            last_changed_text,
            has_saved_draft,
        }
    }

    fn dispatch(&mut self, events: NavEvents) {
        if events == NavEvents::default() {
            return;
        }
        // Any interaction replaces the previous banner.
        self.msg.clear();

        let state = self.state.as_ref();
        let ctx = self.ctx.as_ref();

        if let Some(on) = events.set_edit_mode {
            if let Err(e) = command::set_edit_mode(state, on) {
                self.msg.from_app_error(&e, ctx.debug_ui);
            }
        }

        if events.expand_all {
            if let Err(e) = command::expand_all(state, ctx) {
                self.msg.from_app_error(&e, ctx.debug_ui);
            }
        }

        if events.collapse_all {
            if let Err(e) = command::collapse_all(state, ctx) {
                self.msg.from_app_error(&e, ctx.debug_ui);
            }
        }

        if let Some(id) = events.scroll_to {
            if let Err(e) = command::scroll_to_section(state, ctx, &id) {
                self.msg.from_app_error(&e, ctx.debug_ui);
            }
        }

        if events.reset {
            match command::reset(state, ctx) {
                Ok(()) => {
                    self.form.reset_inputs();
                    self.msg.set_success("Form reset; saved draft removed.");
                }
                Err(e) => self.msg.from_app_error(&e, ctx.debug_ui),
            }
        }

        if events.clear_saved {
            match command::clear_storage(ctx) {
                Ok(()) => self.msg.set_success("Saved draft removed."),
                Err(e) => self.msg.from_app_error(&e, ctx.debug_ui),
            }
        }

        if events.browse_config {
            self.browse_config();
        }
    }

    fn browse_config(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Form configuration", &["json5", "json"])
            .pick_file()
        else {
            return;
        };

        let new_config = match config::load_config_path(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                self.msg.set_error(format!("Could not load configuration: {e}"));
                return;
            }
        };

        let form_id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string());

        match command::swap_config(&self.state, &self.ctx, new_config, form_id) {
            Ok(()) => {
                self.form.reset_inputs();
                self.msg.set_success(format!("Loaded {}", path.display()));
            }
            Err(e) => self.msg.from_app_error(&e, self.ctx.debug_ui),
        }
    }
}

impl eframe::App for UiApp {
    fn update(&mut self, ectx: &egui::Context, _frame: &mut eframe::Frame) {
        let model = self.nav_model();
        let mut events = NavEvents::default();
        self.nav.ui(ectx, &model, &mut events);
        self.dispatch(events);

        egui::CentralPanel::default().show(ectx, |ui| {
            self.msg.show(ui);

            ui.horizontal(|ui| {
                match self.ctx.form_id() {
                    Some(id) => ui.label(format!("Form: {id}")),
                    None => ui.label("Form: (unsaved)"),
                };
            });
            ui.separator();

            self.form
                .ui(ui, self.state.as_ref(), self.ctx.as_ref(), &mut self.msg);
        });
    }
}
