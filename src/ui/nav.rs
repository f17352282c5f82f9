// src/ui/nav.rs

use eframe::egui;

/// What the control rail should show (derived by ui/mod.rs once per frame).
#[derive(Clone, Debug)]
pub struct NavModel {
    /// (id, title) pairs in render order.
    pub sections: Vec<(String, String)>,
    pub edit_mode: bool,
    pub active_section: Option<String>,
    pub last_changed_text: Option<String>,
    pub has_saved_draft: bool,
}

/// Clicks collected this frame; ui/mod.rs dispatches them to the command
/// layer so the rail itself stays a pure view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavEvents {
    pub set_edit_mode: Option<bool>,
    pub expand_all: bool,
    pub collapse_all: bool,
    pub scroll_to: Option<String>,
    pub reset: bool,
    pub clear_saved: bool,
    pub browse_config: bool,
}

pub struct ControlNav;

impl ControlNav {
    pub fn new() -> Self {
        Self
    }

    /// Pure view: renders from NavModel and records clicks in NavEvents.
    pub fn ui(&mut self, ctx: &egui::Context, model: &NavModel, events: &mut NavEvents) {
        egui::SidePanel::left("control_nav")
            .resizable(false)
            .min_width(180.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.label(egui::RichText::new("Formsmith").strong().size(18.0));
                ui.separator();

                let mut edit = model.edit_mode;
                if ui.checkbox(&mut edit, "Edit mode").changed() {
                    events.set_edit_mode = Some(edit);
                }

                if let Some(ts) = &model.last_changed_text {
                    ui.label(format!("Last change: {ts}"));
                }

                ui.separator();

                if ui.button("Expand All").clicked() {
                    events.expand_all = true;
                }
                if ui.button("Collapse All").clicked() {
                    events.collapse_all = true;
                }

                ui.separator();
                ui.label("Sections");

                for (id, title) in &model.sections {
                    let selected = model.active_section.as_deref() == Some(id.as_str());
                    if ui.selectable_label(selected, title).clicked() {
                        events.scroll_to = Some(id.clone());
                    }
                }

                ui.separator();

                if ui.button("Reset").clicked() {
                    events.reset = true;
                }
                if ui
                    .add_enabled(model.has_saved_draft, egui::Button::new("Clear Saved"))
                    .clicked()
                {
                    events.clear_saved = true;
                }

                ui.separator();

                if ui.button("Load Config…").clicked() {
                    events.browse_config = true;
                }
            });
    }
}
