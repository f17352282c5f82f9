// src/ui/form_panel.rs

use crate::ui::message::PanelMsgState;
use crate::ui::widgets::field_widget;
use eframe::egui;
use formsmith_lib::changes::FieldValue;
use formsmith_lib::command;
use formsmith_lib::config::SectionLayout;
use formsmith_lib::context::AppCtx;
use formsmith_lib::render::{build_render_plan, RenderPlan, SectionPlan};
use formsmith_lib::types::AppState;
use std::collections::BTreeMap;

pub struct FormPanel {
    // raw text buffers for fields edited as text (text + date adapters)
    input_buf: BTreeMap<String, String>,
}

impl FormPanel {
    pub fn new() -> Self {
        Self {
            input_buf: BTreeMap::new(),
        }
    }

    /// Drop all edit buffers so the next frame reseeds them from state.
    pub fn reset_inputs(&mut self) {
        self.input_buf.clear();
    }

    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        state: &AppState,
        ctx: &AppCtx,
        msg: &mut PanelMsgState,
    ) {
        let (plan, edit_mode) = match snapshot_plan(state) {
            Some(p) => p,
            None => {
                ui.label("(Form state unavailable.)");
                return;
            }
        };

        let pending_scroll = command::take_pending_scroll(state);

        // Collected while drawing, dispatched after the borrow ends.
        let mut value_events: Vec<(String, FieldValue)> = Vec::new();
        let mut toggle_events: Vec<String> = Vec::new();

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                for section in &plan.sections {
                    self.ui_section(
                        ui,
                        section,
                        edit_mode,
                        pending_scroll.as_deref(),
                        &mut value_events,
                        &mut toggle_events,
                    );
                    ui.add_space(8.0);
                }
            });

        for id in toggle_events {
            if let Err(e) = command::expand_section(state, ctx, &id) {
                msg.from_app_error(&e, ctx.debug_ui);
            }
        }

        for (key, value) in value_events {
            if let Err(e) = command::change_value(state, ctx, &key, value) {
                msg.from_app_error(&e, ctx.debug_ui);
            }
        }
    }

    fn ui_section(
        &mut self,
        ui: &mut egui::Ui,
        section: &SectionPlan,
        edit_mode: bool,
        pending_scroll: Option<&str>,
        value_events: &mut Vec<(String, FieldValue)>,
        toggle_events: &mut Vec<String>,
    ) {
        let avail = ui.available_width();
        let (width, offset) = match section.layout {
            SectionLayout::Full => (avail, 0.0),
            SectionLayout::Left => (avail / 2.0, 0.0),
            SectionLayout::Right => (avail / 2.0, avail / 2.0),
        };

        ui.horizontal(|ui| {
            ui.add_space(offset);
            ui.vertical(|ui| {
                ui.set_max_width(width);
                ui.set_min_width(width);

                egui::Frame::group(ui.style())
                    .inner_margin(egui::Margin::same(12))
                    .show(ui, |ui| {
                        let indicator = if section.expanded { "▼" } else { "▶" };
                        let header = ui
                            .horizontal(|ui| {
                                let resp = ui.selectable_label(
                                    false,
                                    egui::RichText::new(&section.title).strong().size(18.0),
                                );
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| ui.label(indicator),
                                );
                                resp
                            })
                            .inner;

                        if pending_scroll == Some(section.id.as_str()) {
                            header.scroll_to_me(Some(egui::Align::Min));
                        }

                        if header.clicked() {
                            toggle_events.push(section.id.clone());
                        }

                        if !section.expanded {
                            return;
                        }

                        ui.add_space(6.0);

                        for row in &section.rows {
                            let full_row =
                                row.len() == 1 && row[0].field.col_span >= 2;

                            if full_row {
                                if let Some(v) =
                                    field_widget(ui, &row[0], edit_mode, &mut self.input_buf)
                                {
                                    value_events.push((row[0].field.key.clone(), v));
                                }
                            } else {
                                ui.columns(2, |cols| {
                                    for (i, cell) in row.iter().enumerate() {
                                        if let Some(v) = field_widget(
                                            &mut cols[i],
                                            cell,
                                            edit_mode,
                                            &mut self.input_buf,
                                        ) {
                                            value_events.push((cell.field.key.clone(), v));
                                        }
                                    }
                                });
                            }

                            ui.add_space(6.0);
                        }
                    });
            });
        });
    }
}

fn snapshot_plan(state: &AppState) -> Option<(RenderPlan, bool)> {
    let config = state.config.lock().ok()?;
    let form = state.form.lock().ok()?;
    let plan = build_render_plan(&config, &form.changes, &form.expanded_sections);
    Some((plan, form.edit_mode))
}
