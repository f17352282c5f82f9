// src/ui/widgets.rs

use eframe::egui;
use formsmith_lib::changes::FieldValue;
use formsmith_lib::config::FieldType;
use formsmith_lib::render::{normalize_date_display, FieldCell};
use std::collections::BTreeMap;

/// Render one field through the adapter matching its type. Returns the new
/// value when the user edited it this frame. Every adapter is read-only
/// while edit mode is off.
pub fn field_widget(
    ui: &mut egui::Ui,
    cell: &FieldCell,
    edit_mode: bool,
    input_buf: &mut BTreeMap<String, String>,
) -> Option<FieldValue> {
    let field = &cell.field;

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(&field.label).strong());
        if field.required {
            ui.colored_label(egui::Color32::from_rgb(255, 60, 60), "*");
        }
    });

    match field.field_type {
        FieldType::Boolean => {
            let mut v = cell.value.as_ref().map(|v| v.truthy()).unwrap_or(false);
            let resp = ui.add_enabled(edit_mode, egui::Checkbox::new(&mut v, ""));
            resp.changed().then(|| FieldValue::Bool(v))
        }

        FieldType::Select => {
            let current = cell
                .value
                .as_ref()
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();

            // Selection is by value identity; show the matching label.
            let selected_text = field
                .options
                .iter()
                .find(|o| o.value == current)
                .map(|o| o.label.clone())
                .unwrap_or_else(|| "(select)".to_string());

            let mut picked: Option<FieldValue> = None;
            ui.add_enabled_ui(edit_mode, |ui| {
                egui::ComboBox::from_id_salt(format!("select_{}", field.key))
                    .selected_text(selected_text)
                    .show_ui(ui, |ui| {
                        for o in field.options.iter() {
                            if ui.selectable_label(current == o.value, &o.label).clicked() {
                                picked = Some(FieldValue::Text(o.value.clone()));
                            }
                        }
                    });
            });
            picked
        }

        FieldType::Date => {
            let buf = input_buf.entry(field.key.clone()).or_insert_with(|| {
                cell.value
                    .as_ref()
                    .and_then(|v| v.as_str())
                    .map(normalize_date_display)
                    .unwrap_or_default()
            });

            let resp = ui.add_enabled(
                edit_mode,
                egui::TextEdit::singleline(buf).hint_text("YYYY-MM-DD"),
            );
            resp.changed().then(|| FieldValue::Date(buf.clone()))
        }

        // Text, plus anything the config parser could not classify.
        FieldType::Text => {
            let buf = input_buf.entry(field.key.clone()).or_insert_with(|| {
                cell.value
                    .as_ref()
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string()
            });

            let resp = ui.add_enabled(edit_mode, egui::TextEdit::singleline(buf));
            resp.changed().then(|| FieldValue::Text(buf.clone()))
        }
    }
}
