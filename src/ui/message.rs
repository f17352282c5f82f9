// src/ui/message.rs

use formsmith_lib::error::{AppError, UserMsgKind};

use eframe::egui;
use eframe::egui::{Color32, Ui};

#[derive(Clone, Debug, Default)]
pub struct PanelMsgState {
    kind: Option<UserMsgKind>,
    short: Option<String>,
}

impl PanelMsgState {
    pub fn clear(&mut self) {
        self.kind = None;
        self.short = None;
    }

    pub fn set_success(&mut self, short: impl Into<String>) {
        self.kind = Some(UserMsgKind::Success);
        self.short = Some(short.into());
    }

    pub fn set_error(&mut self, short: impl Into<String>) {
        self.kind = Some(UserMsgKind::Error);
        self.short = Some(short.into());
    }

    pub fn from_app_error(&mut self, err: &AppError, debug_ui: bool) {
        let msg = if debug_ui {
            err.to_string()
        } else {
            err.user_msg().short.to_string()
        };

        self.set_error(msg);
    }

    pub fn show(&self, ui: &mut Ui) {
        let (Some(kind), Some(short)) = (self.kind, self.short.as_deref()) else {
            return;
        };

        let (stroke, fill) = match kind {
            UserMsgKind::Success => (
                Color32::from_rgb(0, 220, 90),
                Color32::from_rgb(0, 80, 40),
            ),
            UserMsgKind::Warn => (
                Color32::from_rgb(255, 170, 0),
                Color32::from_rgb(90, 60, 0),
            ),
            UserMsgKind::Error => (
                Color32::from_rgb(255, 60, 60),
                Color32::from_rgb(90, 0, 0),
            ),
            UserMsgKind::Info => (
                Color32::from_rgb(80, 180, 255),
                Color32::from_rgb(10, 40, 80),
            ),
        };

        egui::Frame::NONE
            .fill(fill)
            .stroke(egui::Stroke::new(1.0, stroke))
            .corner_radius(egui::CornerRadius::same(8u8))
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                ui.colored_label(stroke, short);
            });
    }
}
