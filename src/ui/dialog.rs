// src/ui/dialog.rs

use eframe::egui::{self, Context};

/// The types of dialogs you may show.
#[derive(Debug, PartialEq, Eq)]
pub enum Dialog {
    DiscardDocument,
}

/// The possible outcomes when a dialog is closed.
#[derive(Debug, PartialEq, Eq)]
pub enum DialogResult {
    Discard,
    Cancel,
}

/// Manages the currently active dialog (if any) and its result.
#[derive(Default)]
pub struct DialogManager {
    active_dialog: Option<Dialog>,
    result: Option<DialogResult>,
}

impl DialogManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_dialog(&mut self, dialog: Dialog) {
        self.active_dialog = Some(dialog);
    }

    /// Convenience method for the "discard current map" confirmation.
    pub fn show_discard_dialog(&mut self) {
        self.show_dialog(Dialog::DiscardDocument);
    }

    /// Call this on every UI frame to render the active dialog (if any).
    /// When the user responds, returns `Some(DialogResult)` and clears the
    /// active dialog.
    pub fn update(&mut self, ctx: &Context) -> Option<DialogResult> {
        if let Some(dialog) = &self.active_dialog {
            match dialog {
                Dialog::DiscardDocument => {
                    egui::Window::new("New Map")
                        .collapsible(false)
                        .resizable(false)
                        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                        .show(ctx, |ui| {
                            ui.label("Replace the current map with an empty one?");
                            ui.horizontal(|ui| {
                                if ui.button("Discard").clicked() {
                                    self.result = Some(DialogResult::Discard);
                                }
                                if ui.button("Cancel").clicked() {
                                    self.result = Some(DialogResult::Cancel);
                                }
                            });
                        });
                }
            }
            if let Some(result) = self.result.take() {
                self.active_dialog = None;
                return Some(result);
            }
        }
        None
    }
}
