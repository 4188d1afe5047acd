//! Modal label entry shown while a drawn box waits for its label.

use eframe::egui;

#[derive(Debug, Default)]
pub struct LabelPrompt {
    text: String,
}

/// What the user did with the prompt this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAnswer {
    Pending,
    Submitted(String),
    Dismissed,
}

impl LabelPrompt {
    /// Draws the modal. Enter or OK submits, Escape, Cancel or a click
    /// outside dismisses.
    pub fn show(&mut self, ctx: &egui::Context) -> PromptAnswer {
        let mut answer = PromptAnswer::Pending;
        let modal = egui::Modal::new(egui::Id::new("label-prompt")).show(ctx, |ui| {
            ui.set_min_width(240.0);
            ui.heading("Input");
            ui.label("Enter Label ID:");
            let edit = ui.text_edit_singleline(&mut self.text);
            let entered = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if !entered {
                edit.request_focus();
            }
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() || entered {
                    answer = PromptAnswer::Submitted(self.text.clone());
                }
                if ui.button("Cancel").clicked() {
                    answer = PromptAnswer::Dismissed;
                }
            });
        });
        if answer == PromptAnswer::Pending && modal.should_close() {
            answer = PromptAnswer::Dismissed;
        }
        answer
    }

    /// Forget the typed text once the answer has been accepted.
    pub fn reset(&mut self) {
        self.text.clear();
    }
}
