// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Label selection dialog.
//!
//! Shown after a click hits an unlabeled or relabelable point. The user
//! either reuses one of the labels already in the session or asks for a
//! new one. Closing the window counts as cancelling.

use crate::models::sample::LabelDecision;

const NEW_LABEL: &str = "New Label";

/// An open label prompt for one sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPrompt {
    pub sample: usize,
    pub frame: usize,
    pub choices: Vec<u32>,
    /// Highlighted entry; `None` is "New Label"
    pub selected: Option<u32>,
}

impl LabelPrompt {
    /// Open a prompt with the first existing label highlighted.
    pub fn new(sample: usize, frame: usize, choices: Vec<u32>) -> Self {
        let selected = choices.first().copied();
        Self {
            sample,
            frame,
            choices,
            selected,
        }
    }

    /// Instruction line shown above the label list.
    pub fn message(&self) -> String {
        format!(
            "{}: choose a label or enter a new one",
            super::frame_title(self.frame)
        )
    }

    /// Decision for confirming the highlighted entry.
    pub fn confirm(&self) -> LabelDecision {
        match self.selected {
            Some(label) => LabelDecision::UseExisting(label),
            None => LabelDecision::CreateNew,
        }
    }
}

fn choice_text(selected: Option<u32>) -> String {
    selected
        .map(|label| label.to_string())
        .unwrap_or_else(|| NEW_LABEL.to_string())
}

/// Display the prompt. Returns the decision once the user has made one.
pub fn show(ctx: &egui::Context, prompt: &mut LabelPrompt) -> Option<LabelDecision> {
    let mut open = true;
    let mut decision = None;

    egui::Window::new("Select Label")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui| {
            ui.label(prompt.message());
            ui.add_space(6.0);

            egui::ComboBox::from_id_source("label_choice")
                .selected_text(choice_text(prompt.selected))
                .show_ui(ui, |ui| {
                    for &label in &prompt.choices {
                        ui.selectable_value(&mut prompt.selected, Some(label), label.to_string());
                    }
                    ui.selectable_value(&mut prompt.selected, None, NEW_LABEL);
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    decision = Some(prompt.confirm());
                }
                if ui.button("Cancel").clicked() {
                    decision = Some(LabelDecision::Cancelled);
                }
            });
        });

    if decision.is_none() {
        if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
            decision = Some(prompt.confirm());
        } else if ctx.input(|i| i.key_pressed(egui::Key::Escape)) || !open {
            decision = Some(LabelDecision::Cancelled);
        }
    }

    decision
}
