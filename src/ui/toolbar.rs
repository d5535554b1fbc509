// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the session actions.
//!
//! This module provides the button row for loading inputs, stepping through
//! frames and saving results or progress.

/// Action requested from the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    LoadImages,
    LoadCoordinates,
    NextImages,
    SaveLabels,
    SaveState,
    LoadState,
}

/// Display the toolbar and report which button was pressed.
pub fn show(ui: &mut egui::Ui, can_advance: bool, has_samples: bool) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.button("📁 Load Images Folder").clicked() {
            action = ToolbarAction::LoadImages;
        }
        if ui.button("📄 Load Coordinates").clicked() {
            action = ToolbarAction::LoadCoordinates;
        }

        ui.separator();

        if ui
            .add_enabled(can_advance, egui::Button::new("➡ Next Images"))
            .clicked()
        {
            action = ToolbarAction::NextImages;
        }

        ui.separator();

        if ui
            .add_enabled(has_samples, egui::Button::new("💾 Save Labels"))
            .clicked()
        {
            action = ToolbarAction::SaveLabels;
        }
        if ui.button("Save State").clicked() {
            action = ToolbarAction::SaveState;
        }
        if ui.button("Load State").clicked() {
            action = ToolbarAction::LoadState;
        }

        ui.separator();

        ui.label(
            egui::RichText::new("Click a point on a later frame to label it")
                .italics()
                .weak(),
        );
    });

    action
}
