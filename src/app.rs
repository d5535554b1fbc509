// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the eframe::App trait. It owns the labeling session, turns widget
//! actions into session operations one at a time, and re-renders the
//! frame pair from the session afterwards.

use crate::config::AppConfig;
use crate::error::SessionError;
use crate::models::session::{ClickOutcome, Session};
use crate::ui::{canvas, frame_title, label_prompt, toolbar};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// Main application state.
pub struct PointLabelApp {
    /// The labeling session being worked on
    session: Session,

    /// Settings loaded at startup
    config: AppConfig,

    /// Decoded frame textures, keyed by image path
    textures: HashMap<PathBuf, egui::TextureHandle>,

    /// Images that failed to decode (logged once)
    failed_images: HashSet<PathBuf>,

    /// Labeled frame picked for re-inspection in the left pane
    inspected_frame: Option<usize>,

    /// Open label dialog, if any
    label_prompt: Option<label_prompt::LabelPrompt>,

    /// Error waiting to be acknowledged
    error_message: Option<String>,
}

impl Default for PointLabelApp {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl PointLabelApp {
    /// Create a new application instance.
    pub fn new(config: AppConfig) -> Self {
        Self {
            session: Session::with_hit_radius(config.hit_radius),
            config,
            textures: HashMap::new(),
            failed_images: HashSet::new(),
            inspected_frame: None,
            label_prompt: None,
            error_message: None,
        }
    }

    fn report_error(&mut self, action: &str, err: SessionError) {
        log::error!("{} failed: {}", action, err);
        self.error_message = Some(format!("{action} failed:\n{err}"));
    }

    /// Drop cached textures and view state after the inputs changed.
    fn reset_view(&mut self) {
        self.textures.clear();
        self.failed_images.clear();
        self.inspected_frame = None;
    }

    /// Texture for a frame, decoding the image on first use.
    fn texture_for(&mut self, ctx: &egui::Context, frame: usize) -> Option<egui::TextureHandle> {
        let path = self.session.images().get(frame)?.clone();
        if let Some(texture) = self.textures.get(&path) {
            return Some(texture.clone());
        }
        if self.failed_images.contains(&path) {
            return None;
        }

        match crate::io::media::load_image(&path) {
            Ok(loaded) => {
                let size = [loaded.width as usize, loaded.height as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &loaded.pixels);
                let texture = ctx.load_texture(
                    path.to_string_lossy(),
                    color_image,
                    egui::TextureOptions::LINEAR,
                );
                log::debug!("Loaded image: {} ({}x{})", path.display(), loaded.width, loaded.height);
                self.textures.insert(path, texture.clone());
                Some(texture)
            }
            Err(e) => {
                log::error!("{}", e);
                self.failed_images.insert(path);
                None
            }
        }
    }

    fn handle_toolbar(&mut self, action: toolbar::ToolbarAction) {
        use toolbar::ToolbarAction;

        match action {
            ToolbarAction::None => {}
            ToolbarAction::LoadImages => {
                if let Some(folder) = rfd::FileDialog::new()
                    .set_title("Select Images Folder")
                    .pick_folder()
                {
                    match self.session.load_images(&folder) {
                        Ok(_) => self.reset_view(),
                        Err(e) => self.report_error("Loading images", e),
                    }
                }
            }
            ToolbarAction::LoadCoordinates => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Select Coordinate CSV")
                    .add_filter("CSV Files", &["csv"])
                    .pick_file()
                {
                    match self.session.load_coordinates(&path) {
                        Ok(_) => self.inspected_frame = None,
                        Err(e) => self.report_error("Loading coordinates", e),
                    }
                }
            }
            ToolbarAction::NextImages => {
                if self.session.advance() {
                    self.inspected_frame = None;
                }
            }
            ToolbarAction::SaveLabels => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Save Labeled Coordinates")
                    .add_filter("CSV Files", &["csv"])
                    .set_file_name("labels.csv")
                    .save_file()
                {
                    if let Err(e) = self.session.export_labels(&path) {
                        self.report_error("Saving labels", e);
                    }
                }
            }
            ToolbarAction::SaveState => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Save Current State")
                    .add_filter("JSON Files", &["json"])
                    .set_file_name("state.json")
                    .save_file()
                {
                    if let Err(e) = self.session.save_state(&path) {
                        self.report_error("Saving state", e);
                    }
                }
            }
            ToolbarAction::LoadState => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Load Saved State")
                    .add_filter("JSON Files", &["json"])
                    .pick_file()
                {
                    match self.session.load_state(&path) {
                        Ok(()) => self.reset_view(),
                        Err(e) => self.report_error("Loading state", e),
                    }
                }
            }
        }
    }

    /// Handle a click at image coordinates `(x, y)` on `frame`.
    fn handle_click(&mut self, frame: usize, x: f64, y: f64) {
        match self.session.click(frame, x, y) {
            ClickOutcome::Missed => {
                log::debug!("Click at ({:.1}, {:.1}) on frame {} hit nothing", x, y, frame);
            }
            ClickOutcome::FirstFrame { sample } => {
                log::debug!("Sample {} is on the first frame and keeps its label", sample);
            }
            ClickOutcome::NeedsLabel { sample, choices } => {
                self.label_prompt = Some(label_prompt::LabelPrompt::new(sample, frame, choices));
            }
        }
    }

    fn point_style(&self) -> canvas::PointStyle {
        canvas::PointStyle {
            radius: self.config.point_radius,
            font_size: self.config.label_font_size,
        }
    }
}

impl eframe::App for PointLabelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let idle = self.label_prompt.is_none() && self.error_message.is_none();

        // Toolbar
        let can_advance = self.session.current_frame() + 1 < self.session.images().len();
        let has_samples = !self.session.samples().is_empty();
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                ui.add_enabled_ui(idle, |ui| toolbar::show(ui, can_advance, has_samples))
                    .inner
            })
            .inner;
        self.handle_toolbar(toolbar_action);

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} images", self.session.images().len()));
                ui.separator();
                ui.label(format!("{} points", self.session.samples().len()));
                ui.separator();
                ui.label(format!("{} labeled", self.session.labels().len()));
                ui.separator();
                ui.label(format!("Next label: {}", self.session.next_label()));
            });
        });

        // Resolve what both panes show before borrowing self for the panel
        let (current, right) = self.session.frame_pair();
        let left = self.inspected_frame.or(current);
        let left_texture = left.and_then(|frame| self.texture_for(ctx, frame));
        let right_texture = right.and_then(|frame| self.texture_for(ctx, frame));
        let left_points = left
            .map(|frame| self.session.points_in_frame(frame))
            .unwrap_or_default();
        let right_points = right
            .map(|frame| self.session.points_in_frame(frame))
            .unwrap_or_default();
        let labeled_frames = self.session.labeled_frames();
        let image_count = self.session.images().len();
        let style = self.point_style();

        let mut inspected = self.inspected_frame;
        let mut clicked = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                // Left pane
                let ui = &mut columns[0];
                ui.horizontal(|ui| {
                    ui.add_enabled_ui(!labeled_frames.is_empty(), |ui| {
                        let selected_text = if labeled_frames.is_empty() {
                            "No labeled frames yet".to_string()
                        } else {
                            match left {
                                Some(frame) => frame_title(frame),
                                None => "Labeled frames".to_string(),
                            }
                        };
                        egui::ComboBox::from_id_source("labeled_frames")
                            .selected_text(selected_text)
                            .show_ui(ui, |ui| {
                                if let Some(frame) = current {
                                    ui.selectable_value(
                                        &mut inspected,
                                        None,
                                        format!("Current frame ({})", frame_title(frame)),
                                    );
                                }
                                for &frame in &labeled_frames {
                                    if frame < image_count {
                                        ui.selectable_value(
                                            &mut inspected,
                                            Some(frame),
                                            frame_title(frame),
                                        );
                                    }
                                }
                            });
                    });
                });
                let action = canvas::show(
                    ui,
                    left_texture.as_ref(),
                    &left_points,
                    style,
                    "Load an images folder to begin",
                );
                if let (canvas::CanvasAction::Click { x, y }, Some(frame)) = (action, left) {
                    clicked = Some((frame, x, y));
                }

                // Right pane
                let ui = &mut columns[1];
                let header = match right {
                    Some(frame) => format!("{} / {}", frame_title(frame), image_count),
                    None => "No more images".to_string(),
                };
                ui.vertical_centered(|ui| ui.label(header));
                let action = canvas::show(
                    ui,
                    right_texture.as_ref(),
                    &right_points,
                    style,
                    "No more images",
                );
                if let (canvas::CanvasAction::Click { x, y }, Some(frame)) = (action, right) {
                    clicked = Some((frame, x, y));
                }
            });
        });

        self.inspected_frame = inspected;
        if idle {
            if let Some((frame, x, y)) = clicked {
                self.handle_click(frame, x, y);
            }
        }

        // Label dialog
        if let Some(prompt) = self.label_prompt.as_mut() {
            if let Some(decision) = label_prompt::show(ctx, prompt) {
                let sample = prompt.sample;
                self.label_prompt = None;
                if self.session.apply_label(sample, decision).is_none() {
                    log::debug!("Label dialog for sample {} made no change", sample);
                }
            }
        }

        // Error dialog
        if let Some(message) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(10.0);
                    if ui.button("✖ Close").clicked() {
                        self.error_message = None;
                    }
                });
        }
    }
}
