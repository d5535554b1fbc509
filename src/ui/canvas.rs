// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Frame canvas for image display and point picking.
//!
//! Each pane shows one frame scaled to fit, with that frame's samples drawn
//! on top. Labeled samples are green with their label next to them;
//! unlabeled samples are red. Clicks are reported in image pixels.

use crate::models::sample::FramePoint;
use crate::util::geometry;

/// Offset of the label text from its point, in image pixels.
const LABEL_OFFSET: (f64, f64) = (5.0, -5.0);

const LABELED_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 255, 0);
const UNLABELED_COLOR: egui::Color32 = egui::Color32::RED;

/// Result of canvas interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasAction {
    None,
    /// Click inside the image, in image pixel coordinates
    Click { x: f64, y: f64 },
}

/// How points are drawn.
#[derive(Debug, Clone, Copy)]
pub struct PointStyle {
    pub radius: f32,
    pub font_size: f32,
}

/// Display one frame with its points and report clicks on it.
pub fn show(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    points: &[FramePoint],
    style: PointStyle,
    empty_message: &str,
) -> CanvasAction {
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    egui::Frame::canvas(ui.style())
        .show(ui, |ui| {
            let Some(texture) = texture else {
                let size = ui.available_size();
                ui.allocate_ui(size, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new(empty_message).color(egui::Color32::from_gray(180)),
                        );
                    });
                });
                return CanvasAction::None;
            };

            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click());
            let image_size = texture.size_vec2();
            let image_rect = geometry::fit_image(response.rect, image_size);

            painter.image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            for point in points {
                draw_point(&painter, point, image_rect, image_size, style);
            }

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    if image_rect.contains(pos) {
                        let (x, y) = geometry::screen_to_image(pos, image_rect, image_size);
                        return CanvasAction::Click { x, y };
                    }
                }
            }

            CanvasAction::None
        })
        .inner
}

/// Draw a single point and, when labeled, its label.
fn draw_point(
    painter: &egui::Painter,
    point: &FramePoint,
    image_rect: egui::Rect,
    image_size: egui::Vec2,
    style: PointStyle,
) {
    let center = geometry::image_to_screen(point.x, point.y, image_rect, image_size);

    match point.label {
        Some(label) => {
            painter.circle_filled(center, style.radius, LABELED_COLOR);

            let text_pos = geometry::image_to_screen(
                point.x + LABEL_OFFSET.0,
                point.y + LABEL_OFFSET.1,
                image_rect,
                image_size,
            );
            painter.text(
                text_pos,
                egui::Align2::LEFT_BOTTOM,
                label.to_string(),
                egui::FontId::proportional(style.font_size),
                egui::Color32::WHITE,
            );
        }
        None => {
            painter.circle_filled(center, style.radius, UNLABELED_COLOR);
            painter.circle_stroke(center, style.radius, egui::Stroke::new(1.0, egui::Color32::BLACK));
        }
    }
}
