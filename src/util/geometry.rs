// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the transformations between screen coordinates in
//! a pane and pixel coordinates in the image displayed there. Samples and
//! hit-testing always work in image pixels.

use egui::{Pos2, Rect, Vec2};

/// Largest rect with the image's aspect ratio that fits centered in `available`.
pub fn fit_image(available: Rect, image_size: Vec2) -> Rect {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return Rect::from_min_size(available.min, Vec2::ZERO);
    }

    let img_aspect = image_size.x / image_size.y;
    let available_aspect = available.width() / available.height();

    let display = if img_aspect > available_aspect {
        // Image is wider - fit to width
        Vec2::new(available.width(), available.width() / img_aspect)
    } else {
        // Image is taller - fit to height
        Vec2::new(available.height() * img_aspect, available.height())
    };

    Rect::from_center_size(available.center(), display)
}

/// Convert a screen position inside `image_rect` to image pixel coordinates.
pub fn screen_to_image(pos: Pos2, image_rect: Rect, image_size: Vec2) -> (f64, f64) {
    let rel_x = (pos.x - image_rect.min.x) / image_rect.width();
    let rel_y = (pos.y - image_rect.min.y) / image_rect.height();
    (
        (rel_x * image_size.x) as f64,
        (rel_y * image_size.y) as f64,
    )
}

/// Convert image pixel coordinates to a screen position inside `image_rect`.
pub fn image_to_screen(x: f64, y: f64, image_rect: Rect, image_size: Vec2) -> Pos2 {
    Pos2::new(
        image_rect.min.x + (x as f32 / image_size.x) * image_rect.width(),
        image_rect.min.y + (y as f32 / image_size.y) * image_rect.height(),
    )
}
