// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Point samples and label decisions.
//!
//! A sample is one recorded `(frame, x, y)` point from the coordinate file.
//! Samples are identified by their position in the loaded list, never by
//! their coordinate values.

/// One coordinate sample in image pixel units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub frame: usize,
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(frame: usize, x: f64, y: f64) -> Self {
        Self { frame, x, y }
    }

    /// Check whether `(px, py)` lies inside this sample's hit box.
    ///
    /// Both axes are tested independently and strictly, so the box is a
    /// square of half-width `radius`, not a circle.
    pub fn within(&self, px: f64, py: f64, radius: f64) -> bool {
        (self.x - px).abs() < radius && (self.y - py).abs() < radius
    }
}

/// A sample as it should be drawn on one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramePoint {
    /// Position in the session's sample list
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub label: Option<u32>,
}

/// What the user chose in the label prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelDecision {
    UseExisting(u32),
    CreateNew,
    Cancelled,
}
