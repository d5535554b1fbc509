// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the point labeling application.

pub mod canvas;
pub mod label_prompt;
pub mod toolbar;

/// Name of a frame as shown to the user; frames are numbered from 1 on screen.
pub fn frame_title(frame: usize) -> String {
    format!("Frame {}", frame + 1)
}
