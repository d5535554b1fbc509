// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Image folder loading.
//!
//! This module enumerates the image sequence inside a folder, orders it by
//! the frame number embedded in each filename, and decodes individual
//! images into RGBA pixels suitable for display in egui.

use crate::error::SessionError;
use std::path::{Path, PathBuf};

/// File extensions recognized as images (compared case-insensitively).
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Decoded image pixels.
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Check whether a path has one of the recognized image extensions.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Ordering key taken from the first run of digits in a filename.
///
/// The run is compared numerically without being parsed, so runs of any
/// length are accepted: leading zeros are dropped, then shorter runs sort
/// first and equal-length runs compare digit by digit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrameNumber {
    len: usize,
    digits: String,
}

impl FrameNumber {
    /// The number's digits without leading zeros (`"0"` for zero).
    pub fn digits(&self) -> &str {
        &self.digits
    }
}

/// Extract the first run of ASCII digits from a filename as its frame number.
pub fn frame_number(file_name: &str) -> Result<FrameNumber, SessionError> {
    let run: String = file_name
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if run.is_empty() {
        return Err(SessionError::NoFrameNumber {
            file: file_name.to_string(),
        });
    }

    let trimmed = run.trim_start_matches('0');
    let digits = if trimmed.is_empty() { "0" } else { trimmed }.to_string();
    Ok(FrameNumber {
        len: digits.len(),
        digits,
    })
}

/// List the images in `folder`, ordered by frame number.
///
/// Every image file must carry a frame number; a single file without one
/// fails the whole listing. Files sharing a frame number are ordered by name.
pub fn list_images(folder: &Path) -> Result<Vec<PathBuf>, SessionError> {
    let entries = std::fs::read_dir(folder).map_err(|e| SessionError::io(folder, e))?;

    let mut keyed = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SessionError::io(folder, e))?;
        let path = entry.path();
        if !path.is_file() || !is_image_file(&path) {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let number = frame_number(&name)?;
        keyed.push((number, name, path));
    }

    keyed.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));

    Ok(keyed.into_iter().map(|(_, _, path)| path).collect())
}

/// Load an image file and convert it to RGBA pixels.
pub fn load_image(path: &Path) -> Result<LoadedImage, SessionError> {
    let img = image::open(path).map_err(|source| SessionError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = img.to_rgba8();

    Ok(LoadedImage {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}
