// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Saved session state.
//!
//! The state file records where the images and coordinates came from plus
//! the labeling progress. Images and samples themselves are not embedded;
//! they are reloaded from the recorded paths on restore.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete session state for serialization.
///
/// Every field is required when reading. `labels` is keyed by sample index,
/// which JSON stores as string keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub image_folder: String,
    pub coordinate_file: String,
    pub current_image_index: usize,
    pub labels: BTreeMap<usize, u32>,
    pub next_label: u32,
    pub labeled_images: Vec<usize>,
}
