// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Point labeling tool
//!
//! A desktop application for assigning consistent labels to tracked points
//! across the frames of an image sequence.

use anyhow::Result;
use pointlabel::{AppConfig, PointLabelApp};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AppConfig::load()?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 400.0])
            .with_title("Point Labeling Tool"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "pointlabel",
        options,
        Box::new(move |_cc| Ok(Box::new(PointLabelApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
