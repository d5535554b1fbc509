// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application settings.
//!
//! Settings are read from a YAML file named by `POINTLABEL_CONFIG`, or from
//! `pointlabel.yaml` in the working directory when present. Every field is
//! optional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "POINTLABEL_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "pointlabel.yaml";

/// User-tunable settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Half-width of the click hit box in image pixels
    pub hit_radius: f64,
    /// Initial window size
    pub window_size: [f32; 2],
    /// Radius of drawn points in screen pixels
    pub point_radius: f32,
    pub label_font_size: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hit_radius: crate::models::session::DEFAULT_HIT_RADIUS,
            window_size: [1200.0, 600.0],
            point_radius: 3.0,
            label_font_size: 12.0,
        }
    }
}

impl AppConfig {
    /// Load settings from the configured location, falling back to defaults.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(&path)
                } else {
                    log::debug!("No {} found, using default settings", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    /// Read settings from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::from_yaml(&yaml)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        if config.hit_radius.is_nan() || config.hit_radius <= 0.0 {
            anyhow::bail!("hit_radius must be positive, got {}", config.hit_radius);
        }
        Ok(config)
    }
}
