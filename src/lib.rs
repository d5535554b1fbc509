// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Point labeling tool.
//!
//! Assigns consistent numeric labels to point coordinates across a sequence
//! of images, so the same physical marker keeps the same label from frame
//! to frame. Progress can be saved and resumed, and labeled coordinates are
//! exported to CSV.

pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod ui;
pub mod util;

pub use app::PointLabelApp;
pub use config::AppConfig;
pub use error::SessionError;
pub use models::session::Session;
