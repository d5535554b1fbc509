// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for a point labeling session.

pub mod sample;
pub mod session;
pub mod state;
