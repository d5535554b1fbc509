// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for images, coordinate files and session state.

pub mod coordinates;
pub mod media;
pub mod serialization;
