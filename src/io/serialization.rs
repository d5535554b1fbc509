// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Session state serialization and deserialization.
//!
//! This module handles writing and reading the JSON state file that lets a
//! labeling session be resumed later.

use crate::error::SessionError;
use crate::models::state::SessionState;
use std::path::Path;

/// Export session state to JSON format.
pub fn export_state(state: &SessionState, path: &Path) -> Result<(), SessionError> {
    let json = serde_json::to_string_pretty(state).map_err(|source| SessionError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|e| SessionError::io(path, e))?;
    Ok(())
}

/// Import session state from JSON format.
pub fn import_state(path: &Path) -> Result<SessionState, SessionError> {
    let json = std::fs::read_to_string(path).map_err(|e| SessionError::io(path, e))?;
    let state = serde_json::from_str(&json).map_err(|source| SessionError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(state)
}
