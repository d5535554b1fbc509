// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for session and file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, saving or restoring a labeling session.
///
/// Any of these aborts the triggering operation; the in-memory session is
/// left exactly as it was before the operation started.
#[derive(Error, Debug)]
pub enum SessionError {
    /// I/O failure on a specific path
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV reader or writer failure
    #[error("CSV error in {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A coordinate row that is not `frame,x,y`
    #[error("Malformed row at line {line} of {path:?}: {message}")]
    MalformedRow {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// State file could not be parsed or written
    #[error("JSON error in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Image filename carries no digits to order it by
    #[error("No frame number in image filename {file:?}")]
    NoFrameNumber { file: String },

    /// A path recorded in a state file no longer exists
    #[error("Referenced path not found: {path:?}")]
    MissingPath { path: PathBuf },

    /// State file contents disagree with the files it references
    #[error("Inconsistent session state: {message}")]
    InvalidState { message: String },

    /// Save requested before both sources were loaded
    #[error("Nothing to save: no {missing} loaded")]
    Incomplete { missing: &'static str },

    /// Image could not be decoded
    #[error("Failed to decode image {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl SessionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SessionError::Io {
            path: path.into(),
            source,
        }
    }
}
