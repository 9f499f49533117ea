//! Error types for transcript conversion.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    // Run-level errors
    #[error("Not a valid directory: {path}")]
    InvalidDirectory { path: PathBuf },

    #[error("No JSON files found in {path}")]
    NoInputFiles { path: PathBuf },

    // Per-file errors
    #[error("Malformed transcript {path}: {message}")]
    MalformedInput { path: PathBuf, message: String },

    #[error("No valid word segments found in {path}")]
    NoSpeechContent { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document error: {message}")]
    Document { message: String },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
