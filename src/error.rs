//! Error types for capconf
//!
//! Only the I/O edges (reading input files, loading tool configuration)
//! return these. Parsing and validation report problems as data.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for capconf operations
pub type CapconfResult<T> = Result<T, CapconfError>;

/// Main error type for capconf operations
#[derive(Error, Debug)]
pub enum CapconfError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input file does not exist
    #[error("input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// JSON input that is not a flat object of scalar values
    #[error("invalid flat configuration in {file}: {message}")]
    InvalidFlatConfig { file: PathBuf, message: String },

    /// Properties line with an empty key or no value separator
    #[error("malformed property at {file}:{line}: {content}")]
    MalformedProperty {
        file: PathBuf,
        line: usize,
        content: String,
    },

    /// Runtime context file could not be interpreted
    #[error("invalid runtime context in {file}: {message}")]
    InvalidRuntimeContext { file: PathBuf, message: String },

    /// Tool configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },
}
