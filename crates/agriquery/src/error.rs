//! Error types for the AgriQuery library.

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::{Column, DatasetKind};

/// Main error type for AgriQuery operations.
#[derive(Debug, Error)]
pub enum AgriError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Remote request failed (network error, timeout, non-2xx status).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Payload or file contained no usable rows.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// No data tier (remote, cache, local file) produced the dataset.
    #[error("{dataset} data unavailable: {reason}")]
    DataUnavailable { dataset: DatasetKind, reason: String },

    /// A column required by the query has no valid alias in the loaded table.
    #[error("{dataset} table has no '{column}' column")]
    Schema { dataset: DatasetKind, column: Column },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AgriError {
    /// Wrap an IO error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AgriError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for AgriQuery operations.
pub type Result<T> = std::result::Result<T, AgriError>;
