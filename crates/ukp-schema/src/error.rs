//! # Schema Source Error Types
//!
//! Error types for loading a schema from a workbook or JSON document.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  calamine::Error / serde_json::Error / std::io::Error                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SourceError (this module) ← Adds table / column / row context         │
//! │       ▲                                                                 │
//! │       │  SchemaStore::new                                               │
//! │  ukp_core::SchemaError                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in CLI app) ← Reported, startup aborted                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;
use ukp_core::SchemaError;

/// Schema loading errors.
///
/// Every variant is fatal to startup: a session never runs on a partial schema.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The workbook could not be opened or a sheet could not be read.
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// The JSON document is malformed.
    #[error("Invalid JSON schema: {0}")]
    Json(#[from] serde_json::Error),

    /// One of the four required tables is absent.
    ///
    /// ## When This Occurs
    /// - Workbook without a `products`, `sections`, `fields` or `options` sheet
    #[error("Missing table '{table}'")]
    MissingTable { table: String },

    /// A required column header is absent from a sheet.
    #[error("Table '{table}' is missing column '{column}'")]
    MissingColumn { table: String, column: String },

    /// A row holds a cell that cannot be read as its column's type.
    ///
    /// `row` is the 1-based sheet row, header included.
    #[error("Table '{table}' row {row}: {message}")]
    InvalidRow {
        table: String,
        row: usize,
        message: String,
    },

    /// The tables were read but their references do not resolve.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl SourceError {
    /// Creates an Io error for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SourceError::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an InvalidRow error.
    pub fn invalid_row(table: &str, row: usize, message: impl Into<String>) -> Self {
        SourceError::InvalidRow {
            table: table.to_string(),
            row,
            message: message.into(),
        }
    }
}

/// Result type for schema source operations.
pub type SourceResult<T> = Result<T, SourceError>;
