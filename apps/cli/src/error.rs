//! # API Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in UKP                                    │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Config Error? ─── ConfigError::NoSchemaSource ────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Load Error? ───── SourceError::MissingTable ───► ApiError      │  │
//! │  │         │                                          ▲            │  │
//! │  │         ▼                                          │            │  │
//! │  │  Session Error? ── CoreError::Transition ──────────┘            │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Startup errors (config, load) end the program.                        │
//! │  Session errors are shown and the user is prompted again.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use ukp_core::{CoreError, TransitionError, ValidationError};
use ukp_schema::SourceError;

use crate::state::ConfigError;

/// Error returned from CLI commands.
///
/// ## Serialization
/// With `--json` a failing command prints:
/// ```json
/// {
///   "code": "INVALID_TRANSITION",
///   "message": "Unknown category 'Diğer', expected one of: [...]"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Configuration is invalid or incomplete
    ConfigError,

    /// The schema could not be loaded
    SchemaError,

    /// Illegal selection state-machine choice
    InvalidTransition,

    /// A field value was rejected
    ValidationError,

    /// Form or code requested before a product was chosen
    NoProduct,

    /// Reading input or writing output failed
    IoError,

    /// Anything else
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<TransitionError> for ApiError {
    fn from(err: TransitionError) -> Self {
        ApiError::new(ErrorCode::InvalidTransition, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Transition(e) => e.into(),
            CoreError::Validation(e) => e.into(),
            CoreError::NoProductSelected => {
                ApiError::new(ErrorCode::NoProduct, "Choose a product first")
            }
        }
    }
}

/// Converts schema loading errors to API errors.
impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        match &err {
            SourceError::Io { .. } | SourceError::Workbook(_) => {
                tracing::error!("Schema source unreadable: {}", err);
            }
            _ => {}
        }
        ApiError::new(ErrorCode::SchemaError, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::new(ErrorCode::IoError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use ukp_core::Stage;

    #[test]
    fn test_core_error_codes() {
        let err: ApiError = CoreError::Transition(TransitionError::wrong_stage("back", Stage::Product)).into();
        assert_eq!(err.code, ErrorCode::InvalidTransition);
        assert_eq!(err.message, "back is not allowed in stage 3 (product)");

        let err: ApiError = CoreError::NoProductSelected.into();
        assert_eq!(err.code, ErrorCode::NoProduct);
    }

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::validation("LEN is required");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"VALIDATION_ERROR","message":"LEN is required"}"#);
    }

    #[test]
    fn test_source_error_code() {
        let err: ApiError = SourceError::MissingTable {
            table: "fields".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::SchemaError);
        assert_eq!(err.to_string(), "[SchemaError] Missing table 'fields'");
    }
}
