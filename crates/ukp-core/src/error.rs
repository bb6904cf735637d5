//! # Error Types
//!
//! Domain-specific error types for ukp-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ukp-core errors (this file)                                           │
//! │  ├── CoreError        - Umbrella for per-interaction failures          │
//! │  ├── SchemaError      - Broken references found when indexing tables   │
//! │  ├── TransitionError  - Illegal selection state-machine transitions    │
//! │  └── ValidationError  - Field value rejected by the form               │
//! │                                                                         │
//! │  ukp-schema errors (separate crate)                                    │
//! │  └── SourceError      - Workbook / JSON loading failures               │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the terminal user sees                    │
//! │                                                                         │
//! │  Flow: Validation/Transition → CoreError → ApiError → Terminal         │
//! │        SchemaError → SourceError → ApiError → abort startup            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown categories at encode time are NOT errors: the encoder falls back to
//! sentinel codes so that it stays a total function.

use thiserror::Error;

use crate::types::Stage;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while a session is being driven.
///
/// All of these are recoverable: the session state is left untouched and the
/// user is prompted again.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A selection transition was rejected.
    #[error("Invalid transition: {0}")]
    Transition(#[from] TransitionError),

    /// A field value was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Form or code generation was requested before a product was chosen.
    #[error("No product selected")]
    NoProductSelected,
}

// =============================================================================
// Schema Error
// =============================================================================

/// Reference errors detected while building a [`crate::SchemaStore`].
///
/// These surface as a schema load failure and are fatal to startup.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A field points at a section key that no section defines.
    #[error("Field '{field_key}' references unknown section '{section_key}'")]
    UnknownSectionKey {
        field_key: String,
        section_key: String,
    },

    /// A select/multiselect field has no options key.
    #[error("Field '{field_key}' is a {field_type} field but has no OptionsKey")]
    MissingOptionsKey {
        field_key: String,
        field_type: String,
    },

    /// A field points at an options group with no rows.
    #[error("Field '{field_key}' references unknown options group '{options_key}'")]
    UnknownOptionsKey {
        field_key: String,
        options_key: String,
    },

    /// Two products share the same (Category1, Category2, ProductCode) identity.
    #[error("Duplicate product {product_code} in {category} / {sub_category}")]
    DuplicateProduct {
        category: String,
        sub_category: String,
        product_code: String,
    },
}

// =============================================================================
// Transition Error
// =============================================================================

/// A selection transition requested with a choice outside the legal set.
///
/// ## User Workflow
/// ```text
/// Stage 1: user picks "Diğer"
///      │
///      ▼
/// "Diğer" not in the offered category set
///      │
///      ▼
/// UnknownCategory { category: "Diğer", allowed: [...] }
///      │
///      ▼
/// State unchanged, user re-prompted
/// ```
#[derive(Debug, Error)]
pub enum TransitionError {
    /// The action is not available in the current stage.
    #[error("{action} is not allowed in stage {stage}")]
    WrongStage { action: String, stage: Stage },

    #[error("Unknown category '{category}', expected one of: {allowed:?}")]
    UnknownCategory {
        category: String,
        allowed: Vec<String>,
    },

    #[error("Unknown sub-category '{sub_category}' for '{category}', expected one of: {allowed:?}")]
    UnknownSubCategory {
        category: String,
        sub_category: String,
        allowed: Vec<String>,
    },

    #[error("Product '{product_code}' is not available in {category} / {sub_category}")]
    UnknownProduct {
        category: String,
        sub_category: String,
        product_code: String,
    },
}

impl TransitionError {
    /// Creates a WrongStage error.
    pub fn wrong_stage(action: impl Into<String>, stage: Stage) -> Self {
        TransitionError::WrongStage {
            action: action.into(),
            stage,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field value validation errors.
///
/// Raised at the form boundary, before a value reaches the value map. The
/// encoder never validates.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// The value has the wrong shape for the field type.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the field's option set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// The field key is not part of the current product's form.
    #[error("Unknown field: {field}")]
    UnknownField { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_error_messages() {
        let err = TransitionError::wrong_stage("back", Stage::Product);
        assert_eq!(err.to_string(), "back is not allowed in stage 3 (product)");

        let err = TransitionError::UnknownProduct {
            category: "Rulo Besleme".to_string(),
            sub_category: "Hafif Grup".to_string(),
            product_code: "XX99".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Product 'XX99' is not available in Rulo Besleme / Hafif Grup"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "LEN".to_string(),
        };
        assert_eq!(err.to_string(), "LEN is required");

        let err = ValidationError::OutOfRange {
            field: "LEN".to_string(),
            min: 0.0,
            max: 2.5,
        };
        assert_eq!(err.to_string(), "LEN must be between 0 and 2.5");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let err: CoreError = ValidationError::UnknownField {
            field: "X".to_string(),
        }
        .into();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}
