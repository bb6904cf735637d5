//! # Validation Module
//!
//! Field value checks applied by the form before a value is stored.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (CLI prompts)                                   │
//! │  ├── Parse raw input into a FieldValue (FieldSpec::parse_input)        │
//! │  └── Re-prompt on error                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: FormEngine::set_value                                        │
//! │  └── THIS MODULE: shape, bounds and option membership                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Code generation                                              │
//! │  └── Required fields must be non-empty                                 │
//! │                                                                         │
//! │  The encoder itself never validates: it encodes whatever it is given.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::form::NumberBounds;
use crate::types::{FieldValue, OptionItem};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn invalid(field: &str, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn allowed_codes(options: &[OptionItem]) -> Vec<String> {
    options.iter().map(|o| o.value_code.clone()).collect()
}

// =============================================================================
// Numbers
// =============================================================================

/// Validates a number field value against its bounds.
///
/// ## Rules
/// - Must be a finite number
/// - Must lie within `[min, max]` (inclusive)
///
/// ## Example
/// ```rust
/// use ukp_core::validation::validate_number;
/// use ukp_core::NumberBounds;
///
/// let bounds = NumberBounds { min: 0.0, max: 10.0, step: 1.0 };
/// assert!(validate_number("LEN", 7.0, &bounds).is_ok());
/// assert!(validate_number("LEN", 11.0, &bounds).is_err());
/// ```
pub fn validate_number(field: &str, value: f64, bounds: &NumberBounds) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(invalid(field, "must be a finite number"));
    }

    if !bounds.contains(value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: bounds.min,
            max: bounds.max,
        });
    }

    Ok(())
}

// =============================================================================
// Options
// =============================================================================

/// Validates a select value: it must be one of the option codes.
pub fn validate_choice(field: &str, code: &str, options: &[OptionItem]) -> ValidationResult<()> {
    if options.iter().any(|o| o.value_code == code) {
        return Ok(());
    }

    Err(ValidationError::NotAllowed {
        field: field.to_string(),
        allowed: allowed_codes(options),
    })
}

/// Validates a multiselect value.
///
/// ## Rules
/// - Every code must be an option code
/// - No code may appear twice
pub fn validate_choices(field: &str, codes: &[String], options: &[OptionItem]) -> ValidationResult<()> {
    for (i, code) in codes.iter().enumerate() {
        validate_choice(field, code, options)?;
        if codes[..i].contains(code) {
            return Err(invalid(field, format!("'{code}' selected more than once")));
        }
    }

    Ok(())
}

// =============================================================================
// Required
// =============================================================================

/// Validates that a required field has a non-empty value.
///
/// A number 0 counts as empty, matching the encoder's omission rule.
pub fn validate_required(field: &str, value: Option<&FieldValue>) -> ValidationResult<()> {
    match value {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(ValidationError::Required {
            field: field.to_string(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
