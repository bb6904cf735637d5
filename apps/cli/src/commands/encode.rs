//! # Encode Command
//!
//! One-shot, non-interactive long code generation.
//!
//! ```text
//! --category ──► choose_category ─┐
//! --sub ───────► choose_sub_category ─┐
//! --product ───► choose_product (defaults installed)
//! --set K=V ───► FieldSpec::parse_input ──► SessionState::set_value   (repeatable)
//!                                                  │
//!                                                  ▼
//!                                            generate()
//! ```
//!
//! Multiselect values are comma separated: `--set OPSIYON=SNS,FRN`. An empty
//! value unsets the field: `--set NOT=`.

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::SchemaState;

/// Arguments of `ukp encode`.
#[derive(Debug, Clone, Default)]
pub struct EncodeRequest {
    pub category: String,
    pub sub_category: String,
    pub product: String,
    /// Raw `KEY=VALUE` assignments, applied in order.
    pub assignments: Vec<String>,
}

/// Result of `ukp encode`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeResult {
    pub code: String,
    pub product: String,
}

/// Splits `KEY=VALUE` at the first `=`.
pub fn parse_assignment(raw: &str) -> Result<(&str, &str), ApiError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| ApiError::validation(format!("Expected KEY=VALUE, got '{raw}'")))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(ApiError::validation(format!("Missing field key in '{raw}'")));
    }
    Ok((key, value))
}

/// Drives a fresh session through all three stages and encodes the result.
pub fn encode_once(schema: &SchemaState, request: &EncodeRequest) -> Result<EncodeResult, ApiError> {
    let mut session = schema.session();
    session.choose(&request.category)?;
    session.choose(&request.sub_category)?;
    session.choose(&request.product)?;

    for raw in &request.assignments {
        let (key, value) = parse_assignment(raw)?;
        if value.trim().is_empty() {
            session.clear(key)?;
        } else {
            session.set_input(key, value)?;
        }
        debug!(field = key, "Assignment applied");
    }

    Ok(EncodeResult {
        code: session.generate()?,
        product: request.product.clone(),
    })
}
