//! # ukp-core: Pure Logic for the Long-Code Configurator
//!
//! This crate is the **heart** of UKP. It walks a data-defined product schema
//! and turns a user's choices into a deterministic long code. It has zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          UKP Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation (apps/cli)                         │   │
//! │  │    Category ──► Sub-category ──► Product + Form ──► Long code   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ ukp-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  schema   │  │ selection │  │   form    │  │  encoder  │  │   │
//! │  │   │SchemaStore│─►│ Selection │─►│FormEngine │─►│ long code │  │   │
//! │  │   │  lookups  │  │   State   │  │ defaults  │  │  tokens   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO TERMINAL • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ukp-schema (Schema Sources)                      │   │
//! │  │           xlsx / ods workbooks, JSON schema documents           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Schema row types, field types and values
//! - [`schema`] - The read-only [`SchemaStore`]
//! - [`selection`] - The three-stage [`SelectionState`] machine
//! - [`form`] - [`FormEngine`]: sections, fields, options and defaults
//! - [`encoder`] - The long-code encoder
//! - [`validation`] - Required / bounds / option checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use ukp_core::encoder::{encode_long_code, pad_number};
//! use ukp_core::{FieldDef, FieldType, FieldValue, FieldValues, PadSpec};
//!
//! let mut color = FieldDef::new("GENEL", "COLOR", "Renk", FieldType::Text);
//! color.encode_key = Some("CLR".to_string());
//! let mut length = FieldDef::new("OLCU", "LEN", "Uzunluk", FieldType::Number);
//! length.pad = PadSpec::Width(3);
//!
//! let mut values = FieldValues::new();
//! values.insert("COLOR".to_string(), FieldValue::text("kirmizi"));
//! values.insert("LEN".to_string(), FieldValue::Number(7.0));
//!
//! let code = encode_long_code("Rulo Besleme", "Hafif Grup", "RB01", &values, &[color, length]);
//! assert_eq!(code, "UKP-V1-S1RB-S2HG-PRDRB01-CLRKIRMIZI-LEN007");
//! assert_eq!(pad_number(7.0, &PadSpec::parse("5.2")), "00700");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod encoder;
pub mod error;
pub mod form;
pub mod schema;
pub mod selection;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, SchemaError, TransitionError, ValidationError};
pub use form::{FieldSpec, FormEngine, NumberBounds, SectionView};
pub use schema::{SchemaStore, SchemaTables};
pub use selection::SelectionState;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// First token of every long code.
pub const SYSTEM_TAG: &str = "UKP";

/// Second token of every long code. Bump when the token grammar changes.
pub const VERSION_TAG: &str = "V1";

/// Top-level categories offered in stage 1, in display order.
///
/// Categories present in the product table but missing here are never offered.
pub const CATEGORY_ORDER: [&str; 3] = ["Rulo Besleme", "Plaka Besleme", "Tamamlayıcı Ürünler"];

/// Upper bound of a number field without a Max.
pub const NUMBER_MAX_SENTINEL: f64 = 1e9;

/// Largest width or decimal count a pad spec may request.
pub const MAX_PAD_WIDTH: usize = 64;
