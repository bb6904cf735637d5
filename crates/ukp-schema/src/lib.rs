//! # ukp-schema: Schema Sources for UKP
//!
//! This crate loads the product schema the configurator runs on. It reads
//! workbooks with calamine and JSON documents with serde_json, then hands the
//! tables to [`ukp_core::SchemaStore`] for reference validation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        UKP Schema Loading                               │
//! │                                                                         │
//! │  CLI startup (ConfigState → SchemaSource)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   ukp-schema (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   workbook    │    │     json      │    │     demo     │  │   │
//! │  │   │  (calamine)   │    │ (serde_json)  │    │(xlsxwriter)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ header alias  │    │ 4 arrays      │    │ seed sheets  │  │   │
//! │  │   │ cell normal.  │    │               │    │              │  │   │
//! │  │   └───────┬───────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │           └──────────┬─────────┘                               │   │
//! │  │                      ▼                                         │   │
//! │  │               source::load_schema                              │   │
//! │  └──────────────────────┬──────────────────────────────────────────┘   │
//! │                         ▼                                               │
//! │              ukp_core::SchemaStore (Arc, shared by sessions)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`source`] - [`SchemaSource`] and [`load_schema`]
//! - [`workbook`] - Sheet and cell reading
//! - [`json`] - JSON schema documents
//! - [`demo`] - The demonstration workbook
//! - [`error`] - Source error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ukp_schema::{load_schema, SchemaSource};
//!
//! let store = load_schema(&SchemaSource::from_path("data/schema.xlsx"))?;
//! println!("{:?}", store.categories());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod demo;
pub mod error;
pub mod json;
pub mod source;
pub mod workbook;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{SourceError, SourceResult};
pub use source::{load_schema, SchemaSource};

/// Schema path used when none is configured.
pub const DEFAULT_SCHEMA_PATH: &str = "data/schema.xlsx";
