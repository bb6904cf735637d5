//! # JSON Schema Documents
//!
//! A schema serialized as one JSON object with the four tables as arrays.
//! Row keys are the workbook headers:
//!
//! ```json
//! {
//!   "products": [{"Category1": "Rulo Besleme", "Category2": "Hafif Grup", ...}],
//!   "sections": [...],
//!   "fields":   [{"SectionKey": "OLCU", "FieldKey": "LEN", "Type": "number", "Pad": 3}],
//!   "options":  [...]
//! }
//! ```

use std::path::Path;

use serde_json::Value;
use ukp_core::SchemaTables;

use crate::error::{SourceError, SourceResult};
use crate::workbook::TABLE_NAMES;

/// Parses a JSON schema document.
pub fn read_json_str(text: &str) -> SourceResult<SchemaTables> {
    let document: Value = serde_json::from_str(text)?;

    for table in TABLE_NAMES {
        if document.get(table).is_none() {
            return Err(SourceError::MissingTable {
                table: table.to_string(),
            });
        }
    }

    Ok(serde_json::from_value(document)?)
}

/// Reads a JSON schema document from disk.
pub fn read_json_path(path: &Path) -> SourceResult<SchemaTables> {
    let text = std::fs::read_to_string(path).map_err(|e| SourceError::io(path, e))?;
    read_json_str(&text)
}

/// Serializes tables as a pretty-printed JSON schema document.
pub fn to_json_string(tables: &SchemaTables) -> SourceResult<String> {
    Ok(serde_json::to_string_pretty(tables)?)
}
