//! # Schema Sources
//!
//! Where a schema comes from, and the single entry point that turns any
//! source into a validated [`SchemaStore`].
//!
//! ```text
//! SchemaSource::Workbook(path) ──┐
//! SchemaSource::WorkbookBytes ───┼──► SchemaTables ──► SchemaStore::new ──► SchemaStore
//! SchemaSource::Json(path) ──────┘       (rows)        (references)         (indexed)
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;
use ukp_core::{SchemaStore, SchemaTables};

use crate::error::SourceResult;
use crate::json::read_json_path;
use crate::workbook::{read_workbook_bytes, read_workbook_path};

/// A schema source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// A workbook file (`.xlsx`, `.xlsm`, `.xls`, `.ods`).
    Workbook(PathBuf),
    /// An in-memory workbook, e.g. an upload.
    WorkbookBytes(Vec<u8>),
    /// A JSON schema document.
    Json(PathBuf),
}

impl SchemaSource {
    /// Picks the source kind from the file extension: `.json` is a JSON
    /// document, anything else a workbook.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            SchemaSource::Json(path.to_path_buf())
        } else {
            SchemaSource::Workbook(path.to_path_buf())
        }
    }

    /// Reads the raw tables without reference validation.
    pub fn read_tables(&self) -> SourceResult<SchemaTables> {
        match self {
            SchemaSource::Workbook(path) => read_workbook_path(path),
            SchemaSource::WorkbookBytes(bytes) => read_workbook_bytes(bytes.clone()),
            SchemaSource::Json(path) => read_json_path(path),
        }
    }
}

impl fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaSource::Workbook(path) => write!(f, "workbook {}", path.display()),
            SchemaSource::WorkbookBytes(bytes) => write!(f, "uploaded workbook ({} bytes)", bytes.len()),
            SchemaSource::Json(path) => write!(f, "JSON document {}", path.display()),
        }
    }
}

/// Loads and validates a schema.
///
/// ## Errors
/// Any [`crate::SourceError`]: unreadable source, missing table or column,
/// unreadable cell, or unresolved reference.
pub fn load_schema(source: &SchemaSource) -> SourceResult<SchemaStore> {
    let tables = source.read_tables()?;
    let counts = (
        tables.products.len(),
        tables.sections.len(),
        tables.fields.len(),
        tables.options.len(),
    );

    let store = SchemaStore::new(tables)?;

    info!(
        source = %source,
        products = counts.0,
        sections = counts.1,
        fields = counts.2,
        options = counts.3,
        "Schema loaded"
    );

    Ok(store)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{demo_workbook, demo_workbook_bytes};
    use crate::error::SourceError;
    use crate::json::to_json_string;
    use ukp_core::{FieldValue, SchemaError, SelectionState};

    fn demo_store() -> SchemaStore {
        load_schema(&SchemaSource::WorkbookBytes(demo_workbook_bytes().unwrap())).unwrap()
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            SchemaSource::from_path("data/schema.JSON"),
            SchemaSource::Json(PathBuf::from("data/schema.JSON"))
        );
        assert_eq!(
            SchemaSource::from_path("data/schema.xlsx"),
            SchemaSource::Workbook(PathBuf::from("data/schema.xlsx"))
        );
    }

    #[test]
    fn test_demo_workbook_loads() {
        let store = demo_store();
        assert_eq!(
            store.categories(),
            vec!["Rulo Besleme", "Plaka Besleme", "Tamamlayıcı Ürünler"]
        );
        assert_eq!(store.sub_categories("Plaka Besleme"), vec!["Destacker", "Transfer"]);
        let codes: Vec<&str> = store
            .options_for("VOLTAJ")
            .iter()
            .map(|o| o.value_code.as_str())
            .collect();
        assert_eq!(codes, vec!["400", "230"]);
    }

    #[test]
    fn test_demo_workbook_generates_code_from_defaults() {
        let store = demo_store();
        let state = SelectionState::new()
            .choose_category(&store, "Rulo Besleme")
            .unwrap()
            .choose_sub_category(&store, "Hafif Grup")
            .unwrap()
            .choose_product(&store, "RB-SF100")
            .unwrap();
        assert_eq!(
            state.generate(&store).unwrap(),
            "UKP-V1-S1RB-S2HG-PRDRB-SF100-CLRRAL7035-V400-OPTSNS-W0300-T020"
        );

        let state = state
            .with_value(&store, "OPSIYON", FieldValue::Multi(vec!["PLC".into(), "FRN".into()]))
            .unwrap()
            .with_value(&store, "KALINLIK", FieldValue::Number(1.5))
            .unwrap();
        assert_eq!(
            state.generate(&store).unwrap(),
            "UKP-V1-S1RB-S2HG-PRDRB-SF100-CLRRAL7035-V400-OPTPLC.FRN-W0300-T015"
        );
    }

    #[test]
    fn test_workbook_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.xlsx");
        demo_workbook().unwrap().save(&path).unwrap();

        let store = load_schema(&SchemaSource::from_path(&path)).unwrap();
        assert_eq!(store.tables().products.len(), 6);
    }

    #[test]
    fn test_json_file_matches_workbook() {
        let store = demo_store();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, to_json_string(store.tables()).unwrap()).unwrap();

        let from_json = load_schema(&SchemaSource::from_path(&path)).unwrap();
        assert_eq!(from_json.tables(), store.tables());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_schema(&SchemaSource::Workbook(dir.path().join("nope.xlsx"))).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn test_unresolved_reference_is_schema_error() {
        let mut tables = demo_store().tables().clone();
        tables.options.retain(|o| o.options_key != "TANK");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, to_json_string(&tables).unwrap()).unwrap();

        let err = load_schema(&SchemaSource::Json(path)).unwrap_err();
        assert!(matches!(
            err,
            SourceError::Schema(SchemaError::UnknownOptionsKey { .. })
        ));
    }
}
