use ukp_schema::demo::demo_workbook_bytes;
use ukp_schema::SchemaSource;

use crate::state::SchemaState;

/// The demo workbook, loaded from memory.
pub fn demo_schema() -> SchemaState {
    let bytes = demo_workbook_bytes().expect("demo workbook");
    SchemaState::load(SchemaSource::WorkbookBytes(bytes)).expect("demo schema loads")
}
