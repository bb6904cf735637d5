//! # Workbook Reader
//!
//! Reads the four schema sheets from an xlsx / xlsm / xls / ods workbook.
//!
//! ## Row Conversion
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Sheet "products"                                                      │
//! │  ┌───────────┬───────────┬──────────┬──────────┬────────────┐          │
//! │  │ Kategori1 │ Kategori2 │ UrunAdi  │ UrunKodu │ MakineTipi │ header   │
//! │  ├───────────┼───────────┼──────────┼──────────┼────────────┤          │
//! │  │ Rulo ...  │ Hafif ... │ Servo    │ 101.0    │ SRV        │ row 2    │
//! │  └───────────┴───────────┴──────────┴──────────┴────────────┘          │
//! │        │ header aliases → Category1, Category2, ProductName, ...      │
//! │        │ cell normalization → "101"                                   │
//! │        ▼                                                               │
//! │  {"Category1": "Rulo ...", ..., "ProductCode": "101", ...}             │
//! │        │ serde                                                         │
//! │        ▼                                                               │
//! │  ukp_core::Product                                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows whose cells are all blank are skipped. Columns that are not listed
//! for a table are ignored.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};
use tracing::debug;
use ukp_core::encoder::plain_number;
use ukp_core::SchemaTables;

use crate::error::{SourceError, SourceResult};

// =============================================================================
// Column Layout
// =============================================================================

/// Sheet names of the four tables.
pub const TABLE_NAMES: [&str; 4] = ["products", "sections", "fields", "options"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    /// Normalized cell text.
    Text,
    /// Whole number (Order).
    Integer,
    /// Any number (Min, Max, Step).
    Decimal,
    /// Boolean flag (Required).
    Flag,
    /// Passed through as number, bool or text (Default, Pad).
    Raw,
}

#[derive(Debug, Clone, Copy)]
struct Column {
    name: &'static str,
    kind: CellKind,
    required: bool,
}

const fn column(name: &'static str, kind: CellKind, required: bool) -> Column {
    Column {
        name,
        kind,
        required,
    }
}

const PRODUCT_COLUMNS: &[Column] = &[
    column("Category1", CellKind::Text, true),
    column("Category2", CellKind::Text, true),
    column("ProductName", CellKind::Text, true),
    column("ProductCode", CellKind::Text, true),
    column("MachineType", CellKind::Text, true),
];

const SECTION_COLUMNS: &[Column] = &[
    column("Category1", CellKind::Text, true),
    column("Category2", CellKind::Text, true),
    column("MachineType", CellKind::Text, true),
    column("SectionKey", CellKind::Text, true),
    column("SectionLabel", CellKind::Text, true),
    column("Order", CellKind::Integer, false),
];

const FIELD_COLUMNS: &[Column] = &[
    column("SectionKey", CellKind::Text, true),
    column("FieldKey", CellKind::Text, true),
    column("FieldLabel", CellKind::Text, true),
    column("Type", CellKind::Text, false),
    column("Required", CellKind::Flag, false),
    column("Default", CellKind::Raw, false),
    column("EncodeKey", CellKind::Text, false),
    column("OptionsKey", CellKind::Text, false),
    column("Min", CellKind::Decimal, false),
    column("Max", CellKind::Decimal, false),
    column("Step", CellKind::Decimal, false),
    column("Pad", CellKind::Raw, false),
    column("Order", CellKind::Integer, false),
];

const OPTION_COLUMNS: &[Column] = &[
    column("OptionsKey", CellKind::Text, true),
    column("ValueCode", CellKind::Text, true),
    column("ValueLabel", CellKind::Text, true),
    column("Order", CellKind::Integer, false),
];

/// Alternative header → canonical header.
///
/// Legacy workbooks use Turkish names for the product identity columns.
pub const HEADER_ALIASES: &[(&str, &str)] = &[
    ("Kategori1", "Category1"),
    ("Kategori2", "Category2"),
    ("UrunAdi", "ProductName"),
    ("UrunKodu", "ProductCode"),
    ("MakineTipi", "MachineType"),
];

fn header_matches(header: &str, canonical: &str) -> bool {
    let header = header.trim();
    header.eq_ignore_ascii_case(canonical)
        || HEADER_ALIASES
            .iter()
            .any(|(alias, target)| *target == canonical && header.eq_ignore_ascii_case(alias))
}

// =============================================================================
// Cell Normalization
// =============================================================================

/// Text of a cell, `None` when blank.
///
/// Integral floats lose their fractional part (`10.0` → `"10"`).
pub fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Data::Float(f) => Some(plain_number(*f)),
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Numeric value of a cell. Text is parsed, accepting `,` as decimal separator.
pub fn cell_number(cell: &Data) -> Result<Option<f64>, String> {
    match cell {
        Data::Empty => Ok(None),
        Data::Int(i) => Ok(Some(*i as f64)),
        Data::Float(f) => Ok(Some(*f)),
        Data::String(s) if s.trim().is_empty() => Ok(None),
        Data::String(s) => s
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("'{}' is not a number", s.trim())),
        other => Err(format!("'{other}' is not a number")),
    }
}

/// Boolean value of a cell.
///
/// ```text
/// true    true, 1, yes, evet, x, y, e   (any case)
/// false   false, 0, no, hayır, n, h
/// ```
pub fn cell_flag(cell: &Data) -> Result<Option<bool>, String> {
    match cell {
        Data::Empty => Ok(None),
        Data::Bool(b) => Ok(Some(*b)),
        Data::Int(i) => Ok(Some(*i != 0)),
        Data::Float(f) => Ok(Some(*f != 0.0)),
        Data::String(s) => match s.trim().to_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" | "yes" | "y" | "evet" | "e" | "x" => Ok(Some(true)),
            "false" | "0" | "no" | "n" | "hayır" | "hayir" | "h" => Ok(Some(false)),
            _ => Err(format!("'{}' is not a yes/no value", s.trim())),
        },
        other => Err(format!("'{other}' is not a yes/no value")),
    }
}

fn number_value(n: f64) -> Result<Value, String> {
    Number::from_f64(n)
        .map(Value::Number)
        .ok_or_else(|| format!("'{n}' is not a finite number"))
}

/// JSON value of a cell for a column; `Null` means "leave the key out".
fn cell_value(column: &Column, cell: &Data) -> Result<Value, String> {
    match column.kind {
        CellKind::Text => Ok(match cell_text(cell) {
            Some(text) => Value::String(text),
            None if column.required => Value::String(String::new()),
            None => Value::Null,
        }),
        CellKind::Integer => match cell_number(cell)? {
            None => Ok(Value::Null),
            Some(n) if n.fract() == 0.0 && n.is_finite() => Ok(Value::from(n as i64)),
            Some(n) => Err(format!("'{n}' is not a whole number")),
        },
        CellKind::Decimal => match cell_number(cell)? {
            None => Ok(Value::Null),
            Some(n) => number_value(n),
        },
        CellKind::Flag => Ok(cell_flag(cell)?.map(Value::Bool).unwrap_or(Value::Null)),
        CellKind::Raw => match cell {
            Data::Int(i) => Ok(Value::from(*i)),
            Data::Float(f) => number_value(*f),
            Data::Bool(b) => Ok(Value::Bool(*b)),
            other => Ok(cell_text(other).map(Value::String).unwrap_or(Value::Null)),
        },
    }
}

// =============================================================================
// Table Reading
// =============================================================================

fn read_table<T: DeserializeOwned>(
    table: &str,
    range: &Range<Data>,
    columns: &[Column],
) -> SourceResult<Vec<T>> {
    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|cells| cells.iter().map(|c| cell_text(c).unwrap_or_default()).collect())
        .unwrap_or_default();

    let mut layout = Vec::with_capacity(columns.len());
    for column in columns {
        let position = header.iter().position(|h| header_matches(h, column.name));
        if position.is_none() && column.required {
            return Err(SourceError::MissingColumn {
                table: table.to_string(),
                column: column.name.to_string(),
            });
        }
        layout.push((column, position));
    }

    // 1-based sheet row of the header
    let first_row = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);
    let empty = Data::Empty;
    let mut items = Vec::new();

    for (offset, cells) in rows.enumerate() {
        let row_number = first_row + offset + 1;
        if cells.iter().all(|c| cell_text(c).is_none()) {
            continue;
        }

        let mut object = Map::new();
        for &(column, position) in &layout {
            let cell = position.and_then(|i| cells.get(i)).unwrap_or(&empty);
            let value = cell_value(column, cell).map_err(|message| {
                SourceError::invalid_row(table, row_number, format!("{}: {message}", column.name))
            })?;
            if !value.is_null() {
                object.insert(column.name.to_string(), value);
            }
        }

        let item = serde_json::from_value(Value::Object(object))
            .map_err(|e| SourceError::invalid_row(table, row_number, e.to_string()))?;
        items.push(item);
    }

    debug!(table, rows = items.len(), "Sheet read");
    Ok(items)
}

fn sheet_range<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    table: &str,
) -> SourceResult<Range<Data>> {
    let name = workbook
        .sheet_names()
        .into_iter()
        .find(|name| name.trim().eq_ignore_ascii_case(table))
        .ok_or_else(|| SourceError::MissingTable {
            table: table.to_string(),
        })?;
    Ok(workbook.worksheet_range(&name)?)
}

/// Reads all four tables from an open workbook.
pub fn read_sheets<RS: Read + Seek>(workbook: &mut Sheets<RS>) -> SourceResult<SchemaTables> {
    // Every sheet must exist before any row is parsed
    let [products, sections, fields, options] = TABLE_NAMES;
    let ranges = [
        sheet_range(workbook, products)?,
        sheet_range(workbook, sections)?,
        sheet_range(workbook, fields)?,
        sheet_range(workbook, options)?,
    ];

    Ok(SchemaTables {
        products: read_table(products, &ranges[0], PRODUCT_COLUMNS)?,
        sections: read_table(sections, &ranges[1], SECTION_COLUMNS)?,
        fields: read_table(fields, &ranges[2], FIELD_COLUMNS)?,
        options: read_table(options, &ranges[3], OPTION_COLUMNS)?,
    })
}

/// Reads a workbook file. The format follows the file extension.
pub fn read_workbook_path(path: &Path) -> SourceResult<SchemaTables> {
    std::fs::metadata(path).map_err(|e| SourceError::io(path, e))?;
    let mut workbook = open_workbook_auto(path)?;
    read_sheets(&mut workbook)
}

/// Reads an in-memory workbook, sniffing the format from its bytes.
pub fn read_workbook_bytes(bytes: Vec<u8>) -> SourceResult<SchemaTables> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    read_sheets(&mut workbook)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use ukp_core::{FieldType, PadSpec};

    fn workbook_bytes(sheets: &[(&str, &[&[&str]])]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        for (name, rows) in sheets {
            let sheet = workbook.add_worksheet();
            sheet.set_name(*name).unwrap();
            for (r, row) in rows.iter().enumerate() {
                for (c, value) in row.iter().enumerate() {
                    if value.is_empty() {
                        continue;
                    }
                    match value.parse::<f64>() {
                        Ok(n) => sheet.write_number(r as u32, c as u16, n).unwrap(),
                        Err(_) => sheet.write_string(r as u32, c as u16, *value).unwrap(),
                    };
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    const PRODUCTS: &[&[&str]] = &[
        &["Kategori1", "Kategori2", "UrunAdi", "UrunKodu", "MakineTipi", "Notlar"],
        &["Rulo Besleme", "Hafif Grup", "Servo", "101", "SRV", "ignored"],
        &["", "", "", "", "", ""],
        &["Plaka Besleme", "Destacker", "Destacker", "PB01", "DST", ""],
    ];
    const SECTIONS: &[&[&str]] = &[
        &["Kategori1", "Kategori2", "MakineTipi", "SectionKey", "SectionLabel", "Order"],
        &["Rulo Besleme", "Hafif Grup", "SRV", "GENEL", "Genel", "1"],
    ];
    const FIELDS: &[&[&str]] = &[
        &[
            "SectionKey", "FieldKey", "FieldLabel", "Type", "Required", "Default", "EncodeKey",
            "OptionsKey", "Min", "Max", "Step", "Pad", "Order",
        ],
        &["GENEL", "LEN", "Uzunluk", "number", "evet", "12", "", "", "0", "2,5", "", "3", ""],
        &["GENEL", "MAT", "Malzeme", "Select", "0", "", "M", "MAT", "", "", "", "", "2"],
        &["GENEL", "NOTE", "Not", "", "", "", "", "", "", "", "", "5.2", ""],
    ];
    const OPTIONS: &[&[&str]] = &[
        &["OptionsKey", "ValueCode", "ValueLabel", "Order"],
        &["MAT", "400", "Çelik", "2"],
        &["MAT", "AL", "Alüminyum", "1"],
    ];

    fn full_workbook() -> Vec<u8> {
        workbook_bytes(&[
            ("products", PRODUCTS),
            ("sections", SECTIONS),
            ("fields", FIELDS),
            ("options", OPTIONS),
        ])
    }

    #[test]
    fn test_reads_all_tables() {
        let tables = read_workbook_bytes(full_workbook()).unwrap();
        assert_eq!(tables.products.len(), 2);
        assert_eq!(tables.sections.len(), 1);
        assert_eq!(tables.fields.len(), 3);
        assert_eq!(tables.options.len(), 2);
    }

    #[test]
    fn test_turkish_headers_and_number_normalization() {
        let tables = read_workbook_bytes(full_workbook()).unwrap();
        let product = &tables.products[0];
        assert_eq!(product.category1, "Rulo Besleme");
        assert_eq!(product.product_code, "101");
        assert_eq!(product.machine_type, "SRV");
        assert_eq!(tables.options[0].value_code, "400");
        assert_eq!(tables.sections[0].order, Some(1));
    }

    #[test]
    fn test_field_cells() {
        let tables = read_workbook_bytes(full_workbook()).unwrap();
        let len = &tables.fields[0];
        assert_eq!(len.field_type, FieldType::Number);
        assert!(len.required);
        assert_eq!(len.default.as_deref(), Some("12"));
        assert_eq!(len.max, Some(2.5));
        assert_eq!(len.pad, PadSpec::Width(3));
        assert_eq!(len.encode_key, None);

        let mat = &tables.fields[1];
        assert_eq!(mat.field_type, FieldType::Select);
        assert!(!mat.required);
        assert_eq!(mat.options_key.as_deref(), Some("MAT"));
        assert_eq!(mat.order, Some(2));

        // A number cell is a plain width, fraction dropped
        let note = &tables.fields[2];
        assert_eq!(note.field_type, FieldType::Text);
        assert_eq!(note.pad, PadSpec::Width(5));
    }

    #[test]
    fn test_missing_sheet() {
        let bytes = workbook_bytes(&[("products", PRODUCTS), ("sections", SECTIONS)]);
        let err = read_workbook_bytes(bytes).unwrap_err();
        assert!(matches!(err, SourceError::MissingTable { ref table } if table == "fields"));
    }

    #[test]
    fn test_missing_column() {
        let products: &[&[&str]] = &[
            &["Kategori1", "Kategori2", "UrunAdi", "MakineTipi"],
            &["Rulo Besleme", "Hafif Grup", "Servo", "SRV"],
        ];
        let bytes = workbook_bytes(&[
            ("products", products),
            ("sections", SECTIONS),
            ("fields", FIELDS),
            ("options", OPTIONS),
        ]);
        let err = read_workbook_bytes(bytes).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Table 'products' is missing column 'ProductCode'"
        );
    }

    #[test]
    fn test_invalid_cell_reports_row() {
        let options: &[&[&str]] = &[
            &["OptionsKey", "ValueCode", "ValueLabel", "Order"],
            &["MAT", "AL", "Alüminyum", "first"],
        ];
        let bytes = workbook_bytes(&[
            ("products", PRODUCTS),
            ("sections", SECTIONS),
            ("fields", FIELDS),
            ("options", options),
        ]);
        let err = read_workbook_bytes(bytes).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Table 'options' row 2: Order: 'first' is not a number"
        );
    }

    #[test]
    fn test_cell_flag() {
        assert_eq!(cell_flag(&Data::String("Evet".into())), Ok(Some(true)));
        assert_eq!(cell_flag(&Data::String("HAYIR".into())), Ok(Some(false)));
        assert_eq!(cell_flag(&Data::String("x".into())), Ok(Some(true)));
        assert_eq!(cell_flag(&Data::Float(1.0)), Ok(Some(true)));
        assert_eq!(cell_flag(&Data::Empty), Ok(None));
        assert!(cell_flag(&Data::String("belki".into())).is_err());
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Float(10.0)).as_deref(), Some("10"));
        assert_eq!(cell_text(&Data::Float(2.5)).as_deref(), Some("2.5"));
        assert_eq!(cell_text(&Data::String("  ".into())), None);
        assert_eq!(cell_text(&Data::Empty), None);
    }

    #[test]
    fn test_header_matches() {
        assert!(header_matches(" urunkodu ", "ProductCode"));
        assert!(header_matches("PRODUCTCODE", "ProductCode"));
        assert!(!header_matches("UrunKodu", "ProductName"));
    }
}
