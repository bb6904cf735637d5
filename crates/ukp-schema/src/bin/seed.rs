//! # Demo Schema Generator
//!
//! Writes the demonstration schema workbook for development.
//!
//! ## Usage
//! ```bash
//! # Write data/schema.xlsx (default)
//! cargo run -p ukp-schema --bin seed
//!
//! # Custom path
//! cargo run -p ukp-schema --bin seed -- --out ./my-schema.xlsx
//!
//! # JSON document instead of a workbook
//! cargo run -p ukp-schema --bin seed -- --out ./schema.json
//! ```
//!
//! The workbook has the four sheets `products`, `sections`, `fields` and
//! `options`, covering every field type and pad form.

use std::env;
use std::path::PathBuf;

use ukp_schema::demo::{demo_workbook, demo_workbook_bytes};
use ukp_schema::json::to_json_string;
use ukp_schema::{load_schema, SchemaSource, DEFAULT_SCHEMA_PATH};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut out = PathBuf::from(DEFAULT_SCHEMA_PATH);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    out = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("UKP Demo Schema Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -o, --out <PATH>   Output file, .xlsx or .json (default: {DEFAULT_SCHEMA_PATH})");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 UKP Demo Schema Generator");
    println!("============================");
    println!("Output: {}", out.display());
    println!();

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    // Validate before writing
    let store = load_schema(&SchemaSource::WorkbookBytes(demo_workbook_bytes()?))?;
    println!("✓ Demo schema validated");

    match SchemaSource::from_path(&out) {
        SchemaSource::Json(_) => std::fs::write(&out, to_json_string(store.tables())?)?,
        _ => demo_workbook()?.save(&out)?,
    }

    let tables = store.tables();
    println!("✓ Wrote {}", out.display());
    println!();
    println!("  Products: {}", tables.products.len());
    println!("  Sections: {}", tables.sections.len());
    println!("  Fields:   {}", tables.fields.len());
    println!("  Options:  {}", tables.options.len());

    Ok(())
}
