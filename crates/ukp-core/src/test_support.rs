//! Shared schema fixture for unit tests.
//!
//! ```text
//! Rulo Besleme / Hafif Grup   RB01 (SRV)  sections OLCU(1), GENEL(2)
//!                             RB02 (PNM)  section  GENEL(1)
//! Rulo Besleme / Ağır Grup    RB10 (SRV)  no sections
//! Rulo Besleme / (blank)      RB99        never offered
//! Plaka Besleme / Destacker   PB01 (DST)  section  OLCU
//! Diğer / Test                DG01        category never offered
//! EXTRA                       section matching no product
//! ```

use crate::schema::{SchemaStore, SchemaTables};
use crate::types::{FieldDef, FieldType, OptionItem, PadSpec, Product, Section};

fn product_row(cat: &str, sub: &str, name: &str, code: &str, machine: &str) -> Product {
    Product {
        category1: cat.into(),
        category2: sub.into(),
        product_name: name.into(),
        product_code: code.into(),
        machine_type: machine.into(),
    }
}

fn section_row(cat: &str, sub: &str, machine: &str, key: &str, label: &str, order: Option<i64>) -> Section {
    Section {
        category1: cat.into(),
        category2: sub.into(),
        machine_type: machine.into(),
        section_key: key.into(),
        section_label: label.into(),
        order,
    }
}

fn option_row(key: &str, code: &str, label: &str, order: i64) -> OptionItem {
    OptionItem {
        options_key: key.into(),
        value_code: code.into(),
        value_label: label.into(),
        order: Some(order),
    }
}

pub fn sample_tables() -> SchemaTables {
    let products = vec![
        product_row("Rulo Besleme", "Hafif Grup", "Servo Besleme", "RB01", "SRV"),
        product_row("Rulo Besleme", "Hafif Grup", "Pnömatik Besleme", "RB02", "PNM"),
        product_row("Rulo Besleme", "Ağır Grup", "Ağır Servo", "RB10", "SRV"),
        product_row("Rulo Besleme", "", "Kayıp", "RB99", "SRV"),
        product_row("Plaka Besleme", "Destacker", "Destacker", "PB01", "DST"),
        product_row("Diğer", "Test", "Deneme", "DG01", "X"),
    ];

    let sections = vec![
        section_row("Rulo Besleme", "Hafif Grup", "SRV", "GENEL", "Genel", Some(2)),
        section_row("Rulo Besleme", "Hafif Grup", "SRV", "OLCU", "Ölçüler", Some(1)),
        section_row("Rulo Besleme", "Hafif Grup", "PNM", "GENEL", "Genel", Some(1)),
        section_row("Plaka Besleme", "Destacker", "DST", "OLCU", "Ölçüler", None),
        section_row("Rulo Besleme", "Hafif Grup", "YOK", "EXTRA", "Ekstra", None),
    ];

    let mut color = FieldDef::new("GENEL", "COLOR", "Renk", FieldType::Text);
    color.required = true;
    color.encode_key = Some("CLR".into());

    let mut material = FieldDef::new("GENEL", "MAT", "Malzeme", FieldType::Select);
    material.options_key = Some("MAT".into());
    material.default = Some("ST".into());

    let mut accessories = FieldDef::new("GENEL", "ACC", "Aksesuar", FieldType::Multiselect);
    accessories.options_key = Some("ACC".into());
    accessories.default = Some("A1".into());

    let mut length = FieldDef::new("OLCU", "LEN", "Uzunluk", FieldType::Number);
    length.pad = PadSpec::Width(3);

    let mut width = FieldDef::new("OLCU", "WID", "Genişlik", FieldType::Number);
    width.min = Some(10.0);
    width.max = Some(500.0);
    width.step = Some(0.5);
    width.default = Some("25.5".into());
    width.pad = PadSpec::Fixed {
        width: 5,
        decimals: 1,
    };

    let options = vec![
        option_row("MAT", "AL", "Alüminyum", 2),
        option_row("MAT", "ST", "Çelik", 1),
        option_row("ACC", "A1", "Sensör", 1),
        option_row("ACC", "B2", "Fren", 2),
    ];

    SchemaTables {
        products,
        sections,
        fields: vec![color, material, accessories, length, width],
        options,
    }
}

pub fn sample_store() -> SchemaStore {
    SchemaStore::new(sample_tables()).expect("sample schema is valid")
}

/// Looks up a sample product by code.
pub fn product(store: &SchemaStore, code: &str) -> Product {
    store
        .tables()
        .products
        .iter()
        .find(|p| p.product_code == code)
        .cloned()
        .expect("sample product exists")
}
