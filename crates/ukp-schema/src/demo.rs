//! # Demo Workbook
//!
//! A small but complete schema workbook used by the `seed` binary and by tests.
//! It covers every field type and every pad form, and uses the legacy Turkish
//! headers for the product identity columns.

use rust_xlsxwriter::{Format, Workbook, XlsxError};

/// One cell of the demo workbook.
#[derive(Debug, Clone, Copy)]
enum Cell {
    Text(&'static str),
    Number(f64),
    Blank,
}

use Cell::{Blank, Number as N, Text as T};

const PRODUCT_HEADERS: &[&str] = &["Kategori1", "Kategori2", "UrunAdi", "UrunKodu", "MakineTipi"];

const PRODUCTS: &[&[Cell]] = &[
    &[T("Rulo Besleme"), T("Hafif Grup"), T("Servo Besleme"), T("RB-SF100"), T("SERVO")],
    &[T("Rulo Besleme"), T("Hafif Grup"), T("Pnömatik Besleme"), T("RB-PN050"), T("PNOMATIK")],
    &[T("Rulo Besleme"), T("Ağır Grup"), T("Ağır Servo Besleme"), T("RB-SA300"), T("SERVO")],
    &[T("Plaka Besleme"), T("Destacker"), T("Destacker Hattı"), T("PB-DS200"), T("DESTACKER")],
    &[T("Plaka Besleme"), T("Transfer"), T("Transfer Ünitesi"), T("PB-TR100"), T("TRANSFER")],
    &[T("Tamamlayıcı Ürünler"), T("Yağlayıcı"), T("Rulo Yağlayıcı"), T("TM-YG010"), T("YAGLAYICI")],
];

const SECTION_HEADERS: &[&str] = &[
    "Kategori1",
    "Kategori2",
    "MakineTipi",
    "SectionKey",
    "SectionLabel",
    "Order",
];

const SECTIONS: &[&[Cell]] = &[
    &[T("Rulo Besleme"), T("Hafif Grup"), T("SERVO"), T("GENEL"), T("Genel"), N(1.0)],
    &[T("Rulo Besleme"), T("Hafif Grup"), T("SERVO"), T("OLCU"), T("Ölçüler"), N(2.0)],
    &[T("Rulo Besleme"), T("Hafif Grup"), T("PNOMATIK"), T("GENEL"), T("Genel"), N(1.0)],
    &[T("Rulo Besleme"), T("Ağır Grup"), T("SERVO"), T("GENEL"), T("Genel"), N(1.0)],
    &[T("Rulo Besleme"), T("Ağır Grup"), T("SERVO"), T("OLCU"), T("Ölçüler"), N(2.0)],
    &[T("Plaka Besleme"), T("Destacker"), T("DESTACKER"), T("PLAKA"), T("Plaka"), N(1.0)],
    &[T("Plaka Besleme"), T("Transfer"), T("TRANSFER"), T("PLAKA"), T("Plaka"), N(1.0)],
    &[T("Tamamlayıcı Ürünler"), T("Yağlayıcı"), T("YAGLAYICI"), T("YAG"), T("Yağlama"), N(1.0)],
];

const FIELD_HEADERS: &[&str] = &[
    "SectionKey",
    "FieldKey",
    "FieldLabel",
    "Type",
    "Required",
    "Default",
    "EncodeKey",
    "OptionsKey",
    "Min",
    "Max",
    "Step",
    "Pad",
    "Order",
];

#[rustfmt::skip]
const FIELDS: &[&[Cell]] = &[
    &[T("GENEL"), T("RENK"), T("Renk"), T("select"), N(1.0), T("RAL7035"), T("CLR"), T("RENK"), Blank, Blank, Blank, Blank, N(1.0)],
    &[T("GENEL"), T("VOLTAJ"), T("Voltaj"), T("select"), N(1.0), N(400.0), T("V"), T("VOLTAJ"), Blank, Blank, Blank, Blank, N(2.0)],
    &[T("GENEL"), T("OPSIYON"), T("Opsiyonlar"), T("multiselect"), N(0.0), T("SNS"), T("OPT"), T("OPSIYON"), Blank, Blank, Blank, Blank, N(3.0)],
    &[T("GENEL"), T("NOT"), T("Not"), T("text"), N(0.0), Blank, T("NT"), Blank, Blank, Blank, Blank, Blank, N(4.0)],
    &[T("OLCU"), T("GENISLIK"), T("Bant Genişliği (mm)"), T("number"), N(1.0), N(300.0), T("W"), Blank, N(50.0), N(1500.0), N(10.0), N(4.0), N(1.0)],
    &[T("OLCU"), T("KALINLIK"), T("Kalınlık (mm)"), T("number"), N(1.0), N(2.0), T("T"), Blank, N(0.2), N(8.0), N(0.1), T("3.1"), N(2.0)],
    &[T("PLAKA"), T("TABAKA"), T("Tabaka Boyu (mm)"), T("number"), N(1.0), N(1000.0), T("L"), Blank, N(100.0), N(4000.0), N(50.0), N(4.0), N(1.0)],
    &[T("PLAKA"), T("ISTIF"), T("İstif Yüksekliği (mm)"), T("number"), N(0.0), Blank, T("H"), Blank, Blank, Blank, Blank, Blank, N(2.0)],
    &[T("YAG"), T("TANK"), T("Tank Hacmi"), T("select"), N(1.0), N(5.0), T("TNK"), T("TANK"), Blank, Blank, Blank, Blank, N(1.0)],
];

const OPTION_HEADERS: &[&str] = &["OptionsKey", "ValueCode", "ValueLabel", "Order"];

const OPTIONS: &[&[Cell]] = &[
    &[T("RENK"), T("RAL7035"), T("Açık Gri"), N(1.0)],
    &[T("RENK"), T("RAL5010"), T("Mavi"), N(2.0)],
    &[T("RENK"), T("RAL3000"), T("Kırmızı"), N(3.0)],
    &[T("VOLTAJ"), N(400.0), T("400V 3 Faz"), N(1.0)],
    &[T("VOLTAJ"), N(230.0), T("230V Tek Faz"), N(2.0)],
    &[T("OPSIYON"), T("SNS"), T("Sensör"), N(1.0)],
    &[T("OPSIYON"), T("FRN"), T("Fren"), N(2.0)],
    &[T("OPSIYON"), T("PLC"), T("PLC Arayüzü"), N(3.0)],
    &[T("TANK"), N(5.0), T("5 lt"), N(1.0)],
    &[T("TANK"), N(10.0), T("10 lt"), N(2.0)],
];

fn write_sheet(
    workbook: &mut Workbook,
    name: &str,
    headers: &[&str],
    rows: &[&[Cell]],
) -> Result<(), XlsxError> {
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(name)?;

    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    for (r, row) in rows.iter().enumerate() {
        let r = r as u32 + 1;
        for (c, cell) in row.iter().enumerate() {
            let c = c as u16;
            match cell {
                Cell::Text(text) => {
                    sheet.write_string(r, c, *text)?;
                }
                Cell::Number(n) => {
                    sheet.write_number(r, c, *n)?;
                }
                Cell::Blank => {}
            }
        }
    }

    Ok(())
}

/// Builds the demo workbook with its four sheets.
pub fn demo_workbook() -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    write_sheet(&mut workbook, "products", PRODUCT_HEADERS, PRODUCTS)?;
    write_sheet(&mut workbook, "sections", SECTION_HEADERS, SECTIONS)?;
    write_sheet(&mut workbook, "fields", FIELD_HEADERS, FIELDS)?;
    write_sheet(&mut workbook, "options", OPTION_HEADERS, OPTIONS)?;
    Ok(workbook)
}

/// The demo workbook as xlsx bytes.
pub fn demo_workbook_bytes() -> Result<Vec<u8>, XlsxError> {
    demo_workbook()?.save_to_buffer()
}
