//! # Long-Code Encoder
//!
//! Maps a configured product to its long code. Everything here is a pure
//! function: the same inputs always give byte-identical output, and no input
//! makes it fail.
//!
//! ## Token Grammar
//! ```text
//! UKP-V1-S1<CatCode>-S2<SubCode>-PRD<ProductCode>{-<EncodeKey><EncodedValue>}*
//!  │   │   │           │           │               │
//!  │   │   │           │           │               └─ one per non-empty field,
//!  │   │   │           │           │                  in field schema order
//!  │   │   │           │           └─ sanitized product code
//!  │   │   │           └─ sub-category code, "YY" when unknown
//!  │   │   └─ category code, "XX" when unknown
//!  │   └─ VERSION_TAG
//!  └─ SYSTEM_TAG
//! ```
//!
//! ## Field Value Encoding
//! ```text
//! Field type     Value               Encoded
//! ───────────    ────────────────    ──────────────────────────────
//! text/select    "kirmizi"           KIRMIZI         (sanitize)
//! multiselect    ["a1", "b 2"]       A1.B2           (sanitize, join ".")
//! number         7, Pad 3            007             (pad_number)
//! any            "", [], 0           (token omitted)
//! ```

use crate::types::{FieldDef, FieldType, FieldValue, FieldValues, PadSpec};
use crate::{MAX_PAD_WIDTH, SYSTEM_TAG, VERSION_TAG};

// =============================================================================
// Category Codes
// =============================================================================

/// Code used when a category is not in [`CATEGORY_CODES`].
pub const UNKNOWN_CATEGORY_CODE: &str = "XX";

/// Code used when a sub-category is not in [`SUB_CATEGORY_CODES`].
pub const UNKNOWN_SUB_CATEGORY_CODE: &str = "YY";

/// Category1 → code.
pub const CATEGORY_CODES: &[(&str, &str)] = &[
    ("Rulo Besleme", "RB"),
    ("Plaka Besleme", "PB"),
    ("Tamamlayıcı Ürünler", "TM"),
];

/// Category2 → code.
pub const SUB_CATEGORY_CODES: &[(&str, &str)] = &[
    ("Hafif Grup", "HG"),
    ("Ağır Grup", "AG"),
    ("Destacker", "DST"),
    ("Transfer", "TRF"),
    ("İstif", "IST"),
    ("Robot", "RBT"),
    ("Konveyör", "KNV"),
    ("Feeder", "FDR"),
    ("Giyotin", "GIY"),
    ("Yağlayıcı", "YAG"),
    ("Güvenlik", "GUV"),
];

fn lookup(table: &[(&str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, code)| *code)
}

/// Code of a top-level category, `XX` when unknown.
pub fn category_code(category: &str) -> &'static str {
    lookup(CATEGORY_CODES, category).unwrap_or(UNKNOWN_CATEGORY_CODE)
}

/// Code of a sub-category, `YY` when unknown.
pub fn sub_category_code(sub_category: &str) -> &'static str {
    lookup(SUB_CATEGORY_CODES, sub_category).unwrap_or(UNKNOWN_SUB_CATEGORY_CODE)
}

// =============================================================================
// Sanitization
// =============================================================================

/// Uppercases `value` and drops every character outside `[A-Z0-9._-]`.
///
/// ## Example
/// ```rust
/// use ukp_core::encoder::sanitize;
///
/// assert_eq!(sanitize("Çelik 12"), "ELIK12");
/// assert_eq!(sanitize("ab-c_1.2"), "AB-C_1.2");
/// ```
pub fn sanitize(value: &str) -> String {
    value
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-'))
        .collect()
}

// =============================================================================
// Numbers
// =============================================================================

/// Integer text for integral values, plain decimal text otherwise.
pub fn plain_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Formats a number field value according to its pad spec.
///
/// ## Rules
/// - `None`: [`plain_number`]
/// - `Width(w)`: integer part, zero-padded to `w`
/// - `Fixed { width, decimals }`: `decimals` fraction digits, decimal point
///   removed, zero-padded to `width`
/// - `Other`: the value as-is (`7.0`)
///
/// ## Example
/// ```rust
/// use ukp_core::encoder::pad_number;
/// use ukp_core::PadSpec;
///
/// assert_eq!(pad_number(7.0, &PadSpec::None), "7");
/// assert_eq!(pad_number(7.0, &PadSpec::Width(3)), "007");
/// assert_eq!(pad_number(7.0, &PadSpec::parse("5.2")), "00700");
/// ```
pub fn pad_number(value: f64, pad: &PadSpec) -> String {
    match pad {
        PadSpec::None => plain_number(value),
        PadSpec::Width(width) => {
            let width = (*width).min(MAX_PAD_WIDTH);
            format!("{:0width$}", value.trunc() as i64, width = width)
        }
        PadSpec::Fixed { width, decimals } => {
            let decimals = (*decimals).min(MAX_PAD_WIDTH);
            let digits = format!("{:.*}", decimals, value.abs()).replace('.', "");
            let sign = if value < 0.0 { "-" } else { "" };
            let width = (*width).min(MAX_PAD_WIDTH).saturating_sub(sign.len());
            format!("{sign}{digits:0>width$}")
        }
        PadSpec::Other(_) => format!("{value:?}"),
    }
}

// =============================================================================
// Field Tokens
// =============================================================================

/// Encodes one field value without its key.
///
/// Dispatches on the field type. A value whose shape does not match the type
/// still encodes (text rules for scalars, dotted join for lists).
pub fn encode_value(field: &FieldDef, value: &FieldValue) -> String {
    match (field.field_type, value) {
        (FieldType::Number, FieldValue::Number(n)) => pad_number(*n, &field.pad),
        (_, FieldValue::Number(n)) => sanitize(&plain_number(*n)),
        (_, FieldValue::Text(s)) => sanitize(s),
        (_, FieldValue::Multi(items)) => items
            .iter()
            .map(|item| sanitize(item))
            .collect::<Vec<_>>()
            .join("."),
    }
}

/// The `<EncodeKey><EncodedValue>` token of a field, or `None` when the value
/// is absent or empty.
pub fn encode_field(field: &FieldDef, values: &FieldValues) -> Option<String> {
    let value = values.get(&field.field_key)?;
    if value.is_empty() {
        return None;
    }
    Some(format!("{}{}", field.encode_key(), encode_value(field, value)))
}

// =============================================================================
// Long Code
// =============================================================================

/// Builds the long code.
///
/// `fields` fixes the token order; the iteration order of `values` never
/// matters. Values whose key matches no field are ignored.
pub fn encode_long_code(
    category: &str,
    sub_category: &str,
    product_code: &str,
    values: &FieldValues,
    fields: &[FieldDef],
) -> String {
    let mut parts = vec![
        SYSTEM_TAG.to_string(),
        VERSION_TAG.to_string(),
        format!("S1{}", category_code(category)),
        format!("S2{}", sub_category_code(sub_category)),
        format!("PRD{}", sanitize(product_code)),
    ];

    parts.extend(fields.iter().filter_map(|field| encode_field(field, values)));

    parts.join("-")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn text_field(key: &str, encode_key: Option<&str>) -> FieldDef {
        let mut field = FieldDef::new("S", key, key, FieldType::Text);
        field.encode_key = encode_key.map(str::to_string);
        field
    }

    fn number_field(key: &str, pad: PadSpec) -> FieldDef {
        let mut field = FieldDef::new("S", key, key, FieldType::Number);
        field.pad = pad;
        field
    }

    #[test]
    fn test_category_codes() {
        assert_eq!(category_code("Rulo Besleme"), "RB");
        assert_eq!(category_code("Tamamlayıcı Ürünler"), "TM");
        assert_eq!(category_code("Bilinmeyen"), "XX");
        assert_eq!(sub_category_code("İstif"), "IST");
        assert_eq!(sub_category_code("Yağlayıcı"), "YAG");
        assert_eq!(sub_category_code("hafif grup"), "YY");
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("Çelik 12"), "ELIK12");
        assert_eq!(sanitize("kirmizi"), "KIRMIZI");
        assert_eq!(sanitize("a/b\\c d"), "ABCD");
        assert_eq!(sanitize("x.y_z-1"), "X.Y_Z-1");
        assert_eq!(sanitize("straße"), "STRASSE");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_plain_number() {
        assert_eq!(plain_number(7.0), "7");
        assert_eq!(plain_number(-3.0), "-3");
        assert_eq!(plain_number(7.5), "7.5");
        assert_eq!(plain_number(0.25), "0.25");
    }

    #[test]
    fn test_pad_number() {
        assert_eq!(pad_number(7.0, &PadSpec::None), "7");
        assert_eq!(pad_number(7.0, &PadSpec::Width(3)), "007");
        assert_eq!(pad_number(7.9, &PadSpec::Width(3)), "007");
        assert_eq!(pad_number(1234.0, &PadSpec::Width(3)), "1234");
        assert_eq!(pad_number(-7.0, &PadSpec::Width(4)), "-007");
        assert_eq!(pad_number(7.0, &PadSpec::parse("5.2")), "00700");
        assert_eq!(pad_number(12.5, &PadSpec::parse("6.2")), "001250");
        assert_eq!(pad_number(2.4, &PadSpec::parse("3.0")), "002");
        assert_eq!(pad_number(-1.5, &PadSpec::parse("5.1")), "-0015");
        assert_eq!(pad_number(7.0, &PadSpec::Other("abc".into())), "7.0");
    }

    #[test]
    fn test_pad_number_is_total() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e300, -1e-300] {
            for pad in [
                PadSpec::None,
                PadSpec::Width(MAX_PAD_WIDTH),
                PadSpec::Fixed {
                    width: 5,
                    decimals: 2,
                },
                PadSpec::Other("?".into()),
            ] {
                let _ = pad_number(value, &pad);
            }
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let fields = vec![
            text_field("COLOR", Some("CLR")),
            number_field("LEN", PadSpec::Width(3)),
        ];
        let mut values = FieldValues::new();
        values.insert("COLOR".into(), FieldValue::text("kirmizi"));
        values.insert("LEN".into(), FieldValue::Number(7.0));

        let code = encode_long_code("Rulo Besleme", "Hafif Grup", "RB01", &values, &fields);
        assert_eq!(code, "UKP-V1-S1RB-S2HG-PRDRB01-CLRKIRMIZI-LEN007");

        // Same input, same bytes
        let again = encode_long_code("Rulo Besleme", "Hafif Grup", "RB01", &values, &fields);
        assert_eq!(code, again);
    }

    #[test]
    fn test_empty_values_are_omitted() {
        let mut multi = FieldDef::new("S", "ACC", "Acc", FieldType::Multiselect);
        multi.options_key = Some("ACC".into());
        let fields = vec![
            text_field("A", None),
            number_field("B", PadSpec::Width(3)),
            multi,
            text_field("MISSING", None),
        ];
        let mut values = FieldValues::new();
        values.insert("A".into(), FieldValue::text(""));
        values.insert("B".into(), FieldValue::Number(0.0));
        values.insert("ACC".into(), FieldValue::Multi(vec![]));

        let code = encode_long_code("Rulo Besleme", "Hafif Grup", "RB01", &values, &fields);
        assert_eq!(code, "UKP-V1-S1RB-S2HG-PRDRB01");
    }

    #[test]
    fn test_field_order_follows_schema() {
        let fields = vec![
            text_field("ZZZ", None),
            text_field("AAA", None),
            text_field("MMM", None),
        ];
        let mut values = FieldValues::new();
        values.insert("AAA".into(), FieldValue::text("a"));
        values.insert("MMM".into(), FieldValue::text("m"));
        values.insert("ZZZ".into(), FieldValue::text("z"));

        let code = encode_long_code("Plaka Besleme", "Destacker", "PB01", &values, &fields);
        assert_eq!(code, "UKP-V1-S1PB-S2DST-PRDPB01-ZZZZ-AAAA-MMMM");
    }

    #[test]
    fn test_multiselect_joins_in_stored_order() {
        let mut field = FieldDef::new("S", "ACC", "Acc", FieldType::Multiselect);
        field.encode_key = Some("AC".into());
        let mut values = FieldValues::new();
        values.insert(
            "ACC".into(),
            FieldValue::Multi(vec!["b 2".into(), "a1".into()]),
        );
        assert_eq!(encode_field(&field, &values).as_deref(), Some("ACB2.A1"));
    }

    #[test]
    fn test_unknown_categories_use_sentinels() {
        let code = encode_long_code("Diğer", "Bilinmeyen", "x-1 ç", &FieldValues::new(), &[]);
        assert_eq!(code, "UKP-V1-S1XX-S2YY-PRDX-1");
    }

    #[test]
    fn test_mismatched_value_shape_still_encodes() {
        let field = text_field("T", None);
        let mut values = FieldValues::new();
        values.insert("T".into(), FieldValue::Number(12.0));
        assert_eq!(encode_field(&field, &values).as_deref(), Some("T12"));

        let field = number_field("N", PadSpec::Width(3));
        values.insert("N".into(), FieldValue::text("abc"));
        assert_eq!(encode_field(&field, &values).as_deref(), Some("NABC"));
    }

    #[test]
    fn test_encoded_segments_use_allowed_charset() {
        let fields = vec![text_field("T", None)];
        let mut values = FieldValues::new();
        values.insert("T".into(), FieldValue::text("ğüşiöç Ä !@#$%^&*()+= 9"));
        let code = encode_long_code("Rulo Besleme", "Hafif Grup", "r b/01", &values, &fields);
        assert!(code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-')));
    }
}
