//! # Domain Types
//!
//! Row types of the four schema tables plus the value types collected by the form.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Schema Tables                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Section      │   │    FieldDef     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  category1      │──►│  category1      │   │  section_key ──►│ Section│
//! │  │  category2      │   │  category2      │   │  field_key      │       │
//! │  │  product_code   │   │  machine_type   │   │  field_type     │       │
//! │  │  machine_type   │   │  section_key    │   │  options_key ──►│ Option │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   OptionItem    │   │   FieldType     │   │   FieldValue    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  options_key    │   │  Text           │   │  Text(String)   │       │
//! │  │  value_code     │   │  Number         │   │  Number(f64)    │       │
//! │  │  value_label    │   │  Select         │   │  Multi(Vec)     │       │
//! │  │  order          │   │  Multiselect    │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Serde field names follow the spreadsheet headers (`Category1`, `FieldKey`,
//! ...), so a JSON schema document reads like the workbook it came from.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;
use ts_rs::TS;

use crate::MAX_PAD_WIDTH;

// =============================================================================
// Product
// =============================================================================

/// A configurable product.
///
/// Identity is (category1, category2, product_code).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    pub category1: String,
    pub category2: String,
    pub product_name: String,
    pub product_code: String,
    pub machine_type: String,
}

impl Product {
    /// Label shown in the product picker: `Name (CODE) — Machine`.
    pub fn display_label(&self) -> String {
        format!(
            "{} ({}) — {}",
            self.product_name, self.product_code, self.machine_type
        )
    }

    /// Whether this product belongs to the given (category, sub-category) pair.
    #[inline]
    pub fn is_in(&self, category: &str, sub_category: &str) -> bool {
        self.category1 == category && self.category2 == sub_category
    }
}

// =============================================================================
// Section
// =============================================================================

/// A tab of fields shown for one machine type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Section {
    pub category1: String,
    pub category2: String,
    pub machine_type: String,
    pub section_key: String,
    pub section_label: String,
    #[serde(default)]
    pub order: Option<i64>,
}

impl Section {
    /// Whether this section is rendered for the given product.
    pub fn applies_to(&self, product: &Product) -> bool {
        self.category1 == product.category1
            && self.category2 == product.category2
            && self.machine_type == product.machine_type
    }
}

// =============================================================================
// Field Type
// =============================================================================

/// The closed set of field kinds.
///
/// Parsed leniently from the schema: case is ignored and anything unrecognised
/// is a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Select,
    Multiselect,
}

impl FieldType {
    /// Parses a schema `Type` cell.
    pub fn from_schema(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "number" => FieldType::Number,
            "select" => FieldType::Select,
            "multiselect" => FieldType::Multiselect,
            _ => FieldType::Text,
        }
    }

    /// Select and multiselect fields draw their values from an options group.
    #[inline]
    pub const fn has_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Multiselect)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::Multiselect => "multiselect",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(FieldType::from_schema(&raw))
    }
}

// =============================================================================
// Pad Spec
// =============================================================================

/// Numeric formatting directive of a number field.
///
/// ```text
/// Pad cell    PadSpec                         7 encodes as
/// ────────    ───────────────────────────     ────────────
/// (blank)     None                            "7"
/// 3           Width(3)                        "007"
/// 5.2         Width(5)                        "00007"
/// "5.2"       Fixed { width: 5, decimals: 2 } "00700"
/// "abc"       Other("abc")                    "7.0"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PadSpec {
    #[default]
    None,
    Width(usize),
    Fixed { width: usize, decimals: usize },
    Other(String),
}

impl PadSpec {
    /// Parses the text form of a pad cell.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return PadSpec::None;
        }

        if raw.chars().all(|c| c.is_ascii_digit()) {
            return match raw.parse::<usize>() {
                Ok(width) => PadSpec::Width(capped(width, raw)),
                Err(_) => PadSpec::Other(raw.to_string()),
            };
        }

        if let Some((w, d)) = raw.split_once('.') {
            let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
            if all_digits(w) && all_digits(d) {
                if let (Ok(width), Ok(decimals)) = (w.parse::<usize>(), d.parse::<usize>()) {
                    return PadSpec::Fixed {
                        width: capped(width, raw),
                        decimals: capped(decimals, raw),
                    };
                }
            }
        }

        PadSpec::Other(raw.to_string())
    }

    /// Interprets a numeric pad cell as a width, dropping any fraction.
    ///
    /// Only text cells carry the `"w.d"` form; a number cell holding `5.2` is
    /// width 5.
    pub fn from_number(value: f64) -> Self {
        if !value.is_finite() || value < 0.0 {
            return PadSpec::Other(value.to_string());
        }
        let width = value.trunc();
        if width > MAX_PAD_WIDTH as f64 {
            return PadSpec::Width(capped(usize::MAX, &value.to_string()));
        }
        PadSpec::Width(width as usize)
    }

    /// The text form, or `None` when no pad is set.
    pub fn to_spec_string(&self) -> Option<String> {
        match self {
            PadSpec::None => None,
            PadSpec::Width(w) => Some(w.to_string()),
            PadSpec::Fixed { width, decimals } => Some(format!("{width}.{decimals}")),
            PadSpec::Other(raw) => Some(raw.clone()),
        }
    }
}

fn capped(requested: usize, raw: &str) -> usize {
    if requested > MAX_PAD_WIDTH {
        warn!(pad = %raw, max = MAX_PAD_WIDTH, "Pad spec exceeds the maximum, capping");
        return MAX_PAD_WIDTH;
    }
    requested
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPad {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for PadSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<RawPad>::deserialize(deserializer)? {
            None => PadSpec::None,
            Some(RawPad::Number(n)) => PadSpec::from_number(n),
            Some(RawPad::Text(s)) => PadSpec::parse(&s),
        })
    }
}

impl Serialize for PadSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_spec_string().serialize(serializer)
    }
}

// =============================================================================
// Field Definition
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCell {
    Number(f64),
    Bool(bool),
    Text(String),
}

/// Reads a cell that may hold text, a number or a boolean as text.
fn cell_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<RawCell>::deserialize(deserializer)? {
        None => None,
        Some(RawCell::Number(n)) => Some(crate::encoder::plain_number(n)),
        Some(RawCell::Bool(b)) => Some(b.to_string()),
        Some(RawCell::Text(s)) => Some(s),
    })
}

/// One row of the `fields` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldDef {
    pub section_key: String,
    pub field_key: String,
    pub field_label: String,
    #[serde(rename = "Type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, deserialize_with = "cell_text")]
    pub default: Option<String>,
    #[serde(default)]
    pub encode_key: Option<String>,
    #[serde(default)]
    pub options_key: Option<String>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,
    #[serde(default)]
    pub pad: PadSpec,
    #[serde(default)]
    pub order: Option<i64>,
}

impl FieldDef {
    /// Creates a field with only the mandatory columns set.
    pub fn new(
        section_key: impl Into<String>,
        field_key: impl Into<String>,
        field_label: impl Into<String>,
        field_type: FieldType,
    ) -> Self {
        FieldDef {
            section_key: section_key.into(),
            field_key: field_key.into(),
            field_label: field_label.into(),
            field_type,
            required: false,
            default: None,
            encode_key: None,
            options_key: None,
            min: None,
            max: None,
            step: None,
            pad: PadSpec::None,
            order: None,
        }
    }

    /// The key written into the long code: EncodeKey when set, else FieldKey.
    pub fn encode_key(&self) -> &str {
        match self.encode_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => &self.field_key,
        }
    }
}

// =============================================================================
// Option
// =============================================================================

/// One selectable value of an options group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "PascalCase")]
pub struct OptionItem {
    pub options_key: String,
    pub value_code: String,
    pub value_label: String,
    #[serde(default)]
    pub order: Option<i64>,
}

impl OptionItem {
    /// Label shown in pickers: `CODE — Label`.
    pub fn display_label(&self) -> String {
        format!("{} — {}", self.value_code, self.value_label)
    }
}

// =============================================================================
// Field Value
// =============================================================================

/// A value collected for one field.
///
/// Text and select fields hold `Text`, number fields `Number`, multiselect
/// fields `Multi`. Serialized untagged: `"abc"`, `7`, `["A", "B"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Multi(Vec<String>),
}

impl FieldValue {
    /// Empty values are left out of the long code.
    ///
    /// A number 0 counts as empty, so an entered zero is indistinguishable from
    /// an unset field.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Number(n) => *n == 0.0,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Multi(v) => v.is_empty(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Multi(v) => f.write_str(&v.join(", ")),
        }
    }
}

/// FieldKey → value mapping collected by the form and consumed by the encoder.
pub type FieldValues = BTreeMap<String, FieldValue>;

// =============================================================================
// Stage
// =============================================================================

/// The three wizard stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Stage 1: pick the top-level category.
    #[default]
    Category,
    /// Stage 2: pick the sub-category.
    SubCategory,
    /// Stage 3: pick the product and fill in its form.
    Product,
}

impl Stage {
    /// 1-based stage number shown to the user.
    pub const fn number(&self) -> u8 {
        match self {
            Stage::Category => 1,
            Stage::SubCategory => 2,
            Stage::Product => 3,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Category => "category",
            Stage::SubCategory => "sub-category",
            Stage::Product => "product",
        };
        write!(f, "{} ({})", self.number(), name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
