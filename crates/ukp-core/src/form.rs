//! # Form Engine
//!
//! Resolves the form of one product (sections, fields, options) and owns the
//! rules for default values and value edits.
//!
//! ## Resolution
//! ```text
//! Product (Category1, Category2, MachineType)
//!    │
//!    ▼  SchemaStore::sections_for     sorted by Section.Order
//! SectionView* ──► FieldSpec*         sorted by Field.Order, matched on SectionKey
//!                     │
//!                     ▼  SchemaStore::options_for   sorted by Option.Order
//!                  OptionItem*
//! ```
//!
//! That is the display order. The encoder instead walks
//! [`FormEngine::field_schema`], which keeps the fields table's own order.
//!
//! ## Defaults
//! ```text
//! Type          Default
//! ───────────   ──────────────────────────────────────────────────────
//! select        option matching Default, else the first option
//! multiselect   [Default] when it matches an option, else []
//! number        Default when numeric, else Min, else 0
//! text          Default, else ""
//! ```

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::schema::SchemaStore;
use crate::types::{FieldDef, FieldType, FieldValue, FieldValues, OptionItem, PadSpec, Product};
use crate::validation::{validate_choice, validate_choices, validate_number, validate_required};
use crate::NUMBER_MAX_SENTINEL;

// =============================================================================
// Number Bounds
// =============================================================================

/// Effective bounds of a number field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct NumberBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl NumberBounds {
    /// Min defaults to 0, Max to [`NUMBER_MAX_SENTINEL`], Step to 1.
    pub fn from_field(field: &FieldDef) -> Self {
        NumberBounds {
            min: field.min.unwrap_or(0.0),
            max: field.max.unwrap_or(NUMBER_MAX_SENTINEL),
            step: field.step.unwrap_or(1.0),
        }
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Parses user or schema number text. Accepts `,` as the decimal separator.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

// =============================================================================
// Field Spec
// =============================================================================

/// A field as presented to the user: its definition with options and default
/// resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    pub encode_key: String,
    /// Set for number fields only.
    pub bounds: Option<NumberBounds>,
    pub pad: PadSpec,
    pub options: Vec<OptionItem>,
    pub default: FieldValue,
    #[serde(skip)]
    def: FieldDef,
}

impl FieldSpec {
    fn resolve(store: &SchemaStore, def: &FieldDef) -> Self {
        let options = match (&def.options_key, def.field_type.has_options()) {
            (Some(key), true) => store.options_for(key).to_vec(),
            _ => Vec::new(),
        };
        let bounds = (def.field_type == FieldType::Number).then(|| NumberBounds::from_field(def));
        let default = default_value(def, &options);

        FieldSpec {
            key: def.field_key.clone(),
            label: def.field_label.clone(),
            field_type: def.field_type,
            required: def.required,
            encode_key: def.encode_key().to_string(),
            bounds,
            pad: def.pad.clone(),
            options,
            default,
            def: def.clone(),
        }
    }

    /// The schema row this spec was resolved from.
    pub fn definition(&self) -> &FieldDef {
        &self.def
    }

    /// Label with a trailing ` *` on required fields.
    pub fn display_label(&self) -> String {
        if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        }
    }

    /// Turns raw terminal input into a value of the right shape.
    ///
    /// Select and multiselect input may name options by code (any case) or by
    /// 1-based position; multiselect entries are comma separated. Codes that
    /// match nothing are passed through so that [`FormEngine::set_value`]
    /// reports them.
    pub fn parse_input(&self, raw: &str) -> Result<FieldValue, ValidationError> {
        let raw = raw.trim();
        match self.field_type {
            FieldType::Text => Ok(FieldValue::text(raw)),
            FieldType::Number => {
                parse_number(raw)
                    .map(FieldValue::Number)
                    .ok_or_else(|| ValidationError::InvalidFormat {
                        field: self.key.clone(),
                        reason: format!("'{raw}' is not a number"),
                    })
            }
            FieldType::Select => Ok(FieldValue::Text(self.resolve_code(raw))),
            FieldType::Multiselect => Ok(FieldValue::Multi(
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| self.resolve_code(s))
                    .collect(),
            )),
        }
    }

    fn resolve_code(&self, token: &str) -> String {
        if let Some(option) = self
            .options
            .iter()
            .find(|o| o.value_code.eq_ignore_ascii_case(token))
        {
            return option.value_code.clone();
        }
        token
            .parse::<usize>()
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| self.options.get(i))
            .map(|o| o.value_code.clone())
            .unwrap_or_else(|| token.to_string())
    }

    /// Checks a value against this field's type, bounds and options.
    pub fn validate(&self, value: &FieldValue) -> Result<(), ValidationError> {
        let wrong_shape = |expected: &str| ValidationError::InvalidFormat {
            field: self.key.clone(),
            reason: format!("expected {expected}"),
        };

        match (self.field_type, value) {
            (FieldType::Text, FieldValue::Text(_)) => Ok(()),
            (FieldType::Text, _) => Err(wrong_shape("text")),
            (FieldType::Number, FieldValue::Number(n)) => {
                let bounds = self
                    .bounds
                    .unwrap_or_else(|| NumberBounds::from_field(&self.def));
                validate_number(&self.key, *n, &bounds)
            }
            (FieldType::Number, _) => Err(wrong_shape("a number")),
            (FieldType::Select, FieldValue::Text(code)) => {
                validate_choice(&self.key, code, &self.options)
            }
            (FieldType::Select, _) => Err(wrong_shape("a single option code")),
            (FieldType::Multiselect, FieldValue::Multi(codes)) => {
                validate_choices(&self.key, codes, &self.options)
            }
            (FieldType::Multiselect, _) => Err(wrong_shape("a list of option codes")),
        }
    }
}

fn default_value(def: &FieldDef, options: &[OptionItem]) -> FieldValue {
    let default = def.default.as_deref().map(str::trim).filter(|d| !d.is_empty());

    match def.field_type {
        FieldType::Select => {
            let chosen = default
                .and_then(|d| options.iter().find(|o| o.value_code == d))
                .or_else(|| options.first());
            FieldValue::text(chosen.map(|o| o.value_code.as_str()).unwrap_or_default())
        }
        FieldType::Multiselect => {
            let chosen = default.and_then(|d| options.iter().find(|o| o.value_code == d));
            FieldValue::Multi(chosen.map(|o| vec![o.value_code.clone()]).unwrap_or_default())
        }
        FieldType::Number => {
            let value = default
                .and_then(parse_number)
                .or(def.min)
                .unwrap_or(0.0);
            FieldValue::Number(value)
        }
        FieldType::Text => FieldValue::text(def.default.clone().unwrap_or_default()),
    }
}

// =============================================================================
// Section View
// =============================================================================

/// One tab of the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView {
    pub key: String,
    pub label: String,
    pub fields: Vec<FieldSpec>,
}

// =============================================================================
// Form Engine
// =============================================================================

/// The resolved form of one product.
///
/// ## Example
/// ```rust,ignore
/// let form = FormEngine::for_product(&store, &product);
/// let mut values = form.default_values();
/// form.set_value(&mut values, "LEN", FieldValue::Number(7.0))?;
/// assert!(form.missing_required(&values).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormEngine {
    product: Product,
    sections: Vec<SectionView>,
    #[serde(skip)]
    encode_order: Vec<FieldDef>,
}

impl FormEngine {
    /// Resolves sections, fields and options for `product`.
    ///
    /// A FieldKey that appears in two sections of the same product is kept
    /// only where it first appears.
    pub fn for_product(store: &SchemaStore, product: &Product) -> Self {
        let mut seen = HashSet::new();
        let mut sections = Vec::new();

        for section in store.sections_for(product) {
            let mut fields = Vec::new();
            for def in store.fields_for(&section.section_key) {
                if !seen.insert(def.field_key.clone()) {
                    warn!(
                        field = %def.field_key,
                        section = %section.section_key,
                        product = %product.product_code,
                        "Duplicate field key in product form, keeping the first"
                    );
                    continue;
                }
                fields.push(FieldSpec::resolve(store, def));
            }
            sections.push(SectionView {
                key: section.section_key.clone(),
                label: section.section_label.clone(),
                fields,
            });
        }

        let encode_order: Vec<FieldDef> = {
            let mut kept: HashSet<(&str, &str)> = sections
                .iter()
                .flat_map(|s| s.fields.iter())
                .map(|f| (f.def.section_key.as_str(), f.key.as_str()))
                .collect();
            store
                .fields_in_table_order()
                .into_iter()
                .filter(|def| kept.remove(&(def.section_key.as_str(), def.field_key.as_str())))
                .cloned()
                .collect()
        };

        debug!(
            product = %product.product_code,
            sections = sections.len(),
            "Form resolved"
        );

        FormEngine {
            product: product.clone(),
            sections,
            encode_order,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn sections(&self) -> &[SectionView] {
        &self.sections
    }

    /// All fields in section order, then field order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields().find(|f| f.key == key)
    }

    /// This form's fields in long-code token order.
    ///
    /// Follows the fields table (see [`SchemaStore::fields_in_table_order`]),
    /// not the section display order of [`FormEngine::fields`].
    pub fn field_schema(&self) -> &[FieldDef] {
        &self.encode_order
    }

    /// Initial value of every field.
    pub fn default_values(&self) -> FieldValues {
        self.fields()
            .map(|f| (f.key.clone(), f.default.clone()))
            .collect()
    }

    /// Validates `value` and writes it into `values`.
    ///
    /// On error `values` is left untouched.
    pub fn set_value(
        &self,
        values: &mut FieldValues,
        key: &str,
        value: FieldValue,
    ) -> Result<(), ValidationError> {
        let field = self.field(key).ok_or_else(|| ValidationError::UnknownField {
            field: key.to_string(),
        })?;
        field.validate(&value)?;
        debug!(field = %key, value = %value, "Field value set");
        values.insert(key.to_string(), value);
        Ok(())
    }

    /// Required fields whose value is absent or empty, in form order.
    pub fn missing_required(&self, values: &FieldValues) -> Vec<&FieldSpec> {
        self.fields()
            .filter(|f| f.required)
            .filter(|f| validate_required(&f.key, values.get(&f.key)).is_err())
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
