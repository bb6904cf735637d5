//! # Schema Store
//!
//! The read-only, indexed view over the four schema tables.
//!
//! ## Table Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Schema Tables                                   │
//! │                                                                         │
//! │  products ──(Category1, Category2, MachineType)──► sections            │
//! │                                                       │                 │
//! │                                                  SectionKey             │
//! │                                                       ▼                 │
//! │                                                    fields               │
//! │                                                       │                 │
//! │                                                  OptionsKey             │
//! │                                                       ▼                 │
//! │                                                    options              │
//! │                                                                         │
//! │  SchemaStore::new checks every arrow above that must resolve.          │
//! │  After that, lookups never fail: a miss is just "no rows".             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is immutable once built and is meant to be shared (`Arc`) by
//! every session.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SchemaError;
use crate::types::{FieldDef, OptionItem, Product, Section};
use crate::CATEGORY_ORDER;

// =============================================================================
// Raw Tables
// =============================================================================

/// The four tables as read from a source, rows in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaTables {
    pub products: Vec<Product>,
    pub sections: Vec<Section>,
    pub fields: Vec<FieldDef>,
    pub options: Vec<OptionItem>,
}

/// Stable sort key: explicit Order first, rows without one keep source order
/// after them.
fn order_key(order: Option<i64>) -> i64 {
    order.unwrap_or(i64::MAX)
}

// =============================================================================
// Schema Store
// =============================================================================

/// Validated schema with lookup indices.
///
/// ## Example
/// ```rust
/// use ukp_core::{Product, SchemaStore, SchemaTables};
///
/// let tables = SchemaTables {
///     products: vec![Product {
///         category1: "Rulo Besleme".into(),
///         category2: "Hafif Grup".into(),
///         product_name: "Servo".into(),
///         product_code: "RB01".into(),
///         machine_type: "SRV".into(),
///     }],
///     ..Default::default()
/// };
/// let store = SchemaStore::new(tables).unwrap();
/// assert_eq!(store.categories(), vec!["Rulo Besleme"]);
/// ```
#[derive(Debug, Clone)]
pub struct SchemaStore {
    tables: SchemaTables,
    /// OptionsKey → options sorted by Order.
    options: BTreeMap<String, Vec<OptionItem>>,
}

impl SchemaStore {
    /// Validates references and builds the indices.
    ///
    /// ## Errors
    /// - [`SchemaError::DuplicateProduct`] for a repeated product identity
    /// - [`SchemaError::UnknownSectionKey`] for a field pointing nowhere
    /// - [`SchemaError::MissingOptionsKey`] / [`SchemaError::UnknownOptionsKey`]
    ///   for a select or multiselect field without a usable options group
    pub fn new(tables: SchemaTables) -> Result<Self, SchemaError> {
        let mut identities = HashSet::new();
        for product in &tables.products {
            let identity = (
                product.category1.as_str(),
                product.category2.as_str(),
                product.product_code.as_str(),
            );
            if !identities.insert(identity) {
                return Err(SchemaError::DuplicateProduct {
                    category: product.category1.clone(),
                    sub_category: product.category2.clone(),
                    product_code: product.product_code.clone(),
                });
            }
        }

        let mut options: BTreeMap<String, Vec<OptionItem>> = BTreeMap::new();
        for option in &tables.options {
            options
                .entry(option.options_key.clone())
                .or_default()
                .push(option.clone());
        }
        for group in options.values_mut() {
            group.sort_by_key(|o| order_key(o.order));
        }

        let section_keys: HashSet<&str> = tables
            .sections
            .iter()
            .map(|s| s.section_key.as_str())
            .collect();

        for field in &tables.fields {
            if !section_keys.contains(field.section_key.as_str()) {
                return Err(SchemaError::UnknownSectionKey {
                    field_key: field.field_key.clone(),
                    section_key: field.section_key.clone(),
                });
            }

            if !field.field_type.has_options() {
                continue;
            }
            let options_key = match field.options_key.as_deref().map(str::trim) {
                Some(key) if !key.is_empty() => key,
                _ => {
                    return Err(SchemaError::MissingOptionsKey {
                        field_key: field.field_key.clone(),
                        field_type: field.field_type.to_string(),
                    })
                }
            };
            if !options.contains_key(options_key) {
                return Err(SchemaError::UnknownOptionsKey {
                    field_key: field.field_key.clone(),
                    options_key: options_key.to_string(),
                });
            }
        }

        let store = SchemaStore { tables, options };

        for section in &store.tables.sections {
            if !store.is_reachable(section) {
                warn!(
                    section = %section.section_key,
                    machine_type = %section.machine_type,
                    "Section matches no product and will never be shown"
                );
            }
        }

        debug!(
            products = store.tables.products.len(),
            sections = store.tables.sections.len(),
            fields = store.tables.fields.len(),
            options = store.tables.options.len(),
            "Schema indexed"
        );

        Ok(store)
    }

    /// The underlying tables.
    pub fn tables(&self) -> &SchemaTables {
        &self.tables
    }

    // =========================================================================
    // Navigation Queries
    // =========================================================================

    /// Categories offered in stage 1: those present in the product table,
    /// filtered and ordered by [`CATEGORY_ORDER`].
    pub fn categories(&self) -> Vec<&'static str> {
        CATEGORY_ORDER
            .iter()
            .copied()
            .filter(|cat| self.tables.products.iter().any(|p| p.category1 == *cat))
            .collect()
    }

    /// Distinct non-blank sub-categories of `category`, in first-appearance order.
    pub fn sub_categories(&self, category: &str) -> Vec<&str> {
        let mut seen = Vec::new();
        for product in self.tables.products.iter().filter(|p| p.category1 == category) {
            let sub = product.category2.as_str();
            if !sub.trim().is_empty() && !seen.contains(&sub) {
                seen.push(sub);
            }
        }
        seen
    }

    /// Products of a (category, sub-category) pair in source order.
    pub fn products(&self, category: &str, sub_category: &str) -> Vec<&Product> {
        self.tables
            .products
            .iter()
            .filter(|p| p.is_in(category, sub_category))
            .collect()
    }

    pub fn find_product(
        &self,
        category: &str,
        sub_category: &str,
        product_code: &str,
    ) -> Option<&Product> {
        self.tables
            .products
            .iter()
            .find(|p| p.is_in(category, sub_category) && p.product_code == product_code)
    }

    // =========================================================================
    // Form Queries
    // =========================================================================

    /// Sections rendered for `product`, sorted by Order.
    pub fn sections_for(&self, product: &Product) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self
            .tables
            .sections
            .iter()
            .filter(|s| s.applies_to(product))
            .collect();
        sections.sort_by_key(|s| order_key(s.order));
        sections
    }

    /// Fields of a section key, sorted by Order.
    ///
    /// Fields are matched on SectionKey alone, so two machines that share a
    /// section key also share its fields.
    pub fn fields_for(&self, section_key: &str) -> Vec<&FieldDef> {
        let mut fields: Vec<&FieldDef> = self
            .tables
            .fields
            .iter()
            .filter(|f| f.section_key == section_key)
            .collect();
        fields.sort_by_key(|f| order_key(f.order));
        fields
    }

    /// Every field row in fields-table order.
    ///
    /// Rows are grouped by SectionKey in the order each key first appears in
    /// the table; inside a group, explicit Order wins and ties keep row order.
    /// Section.Order plays no part here: this is the token order of the long
    /// code, not the display order.
    pub fn fields_in_table_order(&self) -> Vec<&FieldDef> {
        let mut groups: HashMap<&str, usize> = HashMap::new();
        for field in &self.tables.fields {
            let next = groups.len();
            groups.entry(field.section_key.as_str()).or_insert(next);
        }

        let mut fields: Vec<&FieldDef> = self.tables.fields.iter().collect();
        fields.sort_by_key(|f| {
            let group = groups.get(f.section_key.as_str()).copied().unwrap_or(usize::MAX);
            (group, order_key(f.order))
        });
        fields
    }

    /// Options of a group sorted by Order; empty for an unknown key.
    pub fn options_for(&self, options_key: &str) -> &[OptionItem] {
        self.options
            .get(options_key.trim())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether any product renders this section.
    pub fn is_reachable(&self, section: &Section) -> bool {
        self.tables.products.iter().any(|p| section.applies_to(p))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_store, sample_tables};
    use crate::types::FieldType;

    #[test]
    fn test_categories_follow_priority_list() {
        let store = sample_store();
        // "Diğer" is in the product table but not in the priority list
        assert_eq!(store.categories(), vec!["Rulo Besleme", "Plaka Besleme"]);
    }

    #[test]
    fn test_sub_categories_are_distinct_and_non_blank() {
        let store = sample_store();
        assert_eq!(
            store.sub_categories("Rulo Besleme"),
            vec!["Hafif Grup", "Ağır Grup"]
        );
        assert!(store.sub_categories("Yok").is_empty());
    }

    #[test]
    fn test_products_for_every_pair() {
        let store = sample_store();
        for cat in store.categories() {
            for sub in store.sub_categories(cat) {
                let expected: Vec<&Product> = store
                    .tables()
                    .products
                    .iter()
                    .filter(|p| p.category1 == cat && p.category2 == sub)
                    .collect();
                assert_eq!(store.products(cat, sub), expected);
                assert!(!expected.is_empty());
            }
        }
        let codes: Vec<&str> = store
            .products("Rulo Besleme", "Hafif Grup")
            .iter()
            .map(|p| p.product_code.as_str())
            .collect();
        assert_eq!(codes, vec!["RB01", "RB02"]);
    }

    #[test]
    fn test_find_product() {
        let store = sample_store();
        assert!(store.find_product("Rulo Besleme", "Hafif Grup", "RB01").is_some());
        assert!(store.find_product("Rulo Besleme", "Ağır Grup", "RB01").is_none());
    }

    #[test]
    fn test_sections_sorted_by_order() {
        let store = sample_store();
        let product = store
            .find_product("Rulo Besleme", "Hafif Grup", "RB01")
            .unwrap()
            .clone();
        let keys: Vec<&str> = store
            .sections_for(&product)
            .iter()
            .map(|s| s.section_key.as_str())
            .collect();
        assert_eq!(keys, vec!["OLCU", "GENEL"]);
    }

    #[test]
    fn test_fields_in_table_order_ignores_section_order() {
        let mut tables = sample_tables();
        tables.fields[3].order = Some(2);
        tables.fields[4].order = Some(1);
        let store = SchemaStore::new(tables).unwrap();

        let keys: Vec<&str> = store
            .fields_in_table_order()
            .iter()
            .map(|f| f.field_key.as_str())
            .collect();
        assert_eq!(keys, vec!["COLOR", "MAT", "ACC", "WID", "LEN"]);
    }

    #[test]
    fn test_options_sorted_by_order() {
        let store = sample_store();
        let codes: Vec<&str> = store
            .options_for("MAT")
            .iter()
            .map(|o| o.value_code.as_str())
            .collect();
        assert_eq!(codes, vec!["ST", "AL"]);
        assert!(store.options_for("NOPE").is_empty());
    }

    #[test]
    fn test_unreachable_section_is_kept() {
        let store = sample_store();
        let orphan = store
            .tables()
            .sections
            .iter()
            .find(|s| s.section_key == "EXTRA")
            .unwrap();
        assert!(!store.is_reachable(orphan));
    }

    #[test]
    fn test_unknown_section_key_rejected() {
        let mut tables = sample_tables();
        tables
            .fields
            .push(FieldDef::new("NOWHERE", "X", "X", FieldType::Text));
        let err = SchemaStore::new(tables).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownSectionKey { .. }));
    }

    #[test]
    fn test_select_without_options_key_rejected() {
        let mut tables = sample_tables();
        tables
            .fields
            .push(FieldDef::new("GENEL", "S", "S", FieldType::Select));
        let err = SchemaStore::new(tables).unwrap_err();
        assert!(matches!(err, SchemaError::MissingOptionsKey { .. }));
    }

    #[test]
    fn test_unknown_options_key_rejected() {
        let mut tables = sample_tables();
        let mut field = FieldDef::new("GENEL", "S", "S", FieldType::Multiselect);
        field.options_key = Some("MISSING".into());
        tables.fields.push(field);
        let err = SchemaStore::new(tables).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Field 'S' references unknown options group 'MISSING'"
        );
    }

    #[test]
    fn test_duplicate_product_rejected() {
        let mut tables = sample_tables();
        let copy = tables.products[0].clone();
        tables.products.push(copy);
        let err = SchemaStore::new(tables).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateProduct { .. }));
    }
}
