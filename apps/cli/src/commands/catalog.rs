//! # Catalog Command
//!
//! Shows what the schema offers at each stage without starting a session.
//!
//! ```text
//! ukp catalog                                   → categories
//! ukp catalog --category C                      → sub-categories of C
//! ukp catalog --category C --sub S              → products of C / S
//! ukp catalog --category C --sub S --product P  → form layout of P
//! ```
//!
//! The request is replayed through [`SelectionState`], so an unknown choice
//! fails exactly like it would in the wizard.

use std::fmt::Write as _;

use serde::Serialize;
use tracing::debug;
use ukp_core::{FieldSpec, FieldValue, FormEngine, Product, SectionView, SelectionState};

use crate::error::ApiError;
use crate::state::SchemaState;

/// Product DTO for listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub code: String,
    pub name: String,
    pub machine_type: String,
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        ProductDto {
            code: p.product_code.clone(),
            name: p.product_name.clone(),
            machine_type: p.machine_type.clone(),
        }
    }
}

/// Resolved form of one product, in display order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDto {
    pub product: ProductDto,
    pub sections: Vec<SectionView>,
    pub default_code: Option<String>,
}

/// Result of `ukp catalog`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "camelCase")]
pub enum CatalogView {
    Categories(Vec<String>),
    SubCategories(Vec<String>),
    Products(Vec<ProductDto>),
    Form(FormDto),
}

/// Which part of the catalog to show.
#[derive(Debug, Clone, Default)]
pub struct CatalogRequest {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub product: Option<String>,
}

/// Resolves the catalog view for a request.
///
/// A sub-category without a category (or a product without a sub-category)
/// is rejected with a validation error.
pub fn catalog(schema: &SchemaState, request: &CatalogRequest) -> Result<CatalogView, ApiError> {
    let store = schema.store();
    let mut state = SelectionState::new();

    let Some(category) = request.category.as_deref() else {
        if request.sub_category.is_some() || request.product.is_some() {
            return Err(ApiError::validation("--sub and --product need --category"));
        }
        return Ok(CatalogView::Categories(owned(state.choices(store))));
    };
    state = state.choose_category(store, category)?;

    let Some(sub_category) = request.sub_category.as_deref() else {
        if request.product.is_some() {
            return Err(ApiError::validation("--product needs --sub"));
        }
        return Ok(CatalogView::SubCategories(owned(state.choices(store))));
    };
    state = state.choose_sub_category(store, sub_category)?;

    let Some(product) = request.product.as_deref() else {
        let products = state
            .available_products(store)
            .into_iter()
            .map(ProductDto::from)
            .collect();
        return Ok(CatalogView::Products(products));
    };
    state = state.choose_product(store, product)?;

    let form = state.form(store)?;
    // A product with an empty required default has no default code.
    let default_code = state.generate(store).ok();
    debug!(product, sections = form.sections().len(), "Form resolved");

    Ok(CatalogView::Form(form_dto(&form, default_code)))
}

fn owned(items: Vec<&str>) -> Vec<String> {
    items.into_iter().map(str::to_string).collect()
}

fn form_dto(form: &FormEngine, default_code: Option<String>) -> FormDto {
    FormDto {
        product: form.product().into(),
        sections: form.sections().to_vec(),
        default_code,
    }
}

/// Plain-text rendering for the terminal.
pub fn render(view: &CatalogView) -> String {
    let mut out = String::new();
    match view {
        CatalogView::Categories(items) | CatalogView::SubCategories(items) => {
            for (i, item) in items.iter().enumerate() {
                let _ = writeln!(out, "{:>3}. {}", i + 1, item);
            }
        }
        CatalogView::Products(products) => {
            for (i, p) in products.iter().enumerate() {
                let _ = writeln!(out, "{:>3}. {:<12} {} [{}]", i + 1, p.code, p.name, p.machine_type);
            }
        }
        CatalogView::Form(form) => {
            let _ = writeln!(out, "{} ({})", form.product.name, form.product.code);
            for section in &form.sections {
                let _ = writeln!(out, "\n[{}] {}", section.key, section.label);
                for field in &section.fields {
                    let _ = writeln!(out, "  {}", describe_field(field));
                }
            }
            if let Some(code) = &form.default_code {
                let _ = writeln!(out, "\nDefault code: {code}");
            }
        }
    }
    if out.is_empty() {
        out.push_str("(none)\n");
    }
    out
}

/// One-line summary of a field: key, label, type, constraints and default.
pub fn describe_field(field: &FieldSpec) -> String {
    let mut line = format!(
        "{:<10} {:<28} {:<11} {}",
        field.key,
        field.display_label(),
        field.field_type.as_str(),
        field.encode_key
    );

    if let Some(bounds) = &field.bounds {
        let _ = write!(line, "  {}..{} step {}", bounds.min, bounds.max, bounds.step);
    }
    if field.field_type.has_options() {
        let codes: Vec<&str> = field.options.iter().map(|o| o.value_code.as_str()).collect();
        let _ = write!(line, "  {{{}}}", codes.join(", "));
    }
    if !is_blank(&field.default) {
        let _ = write!(line, "  = {}", field.default);
    }
    line
}

fn is_blank(value: &FieldValue) -> bool {
    match value {
        FieldValue::Number(_) => false,
        other => other.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support::demo_schema;

    fn request(category: Option<&str>, sub: Option<&str>, product: Option<&str>) -> CatalogRequest {
        CatalogRequest {
            category: category.map(str::to_string),
            sub_category: sub.map(str::to_string),
            product: product.map(str::to_string),
        }
    }

    #[test]
    fn test_categories() {
        let view = catalog(&demo_schema(), &CatalogRequest::default()).unwrap();
        let CatalogView::Categories(items) = &view else {
            panic!("expected categories, got {view:?}");
        };
        assert_eq!(items[0], "Rulo Besleme");
        assert!(render(&view).starts_with("  1. Rulo Besleme\n"));
    }

    #[test]
    fn test_products() {
        let view = catalog(
            &demo_schema(),
            &request(Some("Rulo Besleme"), Some("Hafif Grup"), None),
        )
        .unwrap();
        let CatalogView::Products(products) = view else {
            panic!("expected products");
        };
        let codes: Vec<&str> = products.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["RB-SF100", "RB-PN050"]);
    }

    #[test]
    fn test_form_layout() {
        let view = catalog(
            &demo_schema(),
            &request(Some("Rulo Besleme"), Some("Hafif Grup"), Some("RB-SF100")),
        )
        .unwrap();
        let CatalogView::Form(form) = &view else {
            panic!("expected form");
        };
        let sections: Vec<&str> = form.sections.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(sections, vec!["GENEL", "OLCU"]);
        assert_eq!(
            form.default_code.as_deref(),
            Some("UKP-V1-S1RB-S2HG-PRDRB-SF100-CLRRAL7035-V400-OPTSNS-W0300-T020")
        );

        let text = render(&view);
        assert!(text.contains("[OLCU] Ölçüler"));
        assert!(text.contains("{RAL7035, RAL5010, RAL3000}"));
    }

    #[test]
    fn test_unknown_choice_is_transition_error() {
        let err = catalog(&demo_schema(), &request(Some("Diğer"), None, None)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidTransition);
    }

    #[test]
    fn test_product_without_sub() {
        let err = catalog(&demo_schema(), &request(Some("Rulo Besleme"), None, Some("RB-SF100")))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_json_shape() {
        let view = catalog(&demo_schema(), &request(Some("Plaka Besleme"), None, None)).unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["kind"], "subCategories");
        assert_eq!(json["items"][0], "Destacker");
    }
}
