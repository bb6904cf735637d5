//! # Selection State Machine
//!
//! The per-session record of what the user has chosen so far.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────────────┐ choose_category ┌──────────────┐ choose_sub_category│
//! │   │   Stage 1    │────────────────►│   Stage 2    │──────────────┐     │
//! │   │   Category   │◄────────────────│ SubCategory  │              │     │
//! │   └──────────────┘      back       └──────────────┘              ▼     │
//! │          ▲                                              ┌──────────────┐│
//! │          │                start_over                    │   Stage 3    ││
//! │          └──────────────────────────────────────────────│   Product    ││
//! │                                                         └──────┬───────┘│
//! │                                                  choose_product │ ▲     │
//! │                                                  (resets values)└─┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every transition takes `&self` and returns the next state, so a rejected
//! transition leaves the caller's state exactly as it was.

use serde::Serialize;
use tracing::{debug, info};

use crate::encoder::encode_long_code;
use crate::error::{CoreError, CoreResult, TransitionError, ValidationError};
use crate::form::FormEngine;
use crate::schema::SchemaStore;
use crate::types::{FieldValue, FieldValues, Product, Stage};

/// The session's selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionState {
    stage: Stage,
    category: Option<String>,
    sub_category: Option<String>,
    product: Option<Product>,
    values: FieldValues,
}

impl SelectionState {
    /// A fresh stage-1 state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn sub_category(&self) -> Option<&str> {
        self.sub_category.as_deref()
    }

    pub fn product(&self) -> Option<&Product> {
        self.product.as_ref()
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    /// Copy of this state with everything chosen at or after `stage` cleared.
    fn cleared_to(&self, stage: Stage) -> Self {
        let keep_category = stage > Stage::Category;
        let keep_sub_category = stage > Stage::SubCategory;
        SelectionState {
            stage,
            category: self.category.clone().filter(|_| keep_category),
            sub_category: self.sub_category.clone().filter(|_| keep_sub_category),
            product: None,
            values: FieldValues::new(),
        }
    }

    fn require_stage(&self, action: &str, stage: Stage) -> Result<(), TransitionError> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(TransitionError::wrong_stage(action, self.stage))
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Stage 1 → 2.
    pub fn choose_category(
        &self,
        store: &SchemaStore,
        category: &str,
    ) -> Result<Self, TransitionError> {
        self.require_stage("choose_category", Stage::Category)?;

        let allowed = store.categories();
        if !allowed.iter().any(|c| *c == category) {
            return Err(TransitionError::UnknownCategory {
                category: category.to_string(),
                allowed: allowed.iter().map(|c| c.to_string()).collect(),
            });
        }

        debug!(category, "Category chosen");
        let mut next = self.cleared_to(Stage::SubCategory);
        next.category = Some(category.to_string());
        Ok(next)
    }

    /// Stage 2 → 3.
    pub fn choose_sub_category(
        &self,
        store: &SchemaStore,
        sub_category: &str,
    ) -> Result<Self, TransitionError> {
        self.require_stage("choose_sub_category", Stage::SubCategory)?;
        let category = self.category.as_deref().unwrap_or_default();

        let allowed = store.sub_categories(category);
        if !allowed.iter().any(|s| *s == sub_category) {
            return Err(TransitionError::UnknownSubCategory {
                category: category.to_string(),
                sub_category: sub_category.to_string(),
                allowed: allowed.iter().map(|s| s.to_string()).collect(),
            });
        }

        debug!(category, sub_category, "Sub-category chosen");
        let mut next = self.cleared_to(Stage::Product);
        next.sub_category = Some(sub_category.to_string());
        Ok(next)
    }

    /// Stage 3 → 3. Installs the product and resets the values to its defaults.
    pub fn choose_product(
        &self,
        store: &SchemaStore,
        product_code: &str,
    ) -> Result<Self, TransitionError> {
        self.require_stage("choose_product", Stage::Product)?;
        let category = self.category.as_deref().unwrap_or_default();
        let sub_category = self.sub_category.as_deref().unwrap_or_default();

        let product = store
            .find_product(category, sub_category, product_code)
            .ok_or_else(|| TransitionError::UnknownProduct {
                category: category.to_string(),
                sub_category: sub_category.to_string(),
                product_code: product_code.to_string(),
            })?;

        debug!(product = %product.product_code, "Product chosen");
        let mut next = self.cleared_to(Stage::Product);
        next.values = FormEngine::for_product(store, product).default_values();
        next.product = Some(product.clone());
        Ok(next)
    }

    /// Stage 2 → 1, clearing the category.
    pub fn back(&self) -> Result<Self, TransitionError> {
        self.require_stage("back", Stage::SubCategory)?;
        Ok(self.cleared_to(Stage::Category))
    }

    /// Any stage → 1.
    pub fn start_over(&self) -> Self {
        self.cleared_to(Stage::Category)
    }

    // =========================================================================
    // Form
    // =========================================================================

    /// Choices for the current stage: categories, sub-categories or product codes.
    pub fn choices<'a>(&self, store: &'a SchemaStore) -> Vec<&'a str> {
        match self.stage {
            Stage::Category => store.categories(),
            Stage::SubCategory => store.sub_categories(self.category().unwrap_or_default()),
            Stage::Product => self
                .available_products(store)
                .into_iter()
                .map(|p| p.product_code.as_str())
                .collect(),
        }
    }

    /// Products offered in stage 3; empty in earlier stages.
    pub fn available_products<'a>(&self, store: &'a SchemaStore) -> Vec<&'a Product> {
        match (self.stage, self.category(), self.sub_category()) {
            (Stage::Product, Some(cat), Some(sub)) => store.products(cat, sub),
            _ => Vec::new(),
        }
    }

    /// The form of the chosen product.
    pub fn form(&self, store: &SchemaStore) -> CoreResult<FormEngine> {
        let product = self.product.as_ref().ok_or(CoreError::NoProductSelected)?;
        Ok(FormEngine::for_product(store, product))
    }

    /// Copy of this state with one field value replaced, after validation.
    pub fn with_value(
        &self,
        store: &SchemaStore,
        key: &str,
        value: FieldValue,
    ) -> CoreResult<Self> {
        let form = self.form(store)?;
        let mut next = self.clone();
        form.set_value(&mut next.values, key, value)?;
        Ok(next)
    }

    /// Copy of this state with one field unset. An unset field emits no token.
    pub fn without_value(&self, store: &SchemaStore, key: &str) -> CoreResult<Self> {
        let form = self.form(store)?;
        if form.field(key).is_none() {
            return Err(ValidationError::UnknownField {
                field: key.to_string(),
            }
            .into());
        }
        let mut next = self.clone();
        next.values.remove(key);
        Ok(next)
    }

    /// Encodes the long code of the current selection.
    ///
    /// ## Errors
    /// - [`CoreError::NoProductSelected`] before stage 3 has a product
    /// - [`ValidationError::Required`] for the first empty required field
    pub fn generate(&self, store: &SchemaStore) -> CoreResult<String> {
        let form = self.form(store)?;

        if let Some(missing) = form.missing_required(&self.values).first() {
            return Err(ValidationError::Required {
                field: missing.label.clone(),
            }
            .into());
        }

        let product = form.product();
        let code = encode_long_code(
            &product.category1,
            &product.category2,
            &product.product_code,
            &self.values,
            form.field_schema(),
        );

        info!(product = %product.product_code, code = %code, "Long code generated");
        Ok(code)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
