//! # Session State
//!
//! One user's walk through the wizard.
//!
//! The core state machine is a value type: each transition returns a new
//! [`SelectionState`]. This wrapper swaps the new value in only when the
//! transition succeeds, so a rejected choice leaves the session untouched.
//!
//! ```text
//! SessionState::choose("Rulo Besleme")
//!      │
//!      ▼
//! selection.choose_category(store, ..) ──► Err ──► state unchanged
//!      │
//!      ▼ Ok(next)
//! self.selection = next
//! ```

use std::sync::Arc;

use tracing::debug;
use ukp_core::{
    CoreResult, FieldValue, FormEngine, SchemaStore, SelectionState, Stage, TransitionError,
    ValidationError,
};

/// A single session over a shared schema.
#[derive(Debug, Clone)]
pub struct SessionState {
    store: Arc<SchemaStore>,
    selection: SelectionState,
}

impl SessionState {
    pub fn new(store: Arc<SchemaStore>) -> Self {
        SessionState {
            store,
            selection: SelectionState::new(),
        }
    }

    pub fn store(&self) -> &SchemaStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn stage(&self) -> Stage {
        self.selection.stage()
    }

    /// Choice set of the current stage.
    pub fn choices(&self) -> Vec<&str> {
        self.selection.choices(&self.store)
    }

    /// Applies the choice for whichever stage the session is in.
    pub fn choose(&mut self, choice: &str) -> Result<(), TransitionError> {
        let next = match self.selection.stage() {
            Stage::Category => self.selection.choose_category(&self.store, choice)?,
            Stage::SubCategory => self.selection.choose_sub_category(&self.store, choice)?,
            Stage::Product => self.selection.choose_product(&self.store, choice)?,
        };
        self.selection = next;
        Ok(())
    }

    pub fn back(&mut self) -> Result<(), TransitionError> {
        self.selection = self.selection.back()?;
        Ok(())
    }

    pub fn start_over(&mut self) {
        debug!(stage = %self.selection.stage(), "Starting over");
        self.selection = self.selection.start_over();
    }

    pub fn form(&self) -> CoreResult<FormEngine> {
        self.selection.form(&self.store)
    }

    /// Sets a field from raw text input.
    pub fn set_input(&mut self, key: &str, raw: &str) -> CoreResult<()> {
        let form = self.form()?;
        let spec = form.field(key).ok_or_else(|| ValidationError::UnknownField {
            field: key.to_string(),
        })?;
        let value = spec.parse_input(raw)?;
        self.set_value(key, value)
    }

    pub fn set_value(&mut self, key: &str, value: FieldValue) -> CoreResult<()> {
        self.selection = self.selection.with_value(&self.store, key, value)?;
        Ok(())
    }

    /// Unsets a field so it emits no token.
    pub fn clear(&mut self, key: &str) -> CoreResult<()> {
        self.selection = self.selection.without_value(&self.store, key)?;
        Ok(())
    }

    pub fn generate(&self) -> CoreResult<String> {
        self.selection.generate(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::demo_schema;

    fn session() -> SessionState {
        demo_schema().session()
    }

    fn at_product(session: &mut SessionState) {
        session.choose("Rulo Besleme").unwrap();
        session.choose("Hafif Grup").unwrap();
        session.choose("RB-SF100").unwrap();
    }

    #[test]
    fn test_rejected_choice_keeps_state() {
        let mut session = session();
        session.choose("Rulo Besleme").unwrap();
        let before = session.selection().clone();

        assert!(session.choose("Yok Grup").is_err());
        assert_eq!(session.selection(), &before);
    }

    #[test]
    fn test_back_and_start_over() {
        let mut session = session();
        session.choose("Plaka Besleme").unwrap();
        session.back().unwrap();
        assert_eq!(session.stage(), Stage::Category);
        assert!(session.back().is_err());

        at_product(&mut session);
        session.start_over();
        assert_eq!(session.stage(), Stage::Category);
        assert!(session.selection().product().is_none());
    }

    #[test]
    fn test_set_input_and_generate() {
        let mut session = session();
        at_product(&mut session);
        session.set_input("VOLTAJ", "2").unwrap();
        session.set_input("GENISLIK", "450").unwrap();
        session.set_input("NOT", "acil").unwrap();

        assert_eq!(
            session.generate().unwrap(),
            "UKP-V1-S1RB-S2HG-PRDRB-SF100-CLRRAL7035-V230-OPTSNS-NTACIL-W0450-T020"
        );
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let mut session = session();
        at_product(&mut session);
        let before = session.selection().clone();

        assert!(session.set_input("GENISLIK", "9000").is_err());
        assert!(session.set_input("GENISLIK", "abc").is_err());
        assert!(session.set_input("YOK", "1").is_err());
        assert_eq!(session.selection(), &before);
    }

    #[test]
    fn test_cleared_required_field_blocks_generate() {
        let mut session = session();
        at_product(&mut session);
        session.clear("OPSIYON").unwrap();
        session.clear("RENK").unwrap();

        let err = session.generate().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Renk is required");
    }
}
