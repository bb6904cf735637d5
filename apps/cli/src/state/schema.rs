//! # Schema State
//!
//! The loaded schema, shared read-only by every session of the process.

use std::sync::Arc;

use ukp_core::SchemaStore;
use ukp_schema::{load_schema, SchemaSource, SourceResult};

use super::SessionState;

/// Holds the validated schema and where it came from.
#[derive(Debug, Clone)]
pub struct SchemaState {
    store: Arc<SchemaStore>,
    source: SchemaSource,
}

impl SchemaState {
    /// Loads and validates the schema. Any failure is fatal to startup.
    pub fn load(source: SchemaSource) -> SourceResult<Self> {
        let store = load_schema(&source)?;
        Ok(SchemaState {
            store: Arc::new(store),
            source,
        })
    }

    pub fn store(&self) -> &SchemaStore {
        &self.store
    }

    pub fn source(&self) -> &SchemaSource {
        &self.source
    }

    /// Starts a fresh stage-1 session over this schema.
    pub fn session(&self) -> SessionState {
        SessionState::new(Arc::clone(&self.store))
    }
}
