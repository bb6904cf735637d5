//! # State Module
//!
//! Application state for the `ukp` binary.
//!
//! Like a desktop shell managing several small states instead of one big
//! `AppState`, each command declares exactly which state it needs:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        main()                                   │   │
//! │  │  let config = ConfigState::from_env()?;                         │   │
//! │  │  let schema = SchemaState::load(config.resolve_source(..)?)?;   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ ConfigState  │  │ SchemaState  │  │  SessionState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │ schema path  │  │ Arc<Schema   │  │  Arc<SchemaStore>│              │
//! │  │ export file  │  │   Store>     │  │  SelectionState  │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  • ConfigState: read-only after startup                                │
//! │  • SchemaState: immutable after load, shared by every session          │
//! │  • SessionState: owned by one wizard run, never shared                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod schema;
mod session;

pub use config::{ConfigError, ConfigState, DEFAULT_EXPORT_FILE};
pub use schema::SchemaState;
pub use session::SessionState;
