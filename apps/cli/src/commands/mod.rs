//! # Commands Module
//!
//! The non-interactive subcommands of `ukp`. The interactive walk lives in
//! [`crate::wizard`].
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── `ukp catalog`: choice sets and form layouts
//! ├── encode.rs   ◄─── `ukp encode`: one-shot long code
//! ├── export.rs   ◄─── Writing the long code (and its QR) to a file
//! └── qr.rs       ◄─── QR symbol as PNG or terminal text
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  $ ukp encode --category "Rulo Besleme" --sub "Hafif Grup" \            │
//! │               --product RB-SF100 --set GENISLIK=450                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  fn encode_once(                                                        │
//! │      schema: &SchemaState,      ◄── Loaded once at startup             │
//! │      request: &EncodeRequest,   ◄── From clap arguments                │
//! │  ) -> Result<String, ApiError>                                          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  stdout: UKP-V1-S1RB-S2HG-PRDRB-SF100-...                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command returns a serializable value so that `--json` can print it
//! as is.

pub mod catalog;
pub mod encode;
pub mod export;
pub mod qr;
