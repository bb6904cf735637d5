//! # UKP CLI Library
//!
//! Terminal front end for the long-code configurator. `main.rs` only parses
//! arguments and calls [`run`]; everything else lives here so it can be tested.
//!
//! ## Module Organization
//! ```text
//! ukp_cli/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── wizard.rs       ◄─── Interactive walk + Presenter trait
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── UKP_* environment configuration
//! │   ├── schema.rs   ◄─── Loaded schema (shared, read-only)
//! │   └── session.rs  ◄─── One user's selection
//! ├── commands/
//! │   ├── catalog.rs  ◄─── `ukp catalog`
//! │   ├── encode.rs   ◄─── `ukp encode`
//! │   ├── export.rs   ◄─── Writing the code to a file
//! │   └── qr.rs       ◄─── QR rendering
//! └── error.rs        ◄─── ApiError for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, writing to stderr             │
//! │     • Default: warn,ukp=info, override with RUST_LOG                    │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • UKP_STATIC_SCHEMA, UKP_SCHEMA_PATH, UKP_EXPORT_FILE               │
//! │                                                                         │
//! │  3. Resolve & Load Schema ────────────────────────────────────────────► │
//! │     • --schema wins, else the static schema if present                  │
//! │     • Any load error aborts here                                        │
//! │                                                                         │
//! │  4. Dispatch ─────────────────────────────────────────────────────────► │
//! │     • wizard (default) / encode / catalog                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;
pub mod wizard;

#[cfg(test)]
pub(crate) mod test_support;

use std::io::{self, Write};

use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use commands::catalog::{catalog, render};
use commands::encode::encode_once;
use commands::export::{export_code, export_qr};
use error::ApiError;
use state::{ConfigState, SchemaState};
use wizard::{offer_export, run_wizard, TerminalPresenter, WizardOutcome};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=ukp_core=trace` - Trace the configurator only
/// - Default: warnings, plus info for the ukp crates
///
/// Logs go to stderr so that stdout carries only the long code.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,ukp=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Loads the schema and runs the requested command.
pub fn run(cli: Cli, config: &ConfigState) -> Result<(), ApiError> {
    let source = config.resolve_source(cli.schema.as_deref())?;
    let schema = SchemaState::load(source)?;
    info!(source = %schema.source(), "Schema ready");

    let command = cli.command.unwrap_or_default();
    let stdout = io::stdout();
    execute(&schema, command, config, &mut stdout.lock())
}

/// Runs one command against a loaded schema.
///
/// `encode` and `catalog` write to `output`; the wizard always talks to the
/// terminal.
pub fn execute<W: Write>(
    schema: &SchemaState,
    command: Command,
    config: &ConfigState,
    output: &mut W,
) -> Result<(), ApiError> {
    match command {
        Command::Wizard { out, qr } => {
            let mut presenter = TerminalPresenter::stdio();
            let mut session = schema.session();

            if let WizardOutcome::Generated(code) = run_wizard(&mut session, &mut presenter)? {
                offer_export(&mut presenter, &code, out.as_deref(), &config.export_file)?;
                if let Some(path) = &qr {
                    export_qr(&code, path)?;
                }
            }
            Ok(())
        }
        Command::Encode {
            ref out,
            ref qr,
            json,
            ..
        } => {
            let request = command
                .encode_request()
                .ok_or_else(|| ApiError::internal("encode arguments missing"))?;
            let result = encode_once(schema, &request)?;

            if let Some(path) = out {
                export_code(&result.code, path)?;
            }
            if let Some(path) = qr {
                export_qr(&result.code, path)?;
            }
            if json {
                print_json(output, &result)
            } else {
                writeln!(output, "{}", result.code)?;
                Ok(())
            }
        }
        Command::Catalog { json, .. } => {
            let request = command
                .catalog_request()
                .ok_or_else(|| ApiError::internal("catalog arguments missing"))?;
            let view = catalog(schema, &request)?;

            if json {
                print_json(output, &view)
            } else {
                write!(output, "{}", render(&view))?;
                Ok(())
            }
        }
    }
}

fn print_json<W: Write, T: Serialize>(output: &mut W, value: &T) -> Result<(), ApiError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::internal(format!("JSON output failed: {e}")))?;
    writeln!(output, "{text}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support::demo_schema;
    use std::path::PathBuf;
    use ukp_schema::demo::demo_workbook;

    fn encode_command(out: Option<PathBuf>, json: bool) -> Command {
        Command::Encode {
            category: "Plaka Besleme".to_string(),
            sub_category: "Transfer".to_string(),
            product: "PB-TR100".to_string(),
            assignments: vec!["TABAKA=1250".to_string()],
            out,
            qr: None,
            json,
        }
    }

    #[test]
    fn test_execute_encode_with_qr() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uzun_kod.png");
        let mut command = encode_command(None, false);
        if let Command::Encode { qr, .. } = &mut command {
            *qr = Some(path.clone());
        }

        let mut output = Vec::new();
        execute(&demo_schema(), command, &ConfigState::default(), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "UKP-V1-S1PB-S2TRF-PRDPB-TR100-L1250\n"
        );
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }

    #[test]
    fn test_execute_encode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codes/uzun_kod.txt");
        let mut output = Vec::new();

        execute(
            &demo_schema(),
            encode_command(Some(path.clone()), false),
            &ConfigState::default(),
            &mut output,
        )
        .unwrap();

        let code = "UKP-V1-S1PB-S2TRF-PRDPB-TR100-L1250";
        assert_eq!(String::from_utf8(output).unwrap(), format!("{code}\n"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), code);
    }

    #[test]
    fn test_execute_encode_json() {
        let mut output = Vec::new();
        execute(
            &demo_schema(),
            encode_command(None, true),
            &ConfigState::default(),
            &mut output,
        )
        .unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["code"], "UKP-V1-S1PB-S2TRF-PRDPB-TR100-L1250");
        assert_eq!(json["product"], "PB-TR100");
    }

    #[test]
    fn test_execute_catalog() {
        let mut output = Vec::new();
        let command = Command::Catalog {
            category: Some("Rulo Besleme".to_string()),
            sub_category: None,
            product: None,
            json: false,
        };
        execute(&demo_schema(), command, &ConfigState::default(), &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "  1. Hafif Grup\n  2. Ağır Grup\n"
        );
    }

    #[test]
    fn test_run_with_schema_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.xlsx");
        demo_workbook().unwrap().save(&path).unwrap();

        let config = ConfigState {
            static_schema: false,
            ..ConfigState::default()
        };
        let cli = Cli {
            schema: Some(path),
            command: Some(Command::Catalog {
                category: None,
                sub_category: None,
                product: None,
                json: false,
            }),
        };
        run(cli, &config).unwrap();
    }

    #[test]
    fn test_run_without_source() {
        let config = ConfigState {
            static_schema: false,
            ..ConfigState::default()
        };
        let cli = Cli {
            schema: None,
            command: None,
        };
        let err = run(cli, &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_run_with_broken_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, r#"{"products": []}"#).unwrap();

        let cli = Cli {
            schema: Some(path),
            command: None,
        };
        let err = run(cli, &ConfigState::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::SchemaError);
        assert_eq!(err.message, "Missing table 'sections'");
    }
}
