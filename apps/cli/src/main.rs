//! # UKP Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                             ukp                                         │
//! │                                                                         │
//! │  main.rs ────► parse args, logging, configuration                      │
//! │  lib.rs ─────► schema load, command dispatch                           │
//! │  wizard.rs ──► interactive stages 1 → 3 and the form                    │
//! │  commands/ ──► encode, catalog, export                                 │
//! │                                                                         │
//! │  stdout: long code / listings      stderr: logs and errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use clap::Parser;

use ukp_cli::cli::Cli;
use ukp_cli::state::ConfigState;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    ukp_cli::init_tracing();

    let config = ConfigState::from_env().context("Failed to read UKP_* configuration")?;
    ukp_cli::run(cli, &config)?;
    Ok(())
}
