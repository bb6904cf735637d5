//! # Command Line
//!
//! Argument definitions for the `ukp` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::catalog::CatalogRequest;
use crate::commands::encode::EncodeRequest;

#[derive(Debug, Parser)]
#[command(name = "ukp", version, about = "Long-code configurator for data-defined products")]
pub struct Cli {
    /// Schema workbook (.xlsx/.xls/.ods) or JSON document; overrides UKP_SCHEMA_PATH
    #[arg(long, global = true, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive walk through category, sub-category, product and form (default)
    Wizard {
        /// Write the generated code here instead of asking
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Also write the code's QR symbol here as PNG
        #[arg(long, value_name = "FILE")]
        qr: Option<PathBuf>,
    },

    /// Generate a long code without prompting
    Encode {
        #[arg(long)]
        category: String,

        #[arg(long = "sub")]
        sub_category: String,

        #[arg(long)]
        product: String,

        /// Field value as KEY=VALUE; multiselect values are comma separated
        #[arg(long = "set", value_name = "KEY=VALUE")]
        assignments: Vec<String>,

        /// Also write the code to this file
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Also write the code's QR symbol here as PNG
        #[arg(long, value_name = "FILE")]
        qr: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the choices of the next stage, or a product's form
    Catalog {
        #[arg(long)]
        category: Option<String>,

        #[arg(long = "sub", requires = "category")]
        sub_category: Option<String>,

        #[arg(long, requires = "sub_category")]
        product: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Wizard {
            out: None,
            qr: None,
        }
    }
}

impl Command {
    /// Builds the catalog request, if this is `catalog`.
    pub fn catalog_request(&self) -> Option<CatalogRequest> {
        match self {
            Command::Catalog {
                category,
                sub_category,
                product,
                ..
            } => Some(CatalogRequest {
                category: category.clone(),
                sub_category: sub_category.clone(),
                product: product.clone(),
            }),
            _ => None,
        }
    }

    /// Builds the encode request, if this is `encode`.
    pub fn encode_request(&self) -> Option<EncodeRequest> {
        match self {
            Command::Encode {
                category,
                sub_category,
                product,
                assignments,
                ..
            } => Some(EncodeRequest {
                category: category.clone(),
                sub_category: sub_category.clone(),
                product: product.clone(),
                assignments: assignments.clone(),
            }),
            _ => None,
        }
    }
}
