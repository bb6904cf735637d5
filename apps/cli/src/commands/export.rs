//! # Export
//!
//! Writes a long code to a UTF-8 text file, the CLI counterpart of the
//! download button, and its QR symbol to a PNG file.

use std::fs;
use std::path::Path;

use tracing::info;

use super::qr::render_qr;
use crate::error::ApiError;

fn create_parent(path: &Path) -> Result<(), ApiError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Writes `code` to `path`, creating missing parent directories.
///
/// The file holds the code alone, without a trailing newline.
pub fn export_code(code: &str, path: &Path) -> Result<(), ApiError> {
    create_parent(path)?;
    fs::write(path, code)?;
    info!(path = %path.display(), "Long code exported");
    Ok(())
}

/// Writes the QR symbol of `code` to `path` as PNG.
pub fn export_qr(code: &str, path: &Path) -> Result<(), ApiError> {
    let png = render_qr(code)?;
    create_parent(path)?;
    fs::write(path, png)?;
    info!(path = %path.display(), "QR image exported");
    Ok(())
}
