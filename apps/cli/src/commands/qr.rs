//! # QR Rendering
//!
//! The long code as a QR symbol: PNG bytes for `--qr FILE`, block characters
//! for the terminal.
//!
//! ```text
//! "UKP-V1-..." ──► QrCode ──┬──► Luma<u8> image ──► PNG bytes
//!                           └──► Dense1x2 text (two modules per line)
//! ```

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::render::unicode::Dense1x2;
use qrcode::QrCode;

use crate::error::ApiError;

/// Edge length of one QR module in the PNG, in pixels.
pub const MODULE_PIXELS: u32 = 8;

fn symbol(code: &str) -> Result<QrCode, ApiError> {
    QrCode::new(code.as_bytes())
        .map_err(|e| ApiError::internal(format!("QR encoding failed: {e}")))
}

/// PNG image of the code's QR symbol, quiet zone included.
pub fn render_qr(code: &str) -> Result<Vec<u8>, ApiError> {
    let image = symbol(code)?
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .build();

    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| ApiError::internal(format!("PNG encoding failed: {e}")))?;
    Ok(bytes)
}

/// Block-character rendering for a dark terminal background.
pub fn render_qr_text(code: &str) -> Result<String, ApiError> {
    Ok(symbol(code)?
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .build())
}
