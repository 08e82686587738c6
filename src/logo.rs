use image::{imageops, imageops::FilterType, RgbaImage};
use std::path::Path;

use crate::error::AppError;

/// Fraction of the QR width the logo covers.
const LOGO_RATIO: f64 = 0.3;

/// Pastes a logo file into the center of a generated QR image.
///
/// The logo is resized to 30% of the QR width as a square; non-square
/// logos get stretched rather than letterboxed. The paste is
/// alpha-blended, so fully transparent logo
/// regions leave the modules underneath untouched. Keep the
/// error-correction level at Q or H when covering this much of the
/// symbol.
pub fn overlay_logo(qr: &mut RgbaImage, path: &str) -> Result<(), AppError> {
    let logo = image::open(Path::new(path))
        .map_err(|e| AppError::LogoLoad(format!("{}: {}", path, e)))?
        .to_rgba8();

    let logo_size = (f64::from(qr.width()) * LOGO_RATIO).round() as u32;
    let logo = imageops::resize(&logo, logo_size, logo_size, FilterType::Lanczos3);

    let x = (qr.width() - logo_size) / 2;
    let y = (qr.height() - logo_size) / 2;
    imageops::overlay(qr, &logo, i64::from(x), i64::from(y));
    Ok(())
}
