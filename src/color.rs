use image::Rgba;

use crate::error::AppError;

/// Parses a `#RRGGBB` or `#RGB` hex color into an opaque RGBA pixel.
///
/// The color pickers always produce the long form; the short form is
/// accepted because users can type into the swatch fields directly.
pub fn parse_hex(input: &str) -> Result<Rgba<u8>, AppError> {
    let invalid = || AppError::InvalidColor(input.to_string());

    let digits = input.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let (r, g, b) = match digits.len() {
        6 => (
            u8::from_str_radix(&digits[0..2], 16).map_err(|_| invalid())?,
            u8::from_str_radix(&digits[2..4], 16).map_err(|_| invalid())?,
            u8::from_str_radix(&digits[4..6], 16).map_err(|_| invalid())?,
        ),
        3 => {
            // Expand each nibble, e.g. #F0A -> #FF00AA
            let nibble = |i: usize| -> Result<u8, AppError> {
                let n = u8::from_str_radix(&digits[i..i + 1], 16).map_err(|_| invalid())?;
                Ok(n << 4 | n)
            };
            (nibble(0)?, nibble(1)?, nibble(2)?)
        }
        _ => return Err(invalid()),
    };

    Ok(Rgba([r, g, b, 255]))
}
