use data_encoding::BASE64;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// PNG-encodes an image into memory.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, AppError> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| AppError::Image(e.to_string()))?;
    Ok(buf)
}

/// Builds the `data:image/png;base64,...` URL the webview preview shows.
/// The webview drops the image element's data as soon as it is replaced,
/// so the authoritative copy always stays in `SessionState`.
pub fn data_url(image: &RgbaImage) -> Result<String, AppError> {
    let png = encode_png(image)?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(&png)))
}

/// Writes the image to disk as PNG, appending the `.png` extension when
/// the chosen path has none (the save dialog's default-extension
/// behavior). Returns the path actually written.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<PathBuf, AppError> {
    let mut target = path.to_path_buf();
    if target.extension().is_none() {
        target.set_extension("png");
    }

    image
        .save(&target)
        .map_err(|e| AppError::FileWrite(format!("{}: {}", target.display(), e)))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::fs;

    fn checkerboard() -> RgbaImage {
        RgbaImage::from_fn(32, 32, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        })
    }

    #[test]
    fn data_url_round_trips_through_base64() {
        let img = checkerboard();
        let url = data_url(&img).unwrap();

        let payload = url.strip_prefix("data:image/png;base64,").unwrap();
        let png = BASE64.decode(payload.as_bytes()).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), 32);
        assert_eq!(decoded.height(), 32);
    }

    #[test]
    fn save_appends_png_extension_when_missing() {
        let dir = std::env::temp_dir().join("qr_studio_save_tests");
        fs::create_dir_all(&dir).unwrap();

        let saved = save_png(&checkerboard(), &dir.join("no_extension")).unwrap();
        assert_eq!(saved.extension().and_then(|e| e.to_str()), Some("png"));
        assert!(saved.exists());

        let _ = fs::remove_file(saved);
    }

    #[test]
    fn save_keeps_an_explicit_extension() {
        let dir = std::env::temp_dir().join("qr_studio_save_tests");
        fs::create_dir_all(&dir).unwrap();

        let target = dir.join("explicit.png");
        let saved = save_png(&checkerboard(), &target).unwrap();
        assert_eq!(saved, target);

        let _ = fs::remove_file(saved);
    }

    #[test]
    fn save_into_missing_directory_fails_with_write_error() {
        let target = std::env::temp_dir()
            .join("qr_studio_no_such_dir")
            .join("deeper")
            .join("qr.png");
        let result = save_png(&checkerboard(), &target);
        assert!(matches!(result, Err(AppError::FileWrite(_))));
    }
}
