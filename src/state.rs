use image::RgbaImage;
use std::sync::Mutex;

/// The most recent generation result: the composed raster (QR plus any
/// logo overlay) and the symbol version the encoder resolved.
pub struct GeneratedImage {
    pub image: RgbaImage,
    pub version: u8,
}

/// Global runtime state of the application.
///
/// Holds the single current QR image while the window is open. It is the
/// only piece of state shared between Generate, the preview, and Save:
/// - `Mutex`: commands run off the webview thread, so access is guarded.
/// - `Option`: `None` until the first successful Generate; replaced
///   wholesale on each later one.
pub struct SessionState {
    pub current: Mutex<Option<GeneratedImage>>,
}

impl SessionState {
    pub fn new() -> Self {
        SessionState {
            current: Mutex::new(None),
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
