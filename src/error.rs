use serde::Serialize;

/// Application-level error type.
///
/// Every `#[tauri::command]` returns `Result<T, AppError>`, so the frontend
/// always receives one consistent, human-readable error string to show in a
/// modal. None of these are fatal: the window stays usable after any failure
/// and the user simply corrects the input and re-triggers the action.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Generate was requested with empty or whitespace-only text.
    #[error("Please provide some text or URL to encode.")]
    MissingInput,

    /// A request field was outside its valid domain (the UI normally
    /// constrains these, but the backend still checks).
    #[error("Invalid {field}: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    /// Malformed foreground/background color value.
    #[error("Invalid color {0:?}: expected #RGB or #RRGGBB")]
    InvalidColor(String),

    /// The text does not fit the selected version (or any version, when
    /// automatic) at the requested error-correction level.
    #[error("Failed to generate QR code: {0}")]
    EncodingCapacity(String),

    /// Logo file missing, unreadable, or not a supported image format.
    #[error("Failed to embed logo: {0}")]
    LogoLoad(String),

    /// In-memory raster/PNG processing failed.
    #[error("Image processing failed: {0}")]
    Image(String),

    /// Save was requested before any QR code was generated.
    #[error("No QR code has been generated.")]
    NoImage,

    /// Writing the output file failed (permissions, disk full, bad path).
    #[error("Could not save the file: {0}")]
    FileWrite(String),
}

/// Tauri IPC requires return values to implement `Serialize`.
/// Errors cross the boundary as their display string.
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
