use serde::Serialize;
use std::path::PathBuf;

use crate::error::AppError;
use crate::logo;
use crate::preview;
use crate::qr;
use crate::state::{GeneratedImage, SessionState};

pub type CommandResult<T> = Result<T, AppError>;

/// What the frontend needs to refresh the preview pane after a Generate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPreview {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
    /// The symbol version the encoder resolved (equals the requested one
    /// when it was fixed).
    pub version: u8,
    /// Set when the QR itself succeeded but the logo overlay did not;
    /// shown as a non-fatal notice while the plain QR stays usable.
    pub logo_error: Option<String>,
}

/// Generates a QR code from the collected UI parameters, stores it as the
/// current image, and returns the preview payload.
///
/// Any failure before the store step leaves the previously stored image
/// (and thus the preview and Save) untouched.
#[tauri::command]
pub async fn generate_qr(
    request: qr::QrRequest,
    state: tauri::State<'_, SessionState>,
) -> CommandResult<QrPreview> {
    log::debug!(
        "generate_qr: ecc={:?} version={:?} scale={} border={} logo={}",
        request.ecc,
        request.version,
        request.scale,
        request.border,
        request.logo_path.is_some()
    );

    let qr::EncodedQr { mut image, version } = qr::encode(&request)?;

    // A bad logo never cancels the generation itself: keep the plain QR
    // and report the problem alongside it.
    let logo_error = match request.logo_path.as_deref() {
        Some(path) if !path.trim().is_empty() => logo::overlay_logo(&mut image, path)
            .err()
            .map(|e| e.to_string()),
        _ => None,
    };
    if let Some(err) = &logo_error {
        log::warn!("logo overlay failed: {}", err);
    }

    let data_url = preview::data_url(&image)?;
    let (width, height) = image.dimensions();
    log::info!("generated {}x{} QR code, version {}", width, height, version);

    *state.current.lock().unwrap() = Some(GeneratedImage { image, version });

    Ok(QrPreview {
        data_url,
        width,
        height,
        version,
        logo_error,
    })
}

/// Looks up the stored image; Save before any successful Generate is the
/// one place `NoImage` can surface.
pub(crate) fn current_image(slot: &Option<GeneratedImage>) -> CommandResult<&GeneratedImage> {
    slot.as_ref().ok_or(AppError::NoImage)
}

/// Writes the current image to the path chosen in the save dialog.
/// Returns the path actually written so the frontend can report it.
#[tauri::command]
pub async fn save_qr(
    path: String,
    state: tauri::State<'_, SessionState>,
) -> CommandResult<String> {
    let guard = state.current.lock().unwrap();
    let current = current_image(&guard)?;

    let saved = preview::save_png(&current.image, &PathBuf::from(path))?;
    log::info!(
        "saved version {} QR code to {}",
        current.version,
        saved.display()
    );
    Ok(saved.display().to_string())
}

/// Pre-flight check the frontend runs while the user types.
#[tauri::command]
pub async fn validate_qr_input(text: String) -> CommandResult<qr::QrValidation> {
    Ok(qr::validate_input(&text))
}

/// Drops the current image; Save reports `NoImage` again afterwards.
#[tauri::command]
pub async fn clear_qr(state: tauri::State<'_, SessionState>) -> CommandResult<()> {
    state.current.lock().unwrap().take();
    Ok(())
}
