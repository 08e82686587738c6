use image::{Rgba, RgbaImage};
use qrcodegen::{QrCode, QrCodeEcc, QrSegment, Version};
use serde::{Deserialize, Serialize};

use crate::color;
use crate::error::AppError;

/// Byte capacity of a version 40 symbol at the lowest error correction.
/// Anything longer cannot fit no matter which version is selected.
pub const MAX_CAPACITY_BYTES: usize = 2953;

/// Upper bound on the output raster's edge length in pixels. A version 40
/// symbol at the default scale is under 2000 pixels wide; anything near
/// this limit is a bad parameter, not a real request.
pub const MAX_IMAGE_DIMENSION: u32 = 8192;

/// Error-correction level, as shown in the UI dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum EccLevel {
    L,
    #[default]
    M,
    Q,
    H,
}

impl EccLevel {
    fn to_qrcodegen(self) -> QrCodeEcc {
        match self {
            EccLevel::L => QrCodeEcc::Low,
            EccLevel::M => QrCodeEcc::Medium,
            EccLevel::Q => QrCodeEcc::Quartile,
            EccLevel::H => QrCodeEcc::High,
        }
    }
}

/// Symbol version selection: automatic (smallest that fits) or a fixed
/// version 1..=40.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionSpec {
    #[default]
    Auto,
    Fixed(u8),
}

/// The version dropdown sends strings ("Auto", "1".."40"); plain JSON
/// numbers are accepted too so programmatic callers don't have to
/// stringify.
impl<'de> Deserialize<'de> for VersionSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        let out_of_range = |v: &dyn std::fmt::Display| {
            serde::de::Error::custom(format!("version {} is outside 1-40", v))
        };

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) if (1..=40).contains(&n) => Ok(VersionSpec::Fixed(n as u8)),
            Raw::Number(n) => Err(out_of_range(&n)),
            Raw::Text(s) => {
                let trimmed = s.trim();
                if trimmed.eq_ignore_ascii_case("auto") {
                    return Ok(VersionSpec::Auto);
                }
                match trimmed.parse::<u8>() {
                    Ok(n) if (1..=40).contains(&n) => Ok(VersionSpec::Fixed(n)),
                    _ => Err(out_of_range(&format!("{:?}", s))),
                }
            }
        }
    }
}

/// Everything the Generate action collects from the UI. Fields the
/// frontend omits fall back to the stock defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrRequest {
    pub text: String,
    pub ecc: EccLevel,
    pub version: VersionSpec,
    pub scale: u32,
    pub border: u32,
    pub foreground: String,
    pub background: String,
    pub logo_path: Option<String>,
}

impl Default for QrRequest {
    fn default() -> Self {
        QrRequest {
            text: String::new(),
            ecc: EccLevel::M,
            version: VersionSpec::Auto,
            scale: 10,
            border: 4,
            foreground: "#000000".to_string(),
            background: "#FFFFFF".to_string(),
            logo_path: None,
        }
    }
}

/// A freshly encoded QR raster plus the version the encoder settled on.
pub struct EncodedQr {
    pub image: RgbaImage,
    pub version: u8,
}

/// Encodes the request into an RGBA raster.
///
/// Automatic version selection picks the smallest symbol that fits the
/// text at the requested error-correction level; a fixed version is
/// passed through as both the minimum and maximum. ECC boosting is
/// disabled so a follow-up request with the reported version reproduces
/// the exact same pixels.
pub fn encode(request: &QrRequest) -> Result<EncodedQr, AppError> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(AppError::MissingInput);
    }
    if request.scale == 0 {
        return Err(AppError::InvalidParameter {
            field: "scale",
            reason: "must be at least 1".to_string(),
        });
    }

    let foreground = color::parse_hex(&request.foreground)?;
    let background = color::parse_hex(&request.background)?;

    let (min_version, max_version) = match request.version {
        VersionSpec::Auto => (Version::MIN, Version::MAX),
        VersionSpec::Fixed(v) => {
            if !(1..=40).contains(&v) {
                return Err(AppError::InvalidParameter {
                    field: "version",
                    reason: format!("{} is outside 1-40", v),
                });
            }
            (Version::new(v), Version::new(v))
        }
    };

    let segments = QrSegment::make_segments(text);
    let qr = QrCode::encode_segments_advanced(
        &segments,
        request.ecc.to_qrcodegen(),
        min_version,
        max_version,
        None,
        false,
    )
    .map_err(|e| AppError::EncodingCapacity(e.to_string()))?;

    // IPC can deliver arbitrary scale/border values; reject anything
    // whose raster would wrap u32 or blow past the dimension cap.
    let size = qr.size() as u32;
    request
        .border
        .checked_mul(2)
        .and_then(|b| b.checked_add(size))
        .and_then(|modules| modules.checked_mul(request.scale))
        .filter(|dimension| *dimension <= MAX_IMAGE_DIMENSION)
        .ok_or(AppError::InvalidParameter {
            field: "scale/border",
            reason: format!("output image would exceed {} pixels", MAX_IMAGE_DIMENSION),
        })?;

    Ok(EncodedQr {
        image: rasterize(&qr, request.scale, request.border, foreground, background),
        version: qr.version().value(),
    })
}

/// Blits the module grid into an RGBA buffer: `scale` pixels per module,
/// `border` background modules of quiet zone on every edge.
fn rasterize(qr: &QrCode, scale: u32, border: u32, fg: Rgba<u8>, bg: Rgba<u8>) -> RgbaImage {
    let size = qr.size() as u32;
    let dimension = (size + border * 2) * scale;
    let mut img = RgbaImage::from_pixel(dimension, dimension, bg);

    for y in 0..size {
        for x in 0..size {
            if qr.get_module(x as i32, y as i32) {
                let px = (x + border) * scale;
                let py = (y + border) * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        img.put_pixel(px + dx, py + dy, fg);
                    }
                }
            }
        }
    }

    img
}

/// Result of the lightweight pre-flight check the frontend runs while the
/// user types.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrValidation {
    pub valid: bool,
    pub message: String,
}

/// Cheap input validation that never touches the encoder. Capacity is
/// checked against the absolute version-40 limit; the exact fit for the
/// chosen ECC/version is only known at encode time.
pub fn validate_input(text: &str) -> QrValidation {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        QrValidation {
            valid: false,
            message: "Text is empty".to_string(),
        }
    } else if trimmed.len() > MAX_CAPACITY_BYTES {
        QrValidation {
            valid: false,
            message: format!(
                "Text is {} bytes; a QR code holds at most {}",
                trimmed.len(),
                MAX_CAPACITY_BYTES
            ),
        }
    } else {
        QrValidation {
            valid: true,
            message: String::new(),
        }
    }
}
