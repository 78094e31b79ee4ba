//! Maps raw automation results into the structured responses the
//! caller expects.
//!
//! The host signals application-level errors by prefixing an otherwise
//! successful stdout with a sentinel string. That convention is fragile
//! by nature, so it lives entirely in this module: the control-script
//! builders reference the constant and everything else sees only
//! [`BridgeResult`].

use std::io::Cursor;
use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageReader};
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::BridgeError;
use crate::osascript::RawOutput;

/// Prefix distinguishing an application-level error from a literal
/// success value on the same textual return channel.
pub const ERROR_SENTINEL: &str = "ERROR:";

/// Screenshots are always re-encoded to this type, even when the
/// capture already matches, to bound payload size for the transport.
pub const SCREENSHOT_MIME_TYPE: &str = "image/jpeg";
pub const SCREENSHOT_JPEG_QUALITY: u8 = 85;

/// Payload of a bridge response: text or a base64-encoded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BridgeContent {
    Text { text: String },
    Image { data: String, mime_type: String },
}

/// The one artifact returned across the bridge boundary. Immutable
/// after construction; built exactly once per invocation.
#[derive(Debug, Clone, Serialize)]
pub struct BridgeResult {
    pub is_error: bool,
    pub content: BridgeContent,
}

impl BridgeResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            is_error: false,
            content: BridgeContent::Text { text: text.into() },
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_error: true,
            content: BridgeContent::Text {
                text: format!("Error: {}", message.into()),
            },
        }
    }

    pub fn image(data: String, mime_type: impl Into<String>) -> Self {
        Self {
            is_error: false,
            content: BridgeContent::Image {
                data,
                mime_type: mime_type.into(),
            },
        }
    }

    /// Text of the response, whatever its flavor. Handy in tests.
    pub fn text_content(&self) -> Option<&str> {
        match &self.content {
            BridgeContent::Text { text } => Some(text),
            BridgeContent::Image { .. } => None,
        }
    }
}

impl From<BridgeError> for BridgeResult {
    fn from(err: BridgeError) -> Self {
        BridgeResult::error(err.to_string())
    }
}

/// Classify the result of a `run` invocation.
///
/// The success flag is exactly `!(exit_code != 0 || stdout starts with
/// the sentinel)`.
pub fn map_run_result(raw: &RawOutput) -> BridgeResult {
    if raw.exit_code != 0 {
        return BridgeError::Process {
            status: raw.exit_code,
            stderr: raw.stderr.trim().to_string(),
        }
        .into();
    }
    let output = raw.stdout.trim();
    if let Some(message) = output.strip_prefix(ERROR_SENTINEL) {
        return BridgeError::HostExecution(message.trim().to_string()).into();
    }
    BridgeResult::text(format!("Script executed successfully\nOutput: {output}"))
}

/// Classify the result of a `view` invocation and, on success, turn the
/// captured file into transport-ready image content.
pub fn map_capture_result(raw: &RawOutput, image_path: &Path) -> BridgeResult {
    if raw.exit_code != 0 {
        return BridgeError::Process {
            status: raw.exit_code,
            stderr: raw.stderr.trim().to_string(),
        }
        .into();
    }
    let output = raw.stdout.trim();
    if let Some(message) = output.strip_prefix(ERROR_SENTINEL) {
        return BridgeError::HostExecution(message.trim().to_string()).into();
    }
    match encode_screenshot(image_path) {
        Ok(data) => BridgeResult::image(data, SCREENSHOT_MIME_TYPE),
        Err(e) => {
            warn!(path = %image_path.display(), error = %e, "screenshot encoding failed");
            e.into()
        }
    }
}

/// Decode the captured PNG, flatten any alpha channel (downstream
/// consumers expect opaque images), re-encode as JPEG at the fixed
/// quality, and base64 the bytes.
fn encode_screenshot(image_path: &Path) -> Result<String, BridgeError> {
    let byte_len = std::fs::metadata(image_path).map(|m| m.len()).unwrap_or(0);
    if byte_len == 0 {
        return Err(BridgeError::CaptureIntegrity(
            image_path.display().to_string(),
        ));
    }

    let decoded = ImageReader::open(image_path)?.decode()?;
    let rgb = decoded.to_rgb8();

    let mut jpeg_data = Vec::new();
    let encoder =
        JpegEncoder::new_with_quality(Cursor::new(&mut jpeg_data), SCREENSHOT_JPEG_QUALITY);
    encoder.write_image(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;

    debug!(
        original_bytes = byte_len,
        encoded_bytes = jpeg_data.len(),
        width = rgb.width(),
        height = rgb.height(),
        "screenshot re-encoded"
    );

    Ok(general_purpose::STANDARD.encode(&jpeg_data))
}
