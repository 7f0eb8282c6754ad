//! Image decoding, lossless encoding and data URIs.

use base64::{engine::general_purpose::STANDARD, Engine};
use colorize_common::{ColorizeError, ColorizeResult, RgbaBuffer};
use image::ImageFormat;

use crate::png::create_png;

const DATA_URI_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// An encoded raster image (PNG, JPEG, ...), opaque to the pipeline until
/// decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` URI.
    ///
    /// Only the payload is kept; the declared MIME type is not trusted and
    /// the format is sniffed again on decode.
    pub fn from_data_uri(uri: &str) -> ColorizeResult<Self> {
        let rest = uri
            .trim()
            .strip_prefix(DATA_URI_PREFIX)
            .ok_or_else(|| ColorizeError::DecodeFailure("not a data URI".to_string()))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| ColorizeError::DecodeFailure("data URI has no payload".to_string()))?;

        if !header.ends_with(BASE64_MARKER) {
            return Err(ColorizeError::DecodeFailure(
                "only base64 data URIs are supported".to_string(),
            ));
        }

        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| ColorizeError::DecodeFailure(format!("invalid base64 payload: {}", e)))?;

        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// MIME type sniffed from the leading bytes.
    pub fn mime_type(&self) -> &'static str {
        match image::guess_format(&self.bytes) {
            Ok(ImageFormat::Png) => "image/png",
            Ok(ImageFormat::Jpeg) => "image/jpeg",
            Ok(ImageFormat::Gif) => "image/gif",
            Ok(ImageFormat::WebP) => "image/webp",
            Ok(ImageFormat::Bmp) => "image/bmp",
            Ok(ImageFormat::Tiff) => "image/tiff",
            _ => "application/octet-stream",
        }
    }

    /// Render as a base64 data URI.
    pub fn to_data_uri(&self) -> String {
        format!(
            "{}{}{},{}",
            DATA_URI_PREFIX,
            self.mime_type(),
            BASE64_MARKER,
            STANDARD.encode(&self.bytes)
        )
    }
}

/// Decode any supported raster format into a straight-alpha RGBA buffer.
pub fn decode(image: &EncodedImage) -> ColorizeResult<RgbaBuffer> {
    if image.is_empty() {
        return Err(ColorizeError::DecodeFailure("empty input".to_string()));
    }

    let decoded = image::load_from_memory(image.as_bytes())
        .map_err(|e| ColorizeError::DecodeFailure(e.to_string()))?
        .to_rgba8();

    let (width, height) = decoded.dimensions();
    RgbaBuffer::from_raw(width as usize, height as usize, decoded.into_raw())
        .map_err(|e| ColorizeError::DecodeFailure(e.to_string()))
}

/// Encode `buffer` losslessly as PNG.
pub fn encode_png(buffer: &RgbaBuffer) -> ColorizeResult<EncodedImage> {
    create_png(buffer).map(EncodedImage::from_bytes)
}
