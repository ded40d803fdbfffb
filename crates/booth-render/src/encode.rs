//! Encoded images: PNG payloads carried as base64 data URIs.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::{RenderError, Result};

const PNG_PREFIX: &str = "data:image/png;base64,";

/// An exportable image reference.
///
/// Normally a `data:image/png;base64,...` URI. Render calls that degrade
/// return either the caller's source reference unchanged or the empty string
/// (the drawing surface could not be obtained).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedImage(String);

impl EncodedImage {
    /// The empty result.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Hand a source reference back unchanged.
    pub fn passthrough(source: &str) -> Self {
        Self(source.to_owned())
    }

    /// Encode `image` losslessly as a PNG data URI.
    pub fn from_rgba(image: &RgbaImage) -> Result<Self> {
        let bytes = png_bytes(image)?;
        Ok(Self(format!("{PNG_PREFIX}{}", STANDARD.encode(bytes))))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Whether this is an inline data URI (as opposed to a passed-through path).
    pub fn is_data_uri(&self) -> bool {
        self.0.starts_with("data:")
    }

    /// Raw bytes of an inline data URI.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        decode_data_uri(&self.0).map(|(_, bytes)| bytes)
    }
}

impl std::fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EncodedImage> for String {
    fn from(value: EncodedImage) -> Self {
        value.0
    }
}

pub(crate) fn png_bytes(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, ImageFormat::Png)?;
    Ok(cursor.into_inner())
}

/// Split a base64 data URI into its media type and decoded payload.
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>)> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| RenderError::InvalidDataUri("missing data: scheme".into()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| RenderError::InvalidDataUri("missing payload separator".into()))?;
    let media_type = meta
        .strip_suffix(";base64")
        .ok_or_else(|| RenderError::InvalidDataUri("only base64 payloads are supported".into()))?;
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| RenderError::InvalidDataUri(e.to_string()))?;
    Ok((media_type.to_owned(), bytes))
}
