//! Asynchronous source image loading.
//!
//! A source reference is either a base64 data URI or a filesystem path
//! (optionally `file://`-prefixed). Reading happens on the tokio runtime and
//! decoding on the blocking pool, so many loads can be in flight at once.

use std::path::PathBuf;

use image::RgbaImage;
use tracing::debug;

use crate::encode::decode_data_uri;
use crate::{RenderError, Result};

/// Load and decode `source` into straight-alpha RGBA.
pub async fn load_image(source: &str) -> Result<RgbaImage> {
    let bytes = read_source(source).await?;
    let image = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
        .await
        .map_err(|e| RenderError::Decode(e.to_string()))?
        .map_err(|e| RenderError::Decode(e.to_string()))?
        .to_rgba8();
    debug!(
        width = image.width(),
        height = image.height(),
        "Decoded source image"
    );
    Ok(image)
}

async fn read_source(source: &str) -> Result<Vec<u8>> {
    let source = source.trim();
    if source.is_empty() {
        return Err(RenderError::Decode("empty image reference".into()));
    }
    if source.starts_with("data:") {
        return decode_data_uri(source).map(|(_, bytes)| bytes);
    }
    if source.starts_with("http://") || source.starts_with("https://") || source.starts_with("blob:") {
        return Err(RenderError::Decode(format!(
            "unsupported image reference scheme: {source}"
        )));
    }
    let path = PathBuf::from(source.strip_prefix("file://").unwrap_or(source));
    Ok(tokio::fs::read(&path).await?)
}
