//! Animated GIF assembly.
//!
//! The engine renders each frame; turning the finished frames into an
//! animation is delegated to a [`GifEncoderBackend`]. Backends report failure
//! through [`GifOutcome`] instead of an error so a caller can offer a retry.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::codecs::gif::{GifEncoder, Repeat};
use image::imageops::{self, FilterType};
use image::{Delay, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::encode::{EncodedImage, decode_data_uri};
use crate::{RenderError, Result};

/// Animation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GifOptions {
    pub width: u32,
    pub height: u32,
    pub frame_delay_seconds: f32,
    /// Number of frames to use; `None` uses every frame supplied.
    pub frame_count: Option<usize>,
}

impl Default for GifOptions {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            frame_delay_seconds: 0.5,
            frame_count: None,
        }
    }
}

/// Result of a GIF assembly attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GifOutcome {
    pub error: bool,
    #[serde(rename = "errorMsg")]
    pub error_message: String,
    pub image: EncodedImage,
}

impl GifOutcome {
    pub fn success(image: EncodedImage) -> Self {
        Self {
            error: false,
            error_message: String::new(),
            image,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: true,
            error_message: message.into(),
            image: EncodedImage::empty(),
        }
    }
}

/// Turns an ordered list of rendered frames into an animated image.
pub trait GifEncoderBackend: Send + Sync {
    fn encode(&self, frames: &[EncodedImage], options: &GifOptions) -> GifOutcome;
}

/// Backend built on the `image` crate's GIF encoder. Loops forever.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageGifEncoder;

impl GifEncoderBackend for ImageGifEncoder {
    fn encode(&self, frames: &[EncodedImage], options: &GifOptions) -> GifOutcome {
        match encode_gif(frames, options) {
            Ok(image) => GifOutcome::success(image),
            Err(e) => {
                warn!(error = %e, "GIF assembly failed");
                GifOutcome::failure(e.to_string())
            }
        }
    }
}

fn encode_gif(frames: &[EncodedImage], options: &GifOptions) -> Result<EncodedImage> {
    let count = options.frame_count.unwrap_or(frames.len()).min(frames.len());
    if count < 2 {
        return Err(RenderError::Gif(format!(
            "at least two frames are required, got {count}"
        )));
    }
    if options.width == 0 || options.height == 0 {
        return Err(RenderError::Gif(format!(
            "invalid size {}x{}",
            options.width, options.height
        )));
    }

    let delay_ms = (options.frame_delay_seconds.max(0.0) * 1000.0).round() as u32;
    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(Cursor::new(&mut buf));
        encoder.set_repeat(Repeat::Infinite)?;
        for frame in &frames[..count] {
            let image = frame_image(frame)?;
            let image = if image.dimensions() == (options.width, options.height) {
                image
            } else {
                imageops::resize(&image, options.width, options.height, FilterType::Triangle)
            };
            encoder.encode_frame(image::Frame::from_parts(
                image,
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms, 1),
            ))?;
        }
    }

    info!(frames = count, width = options.width, height = options.height, "Assembled GIF");
    Ok(EncodedImage::passthrough(&format!(
        "data:image/gif;base64,{}",
        STANDARD.encode(&buf)
    )))
}

fn frame_image(frame: &EncodedImage) -> Result<RgbaImage> {
    let bytes = if frame.is_data_uri() {
        decode_data_uri(frame.as_str())?.1
    } else {
        std::fs::read(frame.as_str())?
    };
    image::load_from_memory(&bytes)
        .map(|img| img.to_rgba8())
        .map_err(|e| RenderError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{AnimationDecoder, Rgba};
    use image::codecs::gif::GifDecoder;

    fn frame(color: [u8; 4]) -> EncodedImage {
        EncodedImage::from_rgba(&RgbaImage::from_pixel(8, 6, Rgba(color))).unwrap()
    }

    fn small() -> GifOptions {
        GifOptions {
            width: 4,
            height: 3,
            frame_delay_seconds: 0.2,
            frame_count: None,
        }
    }

    #[test]
    fn encodes_resized_animation() {
        let frames = [frame([255, 0, 0, 255]), frame([0, 0, 255, 255]), frame([0, 255, 0, 255])];
        let outcome = ImageGifEncoder.encode(&frames, &small());
        assert!(!outcome.error, "{}", outcome.error_message);
        assert!(outcome.image.as_str().starts_with("data:image/gif;base64,"));

        let bytes = outcome.image.to_bytes().unwrap();
        let decoded = GifDecoder::new(Cursor::new(bytes))
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap();
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[0].buffer().dimensions(), (4, 3));
        assert_eq!(decoded[0].delay().numer_denom_ms(), (200, 1));
    }

    #[test]
    fn frame_count_limits_frames() {
        let frames = [frame([1, 1, 1, 255]), frame([2, 2, 2, 255]), frame([3, 3, 3, 255])];
        let opts = GifOptions {
            frame_count: Some(2),
            ..small()
        };
        let outcome = ImageGifEncoder.encode(&frames, &opts);
        let bytes = outcome.image.to_bytes().unwrap();
        let decoded = GifDecoder::new(Cursor::new(bytes))
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap();
        assert_eq!(decoded.len(), 2);
    }

    #[test]
    fn single_frame_is_reported_not_raised() {
        let outcome = ImageGifEncoder.encode(&[frame([0, 0, 0, 255])], &small());
        assert!(outcome.error);
        assert!(outcome.error_message.contains("two frames"));
        assert!(outcome.image.is_empty());
    }

    #[test]
    fn undecodable_frame_is_reported() {
        let frames = [frame([0, 0, 0, 255]), EncodedImage::passthrough("data:image/png;base64,AAAA")];
        let outcome = ImageGifEncoder.encode(&frames, &small());
        assert!(outcome.error);
    }

    #[test]
    fn outcome_serializes_like_the_browser_encoder() {
        let json = serde_json::to_value(GifOutcome::failure("boom")).unwrap();
        assert_eq!(json["error"], true);
        assert_eq!(json["errorMsg"], "boom");
        assert_eq!(json["image"], "");
    }
}
