//! Photo booth compositing engine.
//!
//! Renders captured photos into finished images: per-pixel colour filters,
//! procedural decorative frames, free-form text and shape overlays, and
//! multi-cell collages with page templates. Results are PNG data URIs.

mod tags;

pub mod canvas;
pub mod color;
pub mod compose;
pub mod compositor;
pub mod encode;
pub mod filter;
pub mod frame;
pub mod geometry;
pub mod gif;
pub mod loader;
pub mod overlay;
pub mod pipeline;
pub mod template;
pub mod text;

// Re-exports for convenience
pub use canvas::{Brush, Canvas, Shadow};
pub use compose::{CellMask, CollageLayout, CollageOptions, CollageStyle};
pub use compositor::Compositor;
pub use encode::EncodedImage;
pub use filter::{Filter, apply_filter, apply_filter_in_place};
pub use frame::{Frame, draw_frame, draw_frame_with_rng};
pub use gif::{GifEncoderBackend, GifOptions, GifOutcome, ImageGifEncoder};
pub use overlay::{Overlay, ShapeKind, ShapeOverlay, TextOverlay, draw_overlays};
pub use template::TemplateId;
pub use text::{FontBook, FontPaths};

/// Errors raised inside the engine.
///
/// The public render calls recover from all of these and log them; they
/// surface directly only from the lower-level helpers.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Drawing surface unavailable for {width}x{height}")]
    SurfaceUnavailable { width: u32, height: u32 },

    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encode error: {0}")]
    Encode(#[from] image::ImageError),

    #[error("No usable font")]
    FontUnavailable,

    #[error("GIF error: {0}")]
    Gif(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
