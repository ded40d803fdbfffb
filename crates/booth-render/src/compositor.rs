//! Engine entry points.
//!
//! [`Compositor`] owns the shared resources of every render call (the font
//! book, the scatter seed and the GIF backend). Each call allocates its own
//! drawing surface and reads its inputs as snapshots; nothing is shared
//! between concurrent calls except those read-only resources.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::compose::{CollageLayout, CollageOptions, render_collage};
use crate::encode::EncodedImage;
use crate::filter::Filter;
use crate::frame::Frame;
use crate::gif::{GifEncoderBackend, GifOptions, GifOutcome, ImageGifEncoder};
use crate::overlay::Overlay;
use crate::pipeline::render_photo;
use crate::text::FontBook;

#[derive(Clone)]
pub struct Compositor {
    fonts: Arc<FontBook>,
    seed: Option<u64>,
    gif: Arc<dyn GifEncoderBackend>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("fonts", &!self.fonts.is_empty())
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(Arc::new(FontBook::system()))
    }
}

impl Compositor {
    pub fn new(fonts: Arc<FontBook>) -> Self {
        Self {
            fonts,
            seed: None,
            gif: Arc::new(ImageGifEncoder),
        }
    }

    /// Pin scatter randomness: every call then decorates identically.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_gif_backend(mut self, backend: Arc<dyn GifEncoderBackend>) -> Self {
        self.gif = backend;
        self
    }

    pub fn fonts(&self) -> &Arc<FontBook> {
        &self.fonts
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Filter a photo. `Filter::None` hands the source back without decoding it.
    pub async fn apply_filter_to_image(&self, source: &str, filter: Filter) -> EncodedImage {
        if filter.is_none() {
            return EncodedImage::passthrough(source);
        }
        self.apply_filter_frame_and_overlays_to_image(source, filter, Frame::None, &[])
            .await
    }

    pub async fn apply_filter_and_frame_to_image(
        &self,
        source: &str,
        filter: Filter,
        frame: Frame,
    ) -> EncodedImage {
        self.apply_filter_frame_and_overlays_to_image(source, filter, frame, &[])
            .await
    }

    pub async fn apply_filter_frame_and_overlays_to_image(
        &self,
        source: &str,
        filter: Filter,
        frame: Frame,
        overlays: &[Overlay],
    ) -> EncodedImage {
        let mut rng = self.rng();
        render_photo(self.fonts.clone(), source, filter, frame, overlays, &mut rng).await
    }

    /// Compose `images` into a grid. `options` falls back to the defaults.
    pub async fn create_collage(
        &self,
        images: &[String],
        layout: CollageLayout,
        options: Option<&CollageOptions>,
    ) -> EncodedImage {
        let defaults;
        let options = match options {
            Some(options) => options,
            None => {
                defaults = CollageOptions::default();
                &defaults
            }
        };
        let mut rng = self.rng();
        render_collage(self.fonts.clone(), images, layout, options, &mut rng).await
    }

    /// Decorate every frame (when a frame or overlays are given) and hand
    /// the results to the GIF backend.
    pub async fn create_gif(
        &self,
        frames: &[String],
        frame: Frame,
        overlays: &[Overlay],
        options: &GifOptions,
    ) -> GifOutcome {
        let decorate = !frame.is_none() || !overlays.is_empty();
        let mut rendered = Vec::with_capacity(frames.len());
        for source in frames {
            let image = if decorate {
                self.apply_filter_frame_and_overlays_to_image(source, Filter::None, frame, overlays)
                    .await
            } else {
                EncodedImage::passthrough(source)
            };
            if image.is_empty() {
                return GifOutcome::failure("a GIF frame could not be rendered");
            }
            rendered.push(image);
        }

        let backend = self.gif.clone();
        let options = *options;
        let count = rendered.len();
        match tokio::task::spawn_blocking(move || backend.encode(&rendered, &options)).await {
            Ok(outcome) => {
                if !outcome.error {
                    info!(frames = count, decorated = decorate, "GIF created");
                }
                outcome
            }
            Err(e) => {
                warn!(error = %e, "GIF encoder task failed");
                GifOutcome::failure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::sync::Mutex;

    fn engine() -> Compositor {
        Compositor::new(Arc::new(FontBook::empty())).with_seed(11)
    }

    fn photo(color: [u8; 4]) -> String {
        EncodedImage::from_rgba(&RgbaImage::from_pixel(30, 20, Rgba(color)))
            .unwrap()
            .into_string()
    }

    #[derive(Default)]
    struct Recording(Mutex<Vec<Vec<EncodedImage>>>);

    impl GifEncoderBackend for Recording {
        fn encode(&self, frames: &[EncodedImage], _: &GifOptions) -> GifOutcome {
            self.0.lock().unwrap().push(frames.to_vec());
            GifOutcome::success(EncodedImage::passthrough("data:image/gif;base64,R0lG"))
        }
    }

    #[tokio::test]
    async fn none_filter_skips_decoding() {
        let out = engine()
            .apply_filter_to_image("not-even-an-image", Filter::None)
            .await;
        assert_eq!(out.as_str(), "not-even-an-image");
    }

    #[tokio::test]
    async fn filter_call_encodes_png() {
        let out = engine()
            .apply_filter_to_image(&photo([10, 20, 30, 255]), Filter::Grayscale)
            .await;
        assert!(out.as_str().starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn seeded_engine_repeats_scatter_frames() {
        let source = photo([90, 90, 90, 255]);
        let a = engine()
            .apply_filter_and_frame_to_image(&source, Filter::None, Frame::Christmas)
            .await;
        let b = engine()
            .apply_filter_and_frame_to_image(&source, Filter::None, Frame::Christmas)
            .await;
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn collage_without_options_uses_defaults() {
        let out = engine()
            .create_collage(&[], CollageLayout::new(1, 1), None)
            .await;
        let img = image::load_from_memory(&out.to_bytes().unwrap()).unwrap();
        assert_eq!((img.width(), img.height()), (400, 300));
    }

    #[tokio::test]
    async fn gif_frames_pass_through_undecorated() {
        let recorder = Arc::new(Recording::default());
        let engine = engine().with_gif_backend(recorder.clone());
        let frames = vec![photo([1, 1, 1, 255]), photo([2, 2, 2, 255])];
        let outcome = engine
            .create_gif(&frames, Frame::None, &[], &GifOptions::default())
            .await;
        assert!(!outcome.error);
        let calls = recorder.0.lock().unwrap();
        assert_eq!(calls[0][0].as_str(), frames[0]);
    }

    #[tokio::test]
    async fn gif_frames_are_decorated_when_asked() {
        let recorder = Arc::new(Recording::default());
        let engine = engine().with_gif_backend(recorder.clone());
        let frames = vec![photo([1, 1, 1, 255]), photo([2, 2, 2, 255])];
        engine
            .create_gif(&frames, Frame::Film, &[], &GifOptions::default())
            .await;
        let calls = recorder.0.lock().unwrap();
        assert_eq!(calls[0].len(), 2);
        assert_ne!(calls[0][0].as_str(), frames[0]);
    }

    #[tokio::test]
    async fn default_backend_builds_a_gif() {
        let frames = vec![photo([200, 0, 0, 255]), photo([0, 0, 200, 255])];
        let options = GifOptions {
            width: 30,
            height: 20,
            ..GifOptions::default()
        };
        let outcome = engine()
            .create_gif(&frames, Frame::None, &[], &options)
            .await;
        assert!(!outcome.error, "{}", outcome.error_message);
        assert!(outcome.image.as_str().starts_with("data:image/gif"));
    }
}
