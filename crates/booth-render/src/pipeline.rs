//! Single-photo rendering: filter, then frame, then overlays.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, warn};

use crate::canvas::Canvas;
use crate::encode::EncodedImage;
use crate::filter::{Filter, apply_filter_in_place};
use crate::frame::{Frame, draw_frame_with_rng};
use crate::loader::load_image;
use crate::overlay::{Overlay, draw_overlays};
use crate::text::FontBook;

/// Render one photo at its natural size.
///
/// A source that cannot be loaded comes back unchanged. An unusable drawing
/// surface yields [`EncodedImage::empty`].
pub async fn render_photo<R: Rng + ?Sized>(
    fonts: Arc<FontBook>,
    source: &str,
    filter: Filter,
    frame: Frame,
    overlays: &[Overlay],
    rng: &mut R,
) -> EncodedImage {
    let mut image = match load_image(source).await {
        Ok(image) => image,
        Err(e) => {
            warn!(error = %e, "Photo failed to load; returning source unchanged");
            return EncodedImage::passthrough(source);
        }
    };

    if !filter.is_none() {
        apply_filter_in_place(&mut image, filter);
    }

    let mut canvas = match Canvas::from_rgba(&image, fonts) {
        Ok(canvas) => canvas,
        Err(e) => {
            warn!(error = %e, width = image.width(), height = image.height(), "Cannot allocate photo surface");
            return EncodedImage::empty();
        }
    };

    let page = canvas.bounds();
    draw_frame_with_rng(&mut canvas, page, frame, rng);
    if !overlays.is_empty() {
        draw_overlays(&mut canvas, page.w, page.h, overlays);
    }
    debug!(
        filter = %filter,
        frame = %frame,
        overlays = overlays.len(),
        width = canvas.width(),
        height = canvas.height(),
        "Rendered photo"
    );

    match EncodedImage::from_rgba(&canvas.to_rgba()) {
        Ok(encoded) => encoded,
        Err(e) => {
            warn!(error = %e, "Photo encoding failed");
            EncodedImage::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::apply_filter;
    use image::{Rgba, RgbaImage};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn gradient() -> RgbaImage {
        RgbaImage::from_fn(60, 40, |x, y| Rgba([(x * 4) as u8, (y * 6) as u8, 128, 255]))
    }

    async fn render(source: &str, filter: Filter, frame: Frame, overlays: &[Overlay]) -> EncodedImage {
        let mut rng = StdRng::seed_from_u64(3);
        render_photo(Arc::new(FontBook::empty()), source, filter, frame, overlays, &mut rng).await
    }

    fn decode(image: &EncodedImage) -> RgbaImage {
        image::load_from_memory(&image.to_bytes().unwrap())
            .unwrap()
            .to_rgba8()
    }

    #[tokio::test]
    async fn bare_filter_matches_pixel_filter() {
        let src = gradient();
        let uri = EncodedImage::from_rgba(&src).unwrap();
        for filter in Filter::ALL.iter().copied() {
            let out = render(uri.as_str(), filter, Frame::None, &[]).await;
            assert_eq!(decode(&out), apply_filter(src.clone(), filter), "{filter}");
        }
    }

    #[tokio::test]
    async fn frame_decorates_at_natural_size() {
        let uri = EncodedImage::from_rgba(&gradient()).unwrap();
        let out = decode(&render(uri.as_str(), Filter::None, Frame::Neon, &[]).await);
        assert_eq!(out.dimensions(), (60, 40));
        assert_ne!(out, gradient());
    }

    #[tokio::test]
    async fn overlays_use_the_photo_as_basis() {
        let uri = EncodedImage::from_rgba(&RgbaImage::from_pixel(200, 100, Rgba([0, 0, 0, 255]))).unwrap();
        let star = serde_json::from_value(serde_json::json!({
            "type": "shape", "id": "a", "x": 0.5, "y": 0.5,
            "shape": "star", "size": 20, "fill": "#00ff00"
        }))
        .unwrap();
        let out = decode(&render(uri.as_str(), Filter::None, Frame::None, &[star]).await);
        assert_eq!(out.get_pixel(100, 50).0, [0, 255, 0, 255]);
        assert_eq!(out.get_pixel(10, 10).0, [0, 0, 0, 255]);
    }

    #[tokio::test]
    async fn unloadable_source_passes_through() {
        let out = render("/nope/missing.png", Filter::Grayscale, Frame::Film, &[]).await;
        assert_eq!(out.as_str(), "/nope/missing.png");
    }
}
