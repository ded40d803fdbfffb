//! Per-pixel colour filters.
//!
//! Each filter is a pure function over an RGBA buffer. Alpha is never touched.
//! Results are stored the way a clamped byte array stores them: clamped to
//! `[0, 255]` and rounded to the nearest integer, ties to even.

use image::RgbaImage;
use tracing::debug;

use crate::tags::closed_tag;

closed_tag! {
    /// Colour filter applied to a whole image.
    pub enum Filter {
        None => "none",
        Grayscale => "grayscale",
        Sepia => "sepia",
        Vintage => "vintage",
        Warm => "warm",
        Cool => "cool",
        Bright => "bright",
        Contrast => "contrast",
    }
    fallback = None;
}

impl Filter {
    pub fn is_none(self) -> bool {
        self == Filter::None
    }
}

const CONTRAST_FACTOR: f64 = 1.5;

/// Apply `filter` to `image`, returning the transformed buffer.
pub fn apply_filter(mut image: RgbaImage, filter: Filter) -> RgbaImage {
    apply_filter_in_place(&mut image, filter);
    image
}

/// Apply `filter` to `image` in place. `Filter::None` leaves it untouched.
pub fn apply_filter_in_place(image: &mut RgbaImage, filter: Filter) {
    if filter.is_none() {
        return;
    }
    debug!(
        filter = %filter,
        width = image.width(),
        height = image.height(),
        "Applying filter"
    );
    for pixel in image.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        let (r, g, b) = (r as f64, g as f64, b as f64);
        let [nr, ng, nb] = match filter {
            Filter::None => return,
            Filter::Grayscale => {
                let avg = (r + g + b) / 3.0;
                [avg, avg, avg]
            }
            Filter::Sepia => [
                r * 0.393 + g * 0.769 + b * 0.189,
                r * 0.349 + g * 0.686 + b * 0.168,
                r * 0.272 + g * 0.534 + b * 0.131,
            ],
            Filter::Vintage => [r * 1.2, g * 1.1, b * 0.8],
            Filter::Warm => [r + 30.0, g, b - 20.0],
            Filter::Cool => [r - 20.0, g, b + 30.0],
            Filter::Bright => [r + 40.0, g + 40.0, b + 40.0],
            Filter::Contrast => [r, g, b].map(|c| CONTRAST_FACTOR * (c - 128.0) + 128.0),
        };
        pixel.0[0] = clamp_channel(nr);
        pixel.0[1] = clamp_channel(ng);
        pixel.0[2] = clamp_channel(nb);
    }
}

fn clamp_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round_ties_even() as u8
}
