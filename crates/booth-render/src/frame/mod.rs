//! Procedural frame decorations.
//!
//! A frame is drawn into a target rectangle and is a function of that
//! rectangle alone: paddings, line widths and radii are derived from the
//! shorter side with a per-style pixel floor. Styles that scatter confetti,
//! snow or stickers draw from the supplied random source, so two renders of
//! the same input differ unless the caller pins the generator.

mod classic;
mod pastel;
mod pink;
mod seasonal;

#[cfg(test)]
mod tests;

use rand::Rng;
use rand::rngs::OsRng;
use tiny_skia::Path;
use tracing::trace;

use crate::canvas::{Brush, Canvas};
use crate::color::css;
use crate::geometry::{self, Rect};
use crate::overlay::ShapeKind;
use crate::tags::closed_tag;

closed_tag! {
    /// Decorative frame catalogue.
    pub enum Frame {
        None => "none",
        Polaroid => "polaroid",
        Film => "film",
        Neon => "neon",
        Gold => "gold",
        Tape => "tape",
        Christmas => "christmas",
        Tet => "tet",
        Birthday => "birthday",
        Wedding => "wedding",
        Pastel1 => "pastel-1",
        Pastel2 => "pastel-2",
        Ocean => "ocean",
        School => "school",
        Bubble => "bubble",
        Sticker => "sticker",
        Comic => "comic",
        Flower => "flower",
        Hearts => "hearts",
        Sparkle => "sparkle",
        Ribbon => "ribbon",
        Candy => "candy",
        Blossom => "blossom",
        Kawaii => "kawaii",
    }
    fallback = None;
}

impl Frame {
    pub fn is_none(self) -> bool {
        self == Frame::None
    }
}

/// Draw `frame` into `rect` using an entropy-seeded random source.
pub fn draw_frame(canvas: &mut Canvas, rect: Rect, frame: Frame) {
    draw_frame_with_rng(canvas, rect, frame, &mut OsRng);
}

/// Draw `frame` into `rect`, taking scatter positions from `rng`.
pub fn draw_frame_with_rng<R: Rng + ?Sized>(
    canvas: &mut Canvas,
    rect: Rect,
    frame: Frame,
    rng: &mut R,
) {
    if frame.is_none() || rect.is_empty() {
        return;
    }
    trace!(frame = %frame, x = rect.x, y = rect.y, w = rect.w, h = rect.h, "Drawing frame");

    let mut c = canvas.save();
    match frame {
        Frame::None => {}
        Frame::Polaroid => classic::polaroid(&mut c, rect),
        Frame::Film => classic::film(&mut c, rect),
        Frame::Neon => classic::neon(&mut c, rect),
        Frame::Gold => classic::gold(&mut c, rect),
        Frame::Tape => classic::tape(&mut c, rect),
        Frame::Christmas => seasonal::christmas(&mut c, rect, rng),
        Frame::Tet => seasonal::tet(&mut c, rect),
        Frame::Birthday => seasonal::birthday(&mut c, rect, rng),
        Frame::Wedding => seasonal::wedding(&mut c, rect),
        Frame::Pastel1 => pastel::pastel_rainbow(&mut c, rect),
        Frame::Pastel2 => pastel::pastel_peach(&mut c, rect),
        Frame::Ocean => pastel::ocean(&mut c, rect, rng),
        Frame::School => pastel::school(&mut c, rect),
        Frame::Bubble => pastel::bubble(&mut c, rect, rng),
        Frame::Sticker => pastel::sticker(&mut c, rect, rng),
        Frame::Comic => pastel::comic(&mut c, rect),
        Frame::Flower => pastel::flower(&mut c, rect),
        Frame::Hearts => pink::hearts(&mut c, rect, rng),
        Frame::Sparkle => pink::sparkle(&mut c, rect, rng),
        Frame::Ribbon => pink::ribbon(&mut c, rect),
        Frame::Candy => pink::candy(&mut c, rect),
        Frame::Blossom => pink::blossom(&mut c, rect, rng),
        Frame::Kawaii => pink::kawaii(&mut c, rect),
    }
}

/// `max(floor, floor(min(w, h) * fraction))`.
fn padding(rect: Rect, fraction: f32, floor: f32) -> f32 {
    (rect.min_side() * fraction).floor().max(floor)
}

fn solid(color: &str) -> Brush {
    Brush::Solid(css(color))
}

/// Linear gradient along the rectangle's top-left to bottom-right diagonal.
fn diagonal(rect: Rect, stops: &[(f32, &str)]) -> Brush {
    Brush::Linear {
        start: (rect.x, rect.y),
        end: (rect.right(), rect.bottom()),
        stops: stops.iter().map(|(t, c)| (*t, css(c))).collect(),
    }
}

/// Stroke a rounded rectangle inset by `inset` from `rect`.
fn stroke_inset(canvas: &mut Canvas, rect: Rect, inset: f32, radius: f32, brush: &Brush, width: f32) {
    if let Some(path) = geometry::rounded_rect(rect.inset(inset), radius) {
        canvas.stroke_path(&path, brush, width);
    }
}

fn dot(canvas: &mut Canvas, x: f32, y: f32, radius: f32, brush: &Brush) {
    if let Some(path) = geometry::circle(x, y, radius) {
        canvas.fill_path(&path, brush);
    }
}

/// Fill `path` (built around the origin) at `(x, y)` rotated by `degrees`.
fn place(canvas: &mut Canvas, path: &Path, x: f32, y: f32, degrees: f32, brush: &Brush) {
    let mut c = canvas.save();
    c.translate(x, y);
    c.rotate(degrees);
    c.fill_path(path, brush);
}

/// Draw a small vector sticker centered at `(x, y)`.
fn sticker(canvas: &mut Canvas, kind: ShapeKind, x: f32, y: f32, size: f32, degrees: f32, fill: &Brush) {
    let Some(path) = kind.path(size) else {
        return;
    };
    let mut c = canvas.save();
    c.translate(x, y);
    c.rotate(degrees);
    if kind == ShapeKind::Sparkle {
        c.stroke_path(&path, fill, (size * 0.2).max(1.5));
    } else {
        c.fill_path(&path, fill);
    }
}

/// Edge-only scatter: draw `count` candidate points uniformly over `rect`
/// and keep those falling within `band` of any edge.
///
/// Rejected candidates are dropped rather than redrawn, so the number of
/// decorations placed varies from render to render.
fn scatter_edge<R: Rng + ?Sized>(
    rng: &mut R,
    rect: Rect,
    band: f32,
    count: usize,
    mut place: impl FnMut(&mut R, f32, f32),
) {
    for _ in 0..count {
        let rx = rect.x + rng.r#gen::<f32>() * rect.w;
        let ry = rect.y + rng.r#gen::<f32>() * rect.h;
        if on_edge(rect, band, rx, ry) {
            place(rng, rx, ry);
        }
    }
}

fn on_edge(rect: Rect, band: f32, x: f32, y: f32) -> bool {
    x < rect.x + band || x > rect.right() - band || y < rect.y + band || y > rect.bottom() - band
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &'a [&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}
