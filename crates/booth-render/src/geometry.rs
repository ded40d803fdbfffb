//! Rectangles and the vector paths shared by frames, masks and overlays.

use std::f32::consts::PI;

use tiny_skia::{Path, PathBuilder};

/// Cubic Bezier handle length for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_8;

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn min_side(&self) -> f32 {
        self.w.min(self.h)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Shrink by `d` on every side.
    pub fn inset(&self, d: f32) -> Self {
        Self::new(self.x + d, self.y + d, self.w - d * 2.0, self.h - d * 2.0)
    }

    pub fn is_empty(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }
}

/// Plain rectangle path.
pub fn rect(r: Rect) -> Option<Path> {
    if r.is_empty() {
        return None;
    }
    Some(PathBuilder::from_rect(tiny_skia::Rect::from_xywh(
        r.x, r.y, r.w, r.h,
    )?))
}

/// Rounded rectangle whose radius is clamped to half the shorter side.
pub fn rounded_rect(r: Rect, radius: f32) -> Option<Path> {
    if r.is_empty() {
        return None;
    }
    let rad = radius.min(r.w / 2.0).min(r.h / 2.0).max(0.0);
    if rad <= 0.0 {
        return rect(r);
    }
    let k = rad * KAPPA;
    let (x, y, w, h) = (r.x, r.y, r.w, r.h);

    let mut pb = PathBuilder::new();
    pb.move_to(x + rad, y);
    pb.line_to(x + w - rad, y);
    pb.cubic_to(x + w - rad + k, y, x + w, y + rad - k, x + w, y + rad);
    pb.line_to(x + w, y + h - rad);
    pb.cubic_to(x + w, y + h - rad + k, x + w - rad + k, y + h, x + w - rad, y + h);
    pb.line_to(x + rad, y + h);
    pb.cubic_to(x + rad - k, y + h, x, y + h - rad + k, x, y + h - rad);
    pb.line_to(x, y + rad);
    pb.cubic_to(x, y + rad - k, x + rad - k, y, x + rad, y);
    pb.close();
    pb.finish()
}

pub fn circle(cx: f32, cy: f32, radius: f32) -> Option<Path> {
    if radius <= 0.0 {
        return None;
    }
    PathBuilder::from_circle(cx, cy, radius)
}

/// Ellipse inscribed in `r`.
pub fn ellipse(r: Rect) -> Option<Path> {
    if r.is_empty() {
        return None;
    }
    PathBuilder::from_oval(tiny_skia::Rect::from_xywh(r.x, r.y, r.w, r.h)?)
}

pub fn line(x0: f32, y0: f32, x1: f32, y1: f32) -> Option<Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(x0, y0);
    pb.line_to(x1, y1);
    pb.finish()
}

/// Heart silhouette centered on the origin, spanning roughly `2 * size`.
///
/// Control points follow the editor's 100-unit preview glyph, recentered
/// and scaled so that 50 units map to `size`.
pub fn heart(size: f32) -> Option<Path> {
    if size <= 0.0 {
        return None;
    }
    let p = |x: f32, y: f32| ((x - 50.0) / 50.0 * size, (y - 50.0) / 50.0 * size);
    let mut pb = PathBuilder::new();
    let (sx, sy) = p(50.0, 80.0);
    pb.move_to(sx, sy);
    for [c1, c2, end] in [
        [(20.0, 60.0), (5.0, 45.0), (20.0, 25.0)],
        [(35.0, 10.0), (50.0, 25.0), (50.0, 25.0)],
        [(50.0, 25.0), (65.0, 10.0), (80.0, 25.0)],
        [(95.0, 45.0), (80.0, 60.0), (50.0, 80.0)],
    ] {
        let (x1, y1) = p(c1.0, c1.1);
        let (x2, y2) = p(c2.0, c2.1);
        let (x, y) = p(end.0, end.1);
        pb.cubic_to(x1, y1, x2, y2, x, y);
    }
    pb.close();
    pb.finish()
}

/// Star polygon centered on the origin with the first tip pointing up.
pub fn star(outer: f32, inner: f32, points: u32) -> Option<Path> {
    if outer <= 0.0 || points < 2 {
        return None;
    }
    let step = PI / points as f32;
    let mut pb = PathBuilder::new();
    for i in 0..points * 2 {
        let r = if i % 2 == 0 { outer } else { inner };
        let angle = -PI / 2.0 + step * i as f32;
        let (x, y) = (r * angle.cos(), r * angle.sin());
        if i == 0 {
            pb.move_to(x, y);
        } else {
            pb.line_to(x, y);
        }
    }
    pb.close();
    pb.finish()
}

/// Four-armed sparkle: two crossing strokes through the origin, each arm `size` long.
pub fn sparkle(size: f32) -> Option<Path> {
    if size <= 0.0 {
        return None;
    }
    let mut pb = PathBuilder::new();
    pb.move_to(-size, 0.0);
    pb.line_to(size, 0.0);
    pb.move_to(0.0, -size);
    pb.line_to(0.0, size);
    pb.finish()
}

/// Destination rectangle that scales an `img_w`x`img_h` image uniformly so it
/// covers `target` completely, centered, overflow cropped by the caller's clip.
pub fn cover(img_w: f32, img_h: f32, target: Rect) -> Rect {
    let ratio = (target.w / img_w).max(target.h / img_h);
    let w = img_w * ratio;
    let h = img_h * ratio;
    Rect::new(
        target.x - (w - target.w) / 2.0,
        target.y - (h - target.h) / 2.0,
        w,
        h,
    )
}
