//! Pink set: hearts, sparkle, ribbon, candy, blossom and kawaii.

use rand::Rng;
use tiny_skia::PathBuilder;

use crate::canvas::{Brush, Canvas, Shadow};
use crate::color::{css, with_opacity};
use crate::geometry::{self, Rect};
use crate::overlay::ShapeKind;

use super::pastel::corners;
use super::{diagonal, dot, padding, pick, place, scatter_edge, solid, sticker, stroke_inset};

const HEART_PINKS: [&str; 4] = ["#ec4899", "#f472b6", "#fb7185", "#f9a8d4"];
const PETALS: [&str; 3] = ["#f9a8d4", "#fbcfe8", "#fda4af"];

/// Pink line with hearts scattered along the edges.
pub(super) fn hearts<R: Rng + ?Sized>(canvas: &mut Canvas, r: Rect, rng: &mut R) {
    let pad = padding(r, 0.03, 10.0);
    stroke_inset(
        canvas,
        r,
        pad,
        (pad * 0.8).floor(),
        &solid("#f472b6"),
        (pad * 0.5).floor().max(5.0),
    );

    scatter_edge(rng, r, pad * 1.5, 30, |rng, x, y| {
        let size = rng.r#gen::<f32>() * pad * 0.35 + pad * 0.3;
        let degrees = rng.gen_range(-20.0..20.0);
        let fill = solid(pick(rng, &HEART_PINKS));
        sticker(canvas, ShapeKind::Heart, x, y, size, degrees, &fill);
    });
}

/// Glowing pink-gold line with glitter sparkles.
pub(super) fn sparkle<R: Rng + ?Sized>(canvas: &mut Canvas, r: Rect, rng: &mut R) {
    let pad = padding(r, 0.03, 10.0);
    {
        let mut c = canvas.save();
        c.set_shadow(Some(Shadow {
            color: css("rgba(255,255,255,0.9)"),
            blur: pad.max(8.0),
        }));
        let grad = diagonal(r, &[(0.0, "#f9a8d4"), (0.5, "#fde68a"), (1.0, "#f9a8d4")]);
        stroke_inset(&mut c, r, pad, (pad * 0.8).floor(), &grad, (pad * 0.4).floor().max(4.0));
    }

    let (white, gold) = (solid("#ffffff"), solid("#fde68a"));
    scatter_edge(rng, r, pad * 1.5, 40, |rng, x, y| {
        let size = rng.r#gen::<f32>() * pad * 0.35 + pad * 0.2;
        let fill = if rng.gen_bool(0.5) { &white } else { &gold };
        sticker(canvas, ShapeKind::Sparkle, x, y, size, 0.0, fill);
        dot(canvas, x, y, (size * 0.15).max(1.0), fill);
    });
}

/// Pink line with a bow centered on the top edge.
pub(super) fn ribbon(canvas: &mut Canvas, r: Rect) {
    let pad = padding(r, 0.03, 10.0);
    let ribbon = solid("#ec4899");
    stroke_inset(canvas, r, pad, (pad * 0.6).floor(), &solid("#f472b6"), (pad * 0.6).floor().max(6.0));

    let s = (pad * 3.0).max(24.0);
    let (cx, cy) = (r.x + r.w / 2.0, r.y + pad);
    let loop_shape = geometry::ellipse(Rect::new(0.0, -s * 0.25, s * 0.6, s * 0.5));
    let shine = geometry::ellipse(Rect::new(s * 0.15, -s * 0.12, s * 0.3, s * 0.24));

    let mut tails = PathBuilder::new();
    tails.move_to(-s * 0.05, 0.0);
    tails.line_to(-s * 0.35, s * 0.75);
    tails.line_to(-s * 0.15, s * 0.65);
    tails.line_to(0.0, s * 0.1);
    tails.line_to(s * 0.15, s * 0.65);
    tails.line_to(s * 0.35, s * 0.75);
    tails.line_to(s * 0.05, 0.0);
    tails.close();
    if let Some(tails) = tails.finish() {
        place(canvas, &tails, cx, cy, 0.0, &ribbon);
    }
    let highlight = solid("#f9a8d4");
    for deg in [-15.0, 195.0] {
        if let Some(path) = &loop_shape {
            place(canvas, path, cx, cy, deg, &ribbon);
        }
        if let Some(path) = &shine {
            place(canvas, path, cx, cy, deg, &highlight);
        }
    }
    dot(canvas, cx, cy, s * 0.14, &solid("#be185d"));
}

/// Candy-cane stripes around the border.
pub(super) fn candy(canvas: &mut Canvas, r: Rect) {
    let pad = padding(r, 0.03, 10.0);
    let band = pad * 1.2;
    let stripe = (pad * 0.5).floor().max(4.0);
    let (white, pink) = (solid("#ffffff"), solid("#f472b6"));

    let bands = [
        Rect::new(r.x, r.y, r.w, band),
        Rect::new(r.x, r.bottom() - band, r.w, band),
        Rect::new(r.x, r.y, band, r.h),
        Rect::new(r.right() - band, r.y, band, r.h),
    ];
    for b in bands {
        let Some(clip) = geometry::rect(b) else {
            continue;
        };
        let mut c = canvas.save();
        c.clip(&clip);
        c.fill_path(&clip, &white);
        let mut t = -r.h;
        while t < r.w {
            let x = r.x + t;
            if let Some(line) = geometry::line(x, r.bottom(), x + r.h, r.y) {
                c.stroke_path(&line, &pink, stripe);
            }
            t += stripe * 2.0 * std::f32::consts::SQRT_2;
        }
    }

    if let Some(path) = geometry::rect(r.inset(band)) {
        canvas.stroke_path(&path, &solid("#ec4899"), 2.0);
    }
}

/// Soft pink line with falling petals along the edges.
pub(super) fn blossom<R: Rng + ?Sized>(canvas: &mut Canvas, r: Rect, rng: &mut R) {
    let pad = padding(r, 0.025, 8.0);
    stroke_inset(
        canvas,
        r,
        pad,
        (pad * 0.6).floor(),
        &solid("#fbcfe8"),
        (pad * 0.5).floor().max(4.0),
    );

    scatter_edge(rng, r, pad * 1.8, 36, |rng, x, y| {
        let size = rng.r#gen::<f32>() * pad * 0.5 + pad * 0.4;
        let degrees = rng.gen_range(0.0..360.0);
        let fill = Brush::Solid(with_opacity(css(pick(rng, &PETALS)), 0.85));
        if let Some(petal) = geometry::ellipse(Rect::new(-size / 2.0, -size * 0.3, size, size * 0.6)) {
            place(canvas, &petal, x, y, degrees, &fill);
        }
    });
}

/// Thick pink border with a white inner line and a sticker in each corner.
pub(super) fn kawaii(canvas: &mut Canvas, r: Rect) {
    let pad = padding(r, 0.035, 12.0);
    stroke_inset(canvas, r, pad, pad.floor(), &solid("#f9a8d4"), (pad * 1.1).floor().max(12.0));
    stroke_inset(
        canvas,
        r,
        pad * 1.6,
        (pad * 0.6).floor(),
        &solid("#ffffff"),
        (pad * 0.2).floor().max(2.0),
    );

    let size = pad * 0.9;
    let stickers = [
        (ShapeKind::Heart, "#ec4899", -12.0),
        (ShapeKind::Star, "#facc15", 10.0),
        (ShapeKind::Sparkle, "#ffffff", 0.0),
        (ShapeKind::Heart, "#ec4899", 12.0),
    ];
    for ((x, y), (kind, color, deg)) in corners(r, pad).into_iter().zip(stickers) {
        sticker(canvas, kind, x, y, size, deg, &solid(color));
    }
}
