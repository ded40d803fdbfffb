//! Pastel and sticker styles.

use rand::Rng;
use tiny_skia::{Path, PathBuilder};

use crate::canvas::{Brush, Canvas};
use crate::color::{css, with_opacity};
use crate::geometry::{self, Rect};
use crate::overlay::ShapeKind;
use crate::text::{TextAlign, TextBaseline, TextStyle};

use super::{diagonal, dot, padding, pick, scatter_edge, solid, stroke_inset};

const CANDY: [&str; 5] = ["#fbcfe8", "#c7d2fe", "#bae6fd", "#bbf7d0", "#fde68a"];
const STICKER_COLORS: [&str; 5] = ["#f472b6", "#a855f7", "#facc15", "#38bdf8", "#fb7185"];
const STICKER_KINDS: [ShapeKind; 3] = [ShapeKind::Heart, ShapeKind::Star, ShapeKind::Sparkle];

/// Soft multicolour line with a thin white inner line.
pub(super) fn pastel_rainbow(canvas: &mut Canvas, r: Rect) {
    let pad = padding(r, 0.035, 10.0);
    let grad = diagonal(
        r,
        &[(0.0, "#f9a8d4"), (0.35, "#c4b5fd"), (0.65, "#93c5fd"), (1.0, "#86efac")],
    );
    stroke_inset(canvas, r, pad, pad.floor(), &grad, (pad * 0.8).floor().max(8.0));
    stroke_inset(
        canvas,
        r,
        pad * 1.7,
        (pad * 0.6).floor(),
        &solid("rgba(255,255,255,0.8)"),
        (pad * 0.2).floor().max(2.0),
    );
}

/// Peach-to-pink vertical gradient line with cream corner dots.
pub(super) fn pastel_peach(canvas: &mut Canvas, r: Rect) {
    let pad = padding(r, 0.035, 10.0);
    let grad = Brush::Linear {
        start: (r.x, r.y),
        end: (r.x, r.bottom()),
        stops: vec![(0.0, css("#fdba74")), (1.0, css("#f9a8d4"))],
    };
    stroke_inset(canvas, r, pad, (pad * 0.8).floor(), &grad, (pad * 0.9).floor().max(8.0));

    let cream = solid("#fff7ed");
    let d = (pad * 0.45).floor().max(4.0);
    let inset = pad * 1.2;
    for (x, y) in corners(r, inset) {
        dot(canvas, x, y, d, &cream);
    }
}

/// Blue line, waves along the top and bottom, bubbles along the edges.
pub(super) fn ocean<R: Rng + ?Sized>(canvas: &mut Canvas, r: Rect, rng: &mut R) {
    let pad = padding(r, 0.03, 10.0);
    stroke_inset(
        canvas,
        r,
        pad,
        (pad * 0.6).floor(),
        &solid("#0ea5e9"),
        (pad * 0.6).floor().max(6.0),
    );

    let foam = solid("#7dd3fc");
    let width = (pad * 0.25).floor().max(2.0);
    for y in [r.y + pad * 0.5, r.bottom() - pad * 0.5] {
        if let Some(path) = wave(r.x, r.right(), y, pad * 0.3, pad * 2.0) {
            canvas.stroke_path(&path, &foam, width);
        }
    }

    let rim = solid("rgba(255,255,255,0.7)");
    scatter_edge(rng, r, pad * 1.2, 24, |rng, x, y| {
        let radius = rng.r#gen::<f32>() * pad * 0.3 + 2.0;
        if let Some(path) = geometry::circle(x, y, radius) {
            canvas.stroke_path(&path, &rim, 1.5);
        }
    });
}

/// Ruled notebook paper around the photo, with a margin line and pins.
pub(super) fn school(canvas: &mut Canvas, r: Rect) {
    let pad = padding(r, 0.03, 10.0);
    let band = pad * 1.4;
    let paper = solid("rgba(254,252,232,0.95)");
    let rule = solid("rgba(59,130,246,0.35)");
    let gap = (pad * 0.45).floor().max(5.0);

    let bands = [
        Rect::new(r.x, r.y, r.w, band),
        Rect::new(r.x, r.bottom() - band, r.w, band),
        Rect::new(r.x, r.y + band, band, r.h - band * 2.0),
        Rect::new(r.right() - band, r.y + band, band, r.h - band * 2.0),
    ];
    for b in bands {
        let Some(clip) = geometry::rect(b) else {
            continue;
        };
        let mut c = canvas.save();
        c.fill_path(&clip, &paper);
        c.clip(&clip);
        let mut y = r.y + gap;
        while y < r.bottom() {
            if let Some(line) = geometry::line(r.x, y, r.right(), y) {
                c.stroke_path(&line, &rule, 1.0);
            }
            y += gap;
        }
    }

    let margin_x = r.x + band * 0.75;
    if let Some(line) = geometry::line(margin_x, r.y, margin_x, r.bottom()) {
        canvas.stroke_path(&line, &solid("rgba(239,68,68,0.6)"), (pad * 0.12).max(1.5));
    }

    let pin = solid("#ef4444");
    let shine = solid("rgba(255,255,255,0.8)");
    let radius = (pad * 0.4).floor().max(4.0);
    for x in [r.x + r.w * 0.25, r.x + r.w * 0.75] {
        let y = r.y + band / 2.0;
        dot(canvas, x, y, radius, &pin);
        dot(canvas, x - radius * 0.3, y - radius * 0.3, radius * 0.3, &shine);
    }
}

/// Translucent candy-coloured bubbles along the edges.
pub(super) fn bubble<R: Rng + ?Sized>(canvas: &mut Canvas, r: Rect, rng: &mut R) {
    let pad = padding(r, 0.03, 10.0);
    stroke_inset(
        canvas,
        r,
        pad,
        (pad * 0.6).floor(),
        &solid("#f0abfc"),
        (pad * 0.6).floor().max(6.0),
    );

    let rim = solid("rgba(255,255,255,0.85)");
    let shine = solid("rgba(255,255,255,0.9)");
    scatter_edge(rng, r, pad * 1.6, 36, |rng, x, y| {
        let radius = rng.r#gen::<f32>() * pad * 0.5 + pad * 0.25;
        let fill = Brush::Solid(with_opacity(css(pick(rng, &CANDY)), 0.6));
        let Some(path) = geometry::circle(x, y, radius) else {
            return;
        };
        canvas.fill_path(&path, &fill);
        canvas.stroke_path(&path, &rim, 1.5);
        dot(canvas, x - radius * 0.35, y - radius * 0.35, radius * 0.25, &shine);
    });
}

/// Thin purple line with hearts, stars and sparkles scattered around it.
pub(super) fn sticker<R: Rng + ?Sized>(canvas: &mut Canvas, r: Rect, rng: &mut R) {
    let pad = padding(r, 0.03, 10.0);
    stroke_inset(
        canvas,
        r,
        pad,
        (pad * 0.6).floor(),
        &solid("#a855f7"),
        (pad * 0.4).floor().max(4.0),
    );

    scatter_edge(rng, r, pad * 2.0, 18, |rng, x, y| {
        let kind = STICKER_KINDS[rng.gen_range(0..STICKER_KINDS.len())];
        let size = rng.r#gen::<f32>() * pad * 0.4 + pad * 0.45;
        let degrees = rng.gen_range(-25.0..25.0);
        let fill = solid(pick(rng, &STICKER_COLORS));
        super::sticker(canvas, kind, x, y, size, degrees, &fill);
    });
}

/// Heavy black border, halftone corners and a "POP!" burst.
pub(super) fn comic(canvas: &mut Canvas, r: Rect) {
    let pad = padding(r, 0.03, 10.0);
    stroke_inset(canvas, r, pad, 0.0, &solid("#111111"), (pad * 0.8).floor().max(8.0));

    let ink = solid("rgba(0,0,0,0.25)");
    let spacing = (pad * 0.5).max(5.0);
    let reach = pad * 4.0;
    let steps = (reach / spacing) as i32;
    for (cx, cy, sx, sy) in [
        (r.x, r.y, 1.0, 1.0),
        (r.right(), r.y, -1.0, 1.0),
        (r.x, r.bottom(), 1.0, -1.0),
        (r.right(), r.bottom(), -1.0, -1.0),
    ] {
        for i in 0..=steps {
            for j in 0..=steps {
                let (dx, dy) = (i as f32 * spacing, j as f32 * spacing);
                let falloff = 1.0 - (dx + dy) / reach;
                if falloff <= 0.0 {
                    continue;
                }
                dot(canvas, cx + sx * dx, cy + sy * dy, spacing * 0.45 * falloff, &ink);
            }
        }
    }

    let (bx, by) = (r.right() - pad * 3.0, r.y + pad * 3.0);
    if let Some(burst) = geometry::star(pad * 2.4, pad * 1.5, 12) {
        let mut c = canvas.save();
        c.translate(bx, by);
        c.fill_path(&burst, &solid("#facc15"));
        c.stroke_path(&burst, &solid("#111111"), 2.0);
    }
    let style = TextStyle::new(pad * 1.1)
        .bold(true)
        .align(TextAlign::Center)
        .baseline(TextBaseline::Middle);
    canvas.fill_text("POP!", bx, by, &style, &solid("#ef4444"));
}

/// Thin green line with a flower and two leaves in each corner.
pub(super) fn flower(canvas: &mut Canvas, r: Rect) {
    let pad = padding(r, 0.025, 8.0);
    stroke_inset(
        canvas,
        r,
        pad,
        (pad * 0.6).floor(),
        &solid("#86efac"),
        (pad * 0.4).floor().max(3.0),
    );

    let s = (pad * 1.2).max(10.0);
    let petal = geometry::ellipse(Rect::new(-s * 0.35, -s, s * 0.7, s * 0.9));
    let leaf = geometry::ellipse(Rect::new(-s * 0.25, -s * 1.5, s * 0.5, s * 1.1));
    let (pink, green, heart) = (solid("#f9a8d4"), solid("#4ade80"), solid("#fde047"));

    for (x, y) in corners(r, pad * 1.5) {
        if let Some(leaf) = &leaf {
            for deg in [150.0, 210.0] {
                super::place(canvas, leaf, x, y, deg, &green);
            }
        }
        if let Some(petal) = &petal {
            for i in 0..5 {
                super::place(canvas, petal, x, y, i as f32 * 72.0, &pink);
            }
        }
        dot(canvas, x, y, s * 0.3, &heart);
    }
}

/// The four points `inset` in from each corner: TL, TR, BL, BR.
pub(super) fn corners(r: Rect, inset: f32) -> [(f32, f32); 4] {
    [
        (r.x + inset, r.y + inset),
        (r.right() - inset, r.y + inset),
        (r.x + inset, r.bottom() - inset),
        (r.right() - inset, r.bottom() - inset),
    ]
}

fn wave(x0: f32, x1: f32, y: f32, amplitude: f32, wavelength: f32) -> Option<Path> {
    if wavelength <= 0.0 || x1 <= x0 {
        return None;
    }
    let half = wavelength / 2.0;
    let mut pb = PathBuilder::new();
    pb.move_to(x0, y);
    let (mut x, mut crest) = (x0, true);
    while x < x1 {
        let nx = (x + half).min(x1);
        let cy = if crest { y - amplitude } else { y + amplitude };
        pb.quad_to((x + nx) / 2.0, cy, nx, y);
        x = nx;
        crest = !crest;
    }
    pb.finish()
}
