//! Christmas, Tet, birthday and wedding.

use rand::Rng;

use crate::canvas::{Brush, Canvas};
use crate::color::css;
use crate::geometry::{self, Rect};

use super::{diagonal, dot, padding, pick, scatter_edge, solid, stroke_inset};

const CONFETTI: [&str; 6] = ["#ef4444", "#f59e0b", "#10b981", "#3b82f6", "#eab308", "#a855f7"];

/// Red-to-green line with snow along the edges.
pub(super) fn christmas<R: Rng + ?Sized>(canvas: &mut Canvas, r: Rect, rng: &mut R) {
    let pad = padding(r, 0.03, 10.0);
    let grad = diagonal(r, &[(0.0, "#ef4444"), (1.0, "#22c55e")]);
    stroke_inset(canvas, r, pad, (pad * 0.6).floor(), &grad, (pad * 0.7).floor().max(8.0));

    let snow = solid("rgba(255,255,255,0.9)");
    scatter_edge(rng, r, pad * 1.5, 40, |rng, x, y| {
        let radius = rng.r#gen::<f32>() * 2.0 + 1.0;
        dot(canvas, x, y, radius, &snow);
    });
}

/// Lunar new year: red border, thin gold inner line and gold corner dots.
pub(super) fn tet(canvas: &mut Canvas, r: Rect) {
    let pad = padding(r, 0.03, 10.0);
    stroke_inset(
        canvas,
        r,
        pad,
        (pad * 0.4).floor(),
        &solid("#dc2626"),
        (pad * 0.8).floor().max(10.0),
    );

    let gold = solid("#f59e0b");
    stroke_inset(
        canvas,
        r,
        pad * 1.8,
        (pad * 0.3).floor(),
        &gold,
        (pad * 0.25).floor().max(3.0),
    );

    let d = (pad * 0.5).floor().max(5.0);
    let inset = pad * 1.2;
    for (x, y) in [
        (r.x + inset, r.y + inset),
        (r.right() - inset, r.y + inset),
        (r.x + inset, r.bottom() - inset),
        (r.right() - inset, r.bottom() - inset),
    ] {
        dot(canvas, x, y, d, &gold);
    }
}

/// Purple line with multicoloured confetti along the edges.
pub(super) fn birthday<R: Rng + ?Sized>(canvas: &mut Canvas, r: Rect, rng: &mut R) {
    let pad = padding(r, 0.025, 8.0);
    stroke_inset(
        canvas,
        r,
        pad,
        (pad * 0.6).floor(),
        &solid("#9333ea"),
        (pad * 0.5).floor().max(4.0),
    );

    scatter_edge(rng, r, pad * 1.2, 60, |rng, x, y| {
        let radius = rng.r#gen::<f32>() * 3.0 + 1.5;
        let color = pick(rng, &CONFETTI);
        dot(canvas, x, y, radius, &solid(color));
    });
}

/// Soft white vignette under a thin gold line.
pub(super) fn wedding(canvas: &mut Canvas, r: Rect) {
    let pad = padding(r, 0.025, 8.0);
    let vignette = Brush::Radial {
        center: r.center(),
        inner: r.min_side() / 4.0,
        outer: r.w.max(r.h) / 1.2,
        stops: vec![
            (0.0, css("rgba(255,255,255,0)")),
            (1.0, css("rgba(255,255,255,0.35)")),
        ],
    };
    if let Some(path) = geometry::rounded_rect(r, (pad * 0.4).floor()) {
        canvas.fill_path(&path, &vignette);
    }

    let grad = diagonal(r, &[(0.0, "#c59d5f"), (0.5, "#ffd700"), (1.0, "#c59d5f")]);
    stroke_inset(canvas, r, pad, (pad * 0.5).floor(), &grad, (pad * 0.4).floor().max(3.0));
}
