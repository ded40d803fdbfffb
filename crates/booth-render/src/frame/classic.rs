//! Polaroid, film, neon, gold and tape.

use crate::canvas::{Canvas, Shadow};
use crate::color::css;
use crate::geometry::{self, Rect};
use crate::text::{TextAlign, TextStyle};

use super::{diagonal, dot, padding, solid, stroke_inset};

/// White border with a deeper bottom strip and a faint caption.
pub(super) fn polaroid(canvas: &mut Canvas, r: Rect) {
    let t = padding(r, 0.02, 8.0);
    let b = t * 3.0;
    let paper = solid("rgba(255,255,255,0.95)");
    canvas.fill_rect(Rect::new(r.x, r.y, r.w, t), &paper);
    canvas.fill_rect(Rect::new(r.x, r.bottom() - b, r.w, b), &paper);
    canvas.fill_rect(Rect::new(r.x, r.y, t, r.h), &paper);
    canvas.fill_rect(Rect::new(r.right() - t, r.y, t, r.h), &paper);

    let style = TextStyle::new((b / 3.0).floor().max(12.0)).align(TextAlign::Center);
    canvas.fill_text(
        "PhotoBooth",
        r.x + r.w / 2.0,
        r.bottom() - (b / 2.0).floor(),
        &style,
        &solid("rgba(0,0,0,0.15)"),
    );
}

/// Dark side bars with sprocket holes.
pub(super) fn film(canvas: &mut Canvas, r: Rect) {
    let bar = padding(r, 0.03, 10.0);
    let dark = solid("rgba(0,0,0,0.9)");
    canvas.fill_rect(Rect::new(r.x, r.y, bar, r.h), &dark);
    canvas.fill_rect(Rect::new(r.right() - bar, r.y, bar, r.h), &dark);

    let hole = solid("rgba(255,255,255,0.85)");
    let hole_r = (bar * 0.25).floor().max(3.0);
    let spacing = hole_r * 3.0;
    let half = (bar / 2.0).floor();
    let mut y = r.y + hole_r * 2.0;
    while y < r.bottom() - hole_r * 2.0 {
        dot(canvas, r.x + half, y, hole_r, &hole);
        dot(canvas, r.right() - half, y, hole_r, &hole);
        y += spacing;
    }
}

/// Purple rounded line with a lavender glow.
pub(super) fn neon(canvas: &mut Canvas, r: Rect) {
    let pad = padding(r, 0.03, 10.0);
    canvas.set_shadow(Some(Shadow {
        color: css("#a78bfa"),
        blur: pad.max(10.0),
    }));
    stroke_inset(
        canvas,
        r,
        pad,
        (pad * 0.8).floor(),
        &solid("#7c3aed"),
        (pad * 0.4).floor().max(3.0),
    );
}

pub(super) fn gold(canvas: &mut Canvas, r: Rect) {
    let pad = padding(r, 0.025, 8.0);
    let grad = diagonal(r, &[(0.0, "#c59d5f"), (0.5, "#ffd700"), (1.0, "#c59d5f")]);
    stroke_inset(canvas, r, pad, (pad * 0.6).floor(), &grad, (pad * 0.7).floor().max(6.0));
}

/// Four strips of masking tape, one per corner, each slightly askew.
pub(super) fn tape(canvas: &mut Canvas, r: Rect) {
    let tape_w = padding(r, 0.12, 40.0);
    let tape_h = (tape_w * 0.35).floor().max(14.0);
    let pad = padding(r, 0.025, 8.0);
    let fill = solid("rgba(255, 247, 209, 0.9)");
    let edge = solid("rgba(0,0,0,0.12)");
    let Some(strip) = geometry::rect(Rect::new(-tape_w / 2.0, -tape_h / 2.0, tape_w, tape_h)) else {
        return;
    };

    let left = r.x + pad + tape_w / 2.0;
    let right = r.right() - pad - tape_w / 2.0;
    let top = r.y + pad + tape_h / 2.0;
    let bottom = r.bottom() - pad - tape_h / 2.0;
    for (x, y, deg) in [
        (left, top, -10.0),
        (right, top, 8.0),
        (left, bottom, 12.0),
        (right, bottom, -7.0),
    ] {
        let mut c = canvas.save();
        c.translate(x, y);
        c.rotate(deg);
        c.fill_path(&strip, &fill);
        c.stroke_path(&strip, &edge, 1.0);
    }
}
