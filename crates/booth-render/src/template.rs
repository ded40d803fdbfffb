//! Page-level collage templates.
//!
//! A template decorates the whole collage page after every cell is drawn:
//! borders, divider lines, a ribbon or banner, and the page title centered in
//! that banner.

use tiny_skia::{PathBuilder, Stroke, StrokeDash};
use tracing::debug;

use crate::canvas::{Brush, Canvas};
use crate::color::css;
use crate::geometry::{self, Rect};
use crate::overlay::ShapeKind;
use crate::tags::closed_tag;
use crate::text::{TextAlign, TextBaseline, TextStyle};

/// Title used when a template is drawn without one.
pub const DEFAULT_TITLE: &str = "PhotoBooth";

closed_tag! {
    /// Page template catalogue.
    pub enum TemplateId {
        None => "none",
        DualStripPink => "dual-strip-pink",
        CurvedPastelBoard => "curved-pastel-board",
        StickerSheet => "sticker-sheet",
    }
    fallback = None;
}

/// Decorate the whole canvas with `template`. Blank titles use [`DEFAULT_TITLE`].
pub fn draw_template(canvas: &mut Canvas, template: TemplateId, title: Option<&str>) {
    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TITLE);
    let page = canvas.bounds();
    debug!(template = %template, width = page.w, height = page.h, "Drawing page template");

    let mut c = canvas.save();
    match template {
        TemplateId::None => {}
        TemplateId::DualStripPink => dual_strip_pink(&mut c, page, title),
        TemplateId::CurvedPastelBoard => curved_pastel_board(&mut c, page, title),
        TemplateId::StickerSheet => sticker_sheet(&mut c, page, title),
    }
}

/// Two strips side by side: pink border, center divider and a footer banner.
fn dual_strip_pink(canvas: &mut Canvas, page: Rect, title: &str) {
    let m = page.min_side();
    let border = (m * 0.015).floor().max(6.0);
    if let Some(path) = geometry::rect(page.inset(border / 2.0)) {
        canvas.stroke_path(&path, &Brush::Solid(css("#f9a8d4")), border);
    }

    let divider = Stroke {
        width: 2.0,
        dash: StrokeDash::new(vec![12.0, 8.0], 0.0),
        ..Stroke::default()
    };
    let mid = page.x + page.w / 2.0;
    if let Some(line) = geometry::line(mid, page.y + border, mid, page.bottom() - border) {
        canvas.stroke_path_with(&line, &Brush::Solid(css("rgba(236,72,153,0.5)")), &divider);
    }

    let banner_h = (page.h * 0.08).floor().max(40.0);
    let margin = border * 2.0;
    let banner = Rect::new(
        page.x + margin,
        page.bottom() - margin - banner_h,
        page.w - margin * 2.0,
        banner_h,
    );
    if let Some(path) = geometry::rounded_rect(banner, banner_h / 2.0) {
        canvas.fill_path(&path, &Brush::Solid(css("#ec4899")));
    }
    caption(canvas, banner, title, "#ffffff");
}

/// Pastel gradient border under an arched ribbon carrying the title.
fn curved_pastel_board(canvas: &mut Canvas, page: Rect, title: &str) {
    let m = page.min_side();
    let border = (m * 0.02).floor().max(8.0);
    let pastel = Brush::Linear {
        start: (page.x, page.y),
        end: (page.right(), page.bottom()),
        stops: vec![
            (0.0, css("#fbcfe8")),
            (0.5, css("#c4b5fd")),
            (1.0, css("#bae6fd")),
        ],
    };
    if let Some(path) = geometry::rounded_rect(page.inset(border / 2.0), border * 3.0) {
        canvas.stroke_path(&path, &pastel, border);
    }

    let ribbon_h = (page.h * 0.09).floor().max(44.0);
    let (left, right) = (page.x + page.w * 0.15, page.right() - page.w * 0.15);
    let top = page.y + border * 1.5;
    let sag = ribbon_h * 0.35;
    let mut pb = PathBuilder::new();
    pb.move_to(left, top + sag);
    pb.quad_to(page.x + page.w / 2.0, top - sag, right, top + sag);
    pb.line_to(right, top + sag + ribbon_h);
    pb.quad_to(page.x + page.w / 2.0, top - sag + ribbon_h, left, top + sag + ribbon_h);
    pb.close();
    if let Some(path) = pb.finish() {
        canvas.fill_path(&path, &Brush::Solid(css("#c4b5fd")));
        canvas.stroke_path(&path, &Brush::Solid(css("#ffffff")), 2.0);
    }
    caption(canvas, Rect::new(left, top, right - left, ribbon_h), title, "#ffffff");

    let dots = Stroke {
        width: 3.0,
        line_cap: tiny_skia::LineCap::Round,
        dash: StrokeDash::new(vec![0.1, 10.0], 0.0),
        ..Stroke::default()
    };
    let y = top + sag + ribbon_h + border;
    if let Some(line) = geometry::line(page.x + border * 2.0, y, page.right() - border * 2.0, y) {
        canvas.stroke_path_with(&line, &Brush::Solid(css("rgba(167,139,250,0.6)")), &dots);
    }
}

/// Dashed cut line, stickers around the edge and a title badge on top.
fn sticker_sheet(canvas: &mut Canvas, page: Rect, title: &str) {
    let m = page.min_side();
    let inset = (m * 0.02).floor().max(8.0);
    let cut = Stroke {
        width: 2.0,
        dash: StrokeDash::new(vec![10.0, 6.0], 0.0),
        ..Stroke::default()
    };
    if let Some(path) = geometry::rounded_rect(page.inset(inset), inset * 2.0) {
        canvas.stroke_path_with(&path, &Brush::Solid(css("#a855f7")), &cut);
    }

    let size = (m * 0.03).max(10.0);
    let stickers = [
        (ShapeKind::Heart, "#f472b6"),
        (ShapeKind::Star, "#facc15"),
        (ShapeKind::Sparkle, "#a855f7"),
    ];
    let steps = 8;
    for i in 0..steps {
        let t = (i as f32 + 0.5) / steps as f32;
        let spots = [
            (page.x + page.w * t, page.bottom() - inset),
            (page.x + inset, page.y + page.h * t),
            (page.right() - inset, page.y + page.h * t),
        ];
        for (j, (x, y)) in spots.into_iter().enumerate() {
            let (kind, color) = stickers[(i + j) % stickers.len()];
            let Some(path) = kind.path(size) else {
                continue;
            };
            let brush = Brush::Solid(css(color));
            let mut c = canvas.save();
            c.translate(x, y);
            c.rotate(if i % 2 == 0 { -12.0 } else { 12.0 });
            if kind == ShapeKind::Sparkle {
                c.stroke_path(&path, &brush, 2.5);
            } else {
                c.fill_path(&path, &brush);
            }
        }
    }

    let badge_h = (page.h * 0.07).floor().max(36.0);
    let badge_w = (page.w * 0.5).max(badge_h * 4.0).min(page.w - inset * 4.0);
    let badge = Rect::new(page.x + (page.w - badge_w) / 2.0, page.y + inset * 2.0, badge_w, badge_h);
    if let Some(path) = geometry::rounded_rect(badge, badge_h / 2.0) {
        canvas.fill_path(&path, &Brush::Solid(css("#ffffff")));
        canvas.stroke_path(&path, &Brush::Solid(css("#f472b6")), 3.0);
    }
    caption(canvas, badge, title, "#a855f7");
}

/// Bold title centered in `banner`, shrunk to fit its width.
fn caption(canvas: &mut Canvas, banner: Rect, title: &str, color: &str) {
    let mut style = TextStyle::new(banner.h * 0.45)
        .bold(true)
        .align(TextAlign::Center)
        .baseline(TextBaseline::Middle);
    if let Some(width) = canvas.measure_text(title, &style) {
        let room = banner.w * 0.9;
        if width > room && width > 0.0 {
            style.size *= room / width;
        }
    }
    let (cx, cy) = banner.center();
    canvas.fill_text(title, cx, cy, &style, &Brush::Solid(css(color)));
}
