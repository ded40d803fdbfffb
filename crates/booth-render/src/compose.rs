//! Multi-cell collage composition.
//!
//! Every selected source is loaded concurrently. Cells are drawn in whatever
//! order the loads settle; each cell only touches its own region, so the
//! result does not depend on that order. Page decoration runs once every
//! cell has settled.

use std::sync::Arc;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tiny_skia::{Color, Path, Pixmap};
use tracing::{debug, info, warn};

use crate::canvas::{Brush, Canvas, pixmap_from_rgba};
use crate::color::{color_or, css};
use crate::encode::EncodedImage;
use crate::frame::{Frame, draw_frame_with_rng};
use crate::geometry::{self, Rect, cover};
use crate::loader::load_image;
use crate::overlay::{Overlay, ShapeKind, draw_overlays};
use crate::tags::closed_tag;
use crate::template::{TemplateId, draw_template};
use crate::text::{FontBook, FontFamily, TextAlign, TextStyle};
use crate::{RenderError, Result};

const DEFAULT_EMOJIS: [&str; 5] = ["✨", "📸", "💜", "🌈", "🎉"];
const FALLBACK_EMOJI: &str = "✨";
const MODERN_TITLE: &str = "Collage";

closed_tag! {
    /// Clip shape applied to each cell's photo.
    pub enum CellMask {
        None => "none",
        Rounded => "rounded",
        Circle => "circle",
        Oval => "oval",
    }
    fallback = None;
}

closed_tag! {
    /// Collage-wide visual style.
    pub enum CollageStyle {
        Classic => "classic",
        Polaroid => "polaroid",
        Emoji => "emoji",
        Modern => "modern",
    }
    fallback = Classic;
}

/// Grid descriptor: `rows * cols` equally sized cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollageLayout {
    pub rows: u32,
    pub cols: u32,
}

impl CollageLayout {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    pub fn slots(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

/// Collage rendering options. Missing fields take the documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollageOptions {
    pub cell_width: u32,
    pub cell_height: u32,
    pub padding: f32,
    pub bg_color: String,
    pub corner_radius: f32,
    pub style: CollageStyle,
    pub emojis: Vec<String>,
    /// Image stretched over the whole page after the cells are drawn.
    pub overlay_url: Option<String>,
    pub mask: CellMask,
    /// Stack every image in a single column, ignoring the layout.
    pub vertical: bool,
    pub frame: Frame,
    pub overlays: Vec<Overlay>,
    pub template_id: Option<TemplateId>,
    pub title: Option<String>,
}

impl Default for CollageOptions {
    fn default() -> Self {
        Self {
            cell_width: 400,
            cell_height: 300,
            padding: 8.0,
            bg_color: "#ffffff".into(),
            corner_radius: 16.0,
            style: CollageStyle::Classic,
            emojis: DEFAULT_EMOJIS.iter().map(|e| e.to_string()).collect(),
            overlay_url: None,
            mask: CellMask::Rounded,
            vertical: false,
            frame: Frame::None,
            overlays: Vec::new(),
            template_id: None,
            title: None,
        }
    }
}

/// Effective `(rows, cols)` after the vertical override.
pub fn effective_grid(image_count: usize, layout: CollageLayout, vertical: bool) -> (u32, u32) {
    if vertical {
        let rows = u32::try_from(image_count.max(1)).unwrap_or(u32::MAX);
        (rows, 1)
    } else {
        (layout.rows, layout.cols)
    }
}

/// Render a collage. Never fails: a surface that cannot be allocated yields
/// [`EncodedImage::empty`], and failed loads leave their cell undecorated.
pub async fn render_collage<R: Rng + ?Sized>(
    fonts: Arc<FontBook>,
    images: &[String],
    layout: CollageLayout,
    options: &CollageOptions,
    rng: &mut R,
) -> EncodedImage {
    let (rows, cols) = effective_grid(images.len(), layout, options.vertical);
    let mut canvas = match page_canvas(fonts, rows, cols, options) {
        Ok(canvas) => canvas,
        Err(e) => {
            warn!(error = %e, rows, cols, "Cannot allocate collage surface");
            return EncodedImage::empty();
        }
    };
    canvas.fill_background(color_or(&options.bg_color, Color::WHITE));

    let count = images.len().min(rows as usize * cols as usize);
    if count == 0 {
        debug!("No images selected; returning background");
        return encode(&canvas);
    }
    if images.len() > count {
        debug!(dropped = images.len() - count, "Ignoring images beyond grid capacity");
    }

    // One seed per cell, drawn up front, so scattered decoration does not
    // depend on the order loads settle in.
    let seeds: Vec<u64> = (0..count).map(|_| rng.r#gen()).collect();
    let mut pending: FuturesUnordered<_> = images[..count]
        .iter()
        .enumerate()
        .map(|(index, source)| async move { (index, load_image(source).await) })
        .collect();

    let mut settled = 0;
    while let Some((index, loaded)) = pending.next().await {
        let pixmap = loaded.and_then(|img| pixmap_from_rgba(&img));
        if let Err(e) = &pixmap {
            warn!(index, error = %e, "Collage cell image failed to load");
        }
        let mut cell_rng = StdRng::seed_from_u64(seeds[index]);
        draw_cell(&mut canvas, index, cols, pixmap.ok().as_ref(), options, &mut cell_rng);
        settled += 1;
    }
    info!(cells = settled, rows, cols, "All collage cells settled");

    finalize(&mut canvas, options).await;
    encode(&canvas)
}

fn page_canvas(fonts: Arc<FontBook>, rows: u32, cols: u32, options: &CollageOptions) -> Result<Canvas> {
    let width = options.cell_width.checked_mul(cols);
    let height = options.cell_height.checked_mul(rows);
    match (width, height) {
        (Some(width), Some(height)) => Canvas::with_fonts(width, height, fonts),
        _ => Err(RenderError::SurfaceUnavailable {
            width: options.cell_width,
            height: options.cell_height,
        }),
    }
}

/// Full region owned by cell `index` in a row-major grid with `cols` columns.
pub fn cell_bounds(index: usize, cols: u32, options: &CollageOptions) -> Rect {
    let cols = cols.max(1) as usize;
    let (row, col) = (index / cols, index % cols);
    let (cw, ch) = (options.cell_width as f32, options.cell_height as f32);
    Rect::new(col as f32 * cw, row as f32 * ch, cw, ch)
}

/// Inset rectangle of cell `index`, where the photo goes.
pub fn cell_rect(index: usize, cols: u32, options: &CollageOptions) -> Rect {
    cell_bounds(index, cols, options).inset(options.padding)
}

fn draw_cell(
    canvas: &mut Canvas,
    index: usize,
    cols: u32,
    image: Option<&Pixmap>,
    options: &CollageOptions,
    rng: &mut StdRng,
) {
    // Cells settle in any order, so nothing may spill into a neighbour.
    let mut canvas = canvas.save();
    if let Some(own) = geometry::rect(cell_bounds(index, cols, options)) {
        canvas.clip(&own);
    }

    let inner = cell_rect(index, cols, options);
    let swatch = match options.style {
        CollageStyle::Polaroid => "#ffffff",
        _ => "#f7f7f7",
    };
    if let Some(path) = geometry::rounded_rect(inner, options.corner_radius) {
        canvas.fill_path(&path, &Brush::Solid(css(swatch)));
    }
    let Some(image) = image else {
        return;
    };

    {
        let mut c = canvas.save();
        if let Some(clip) = mask_path(options.mask, inner, options.corner_radius) {
            c.clip(&clip);
        }
        let dest = cover(image.width() as f32, image.height() as f32, inner);
        c.draw_image(image, dest);
    }

    draw_frame_with_rng(&mut canvas, inner, options.frame, rng);

    match options.style {
        CollageStyle::Polaroid => polaroid_strip(&mut canvas, inner),
        CollageStyle::Emoji => emoji_stamp(&mut canvas, inner, index, &options.emojis),
        CollageStyle::Classic | CollageStyle::Modern => {}
    }

    let outline = match options.mask {
        CellMask::Circle | CellMask::Oval => mask_path(options.mask, inner, options.corner_radius),
        CellMask::None | CellMask::Rounded => geometry::rounded_rect(inner, options.corner_radius),
    };
    if let Some(path) = outline {
        canvas.stroke_path(&path, &Brush::Solid(css("rgba(0,0,0,0.06)")), 2.0);
    }
}

fn mask_path(mask: CellMask, inner: Rect, corner_radius: f32) -> Option<Path> {
    match mask {
        CellMask::None => geometry::rect(inner),
        CellMask::Rounded => geometry::rounded_rect(inner, corner_radius),
        CellMask::Circle => {
            let (cx, cy) = inner.center();
            geometry::circle(cx, cy, inner.min_side() / 2.0)
        }
        CellMask::Oval => geometry::ellipse(inner),
    }
}

fn polaroid_strip(canvas: &mut Canvas, inner: Rect) {
    let strip = (inner.h * 0.14).round();
    canvas.fill_rect(
        Rect::new(inner.x, inner.bottom() - strip, inner.w, strip),
        &Brush::Solid(Color::WHITE),
    );
    let style = TextStyle::new((strip / 3.0).max(12.0)).align(TextAlign::Center);
    canvas.fill_text(
        "Photo",
        inner.x + inner.w / 2.0,
        inner.bottom() - strip / 2.0 + 6.0,
        &style,
        &Brush::Solid(css("#666666")),
    );
}

/// Stamp the cell's emoji top-right. Emoji the loaded fonts cannot render
/// are replaced by a matching vector sticker.
fn emoji_stamp(canvas: &mut Canvas, inner: Rect, index: usize, emojis: &[String]) {
    let emoji = match emojis.get(index % emojis.len().max(1)) {
        Some(e) if !e.trim().is_empty() => e.as_str(),
        _ => FALLBACK_EMOJI,
    };
    let size = (inner.min_side() / 6.0).round();
    let (right, baseline) = (inner.right() - 8.0, inner.y + 24.0);
    let (kind, color) = emoji_sticker(emoji);

    if canvas.fonts().covers(emoji, FontFamily::Serif) {
        let style = TextStyle::new(size)
            .family(FontFamily::Serif)
            .align(TextAlign::Right);
        canvas.fill_text(emoji, right, baseline, &style, &Brush::Solid(css(color)));
        return;
    }

    let Some(path) = kind.path(size / 2.0) else {
        return;
    };
    let mut c = canvas.save();
    c.translate(right - size / 2.0, baseline - size * 0.35);
    let brush = Brush::Solid(css(color));
    if kind == ShapeKind::Sparkle {
        c.stroke_path(&path, &brush, (size * 0.08).max(2.0));
    } else {
        c.fill_path(&path, &brush);
    }
}

fn emoji_sticker(emoji: &str) -> (ShapeKind, &'static str) {
    match emoji.chars().next() {
        Some('💜') => (ShapeKind::Heart, "#a855f7"),
        Some('💖' | '💗' | '💕' | '❤' | '🩷') => (ShapeKind::Heart, "#ec4899"),
        Some('✨') => (ShapeKind::Sparkle, "#facc15"),
        Some('⭐' | '🌟') => (ShapeKind::Star, "#facc15"),
        _ => (ShapeKind::Star, "#f472b6"),
    }
}

async fn finalize(canvas: &mut Canvas, options: &CollageOptions) {
    if let Some(url) = options.overlay_url.as_deref().filter(|u| !u.is_empty()) {
        match load_image(url).await.and_then(|img| pixmap_from_rgba(&img)) {
            Ok(overlay) => {
                let page = canvas.bounds();
                canvas.draw_image(&overlay, page);
            }
            Err(e) => warn!(error = %e, "Page overlay image failed to load"),
        }
    }

    if let Some(template) = options.template_id.filter(|t| *t != TemplateId::None) {
        draw_template(canvas, template, options.title.as_deref());
    }

    if !options.overlays.is_empty() {
        let (w, h) = (canvas.width() as f32, canvas.height() as f32);
        draw_overlays(canvas, w, h, &options.overlays);
    }

    if options.style == CollageStyle::Modern {
        modern_title(canvas);
    }
}

/// Centered serif title 60px from the top, flanked by sparkles.
fn modern_title(canvas: &mut Canvas) {
    let cx = canvas.width() as f32 / 2.0;
    let baseline = 60.0;
    let ink = Brush::Solid(css("rgba(255,255,255,0.9)"));
    let style = TextStyle::new(48.0)
        .family(FontFamily::Serif)
        .align(TextAlign::Center);
    canvas.fill_text(MODERN_TITLE, cx, baseline, &style, &ink);

    let half = canvas
        .measure_text(MODERN_TITLE, &style)
        .map_or(84.0, |w| w / 2.0);
    let Some(sparkle) = ShapeKind::Sparkle.path(14.0) else {
        return;
    };
    for x in [cx - half - 30.0, cx + half + 30.0] {
        let mut c = canvas.save();
        c.translate(x, baseline - 16.0);
        c.stroke_path(&sparkle, &ink, 3.0);
    }
}

fn encode(canvas: &Canvas) -> EncodedImage {
    match EncodedImage::from_rgba(&canvas.to_rgba()) {
        Ok(image) => image,
        Err(e) => {
            warn!(error = %e, "Collage encoding failed");
            EncodedImage::empty()
        }
    }
}

#[cfg(test)]
mod tests;
