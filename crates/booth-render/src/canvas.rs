//! Immediate-mode drawing surface.
//!
//! Wraps a `tiny_skia::Pixmap` together with an explicit drawing state
//! (transform, clip, global alpha, shadow). State changes are scoped with
//! [`Canvas::save`], which hands out a guard that restores the previous state
//! when it goes out of scope, so nested drawing code cannot leak a transform
//! or clip into its siblings.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use image::RgbaImage;
use imageproc::filter::gaussian_blur_f32;
use tiny_skia::{
    Color, FillRule, FilterQuality, GradientStop, IntSize, LinearGradient, Mask, Paint, Path,
    Pixmap, PixmapPaint, Point, RadialGradient, Shader, SpreadMode, Stroke, Transform,
};
use tracing::debug;

use crate::color::with_opacity;
use crate::geometry::{self, Rect};
use crate::text::{FontBook, TextStyle};
use crate::{RenderError, Result};

/// Paint source for fills and strokes.
#[derive(Debug, Clone, PartialEq)]
pub enum Brush {
    Solid(Color),
    /// Linear gradient between two points, stops as `(offset, colour)`.
    Linear {
        start: (f32, f32),
        end: (f32, f32),
        stops: Vec<(f32, Color)>,
    },
    /// Radial gradient between two concentric circles.
    Radial {
        center: (f32, f32),
        inner: f32,
        outer: f32,
        stops: Vec<(f32, Color)>,
    },
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

impl Brush {
    fn first_color(&self) -> Color {
        match self {
            Brush::Solid(c) => *c,
            Brush::Linear { stops, .. } | Brush::Radial { stops, .. } => {
                stops.first().map(|(_, c)| *c).unwrap_or(Color::BLACK)
            }
        }
    }

    fn shader(&self, alpha: f32) -> Shader<'static> {
        let stops = |stops: &[(f32, Color)], remap: &dyn Fn(f32) -> f32| -> Vec<GradientStop> {
            stops
                .iter()
                .map(|(t, c)| GradientStop::new(remap(*t), with_opacity(*c, alpha)))
                .collect()
        };
        let shader = match self {
            Brush::Solid(c) => return Shader::SolidColor(with_opacity(*c, alpha)),
            Brush::Linear { start, end, stops: s } => LinearGradient::new(
                Point::from_xy(start.0, start.1),
                Point::from_xy(end.0, end.1),
                stops(s, &|t| t),
                SpreadMode::Pad,
                Transform::identity(),
            ),
            Brush::Radial {
                center,
                inner,
                outer,
                stops: s,
            } => {
                // Single-circle gradient; the inner radius becomes an offset.
                let r0 = (inner / outer).clamp(0.0, 1.0);
                let c = Point::from_xy(center.0, center.1);
                RadialGradient::new(
                    c,
                    c,
                    *outer,
                    stops(s, &|t| r0 + t * (1.0 - r0)),
                    SpreadMode::Pad,
                    Transform::identity(),
                )
            }
        };
        shader.unwrap_or_else(|| Shader::SolidColor(with_opacity(self.first_color(), alpha)))
    }
}

/// Largest shadow blur honoured; larger values are clamped to it.
pub const MAX_SHADOW_BLUR: f32 = 64.0;

/// Blurred shadow cast beneath fills and strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    pub blur: f32,
}

#[derive(Clone)]
struct DrawState {
    transform: Transform,
    clip: Option<Mask>,
    alpha: f32,
    shadow: Option<Shadow>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            clip: None,
            alpha: 1.0,
            shadow: None,
        }
    }
}

enum PaintOp<'a> {
    Fill,
    Stroke(&'a Stroke),
}

/// A drawing surface owned by one compositing call.
pub struct Canvas {
    pixmap: Pixmap,
    state: DrawState,
    fonts: Arc<FontBook>,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

impl Canvas {
    /// Allocate a transparent surface without fonts.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_fonts(width, height, Arc::new(FontBook::empty()))
    }

    pub fn with_fonts(width: u32, height: u32, fonts: Arc<FontBook>) -> Result<Self> {
        let pixmap =
            Pixmap::new(width, height).ok_or(RenderError::SurfaceUnavailable { width, height })?;
        debug!(width, height, "Allocated drawing surface");
        Ok(Self {
            pixmap,
            state: DrawState::default(),
            fonts,
        })
    }

    /// Allocate a surface holding a copy of `image` at its natural size.
    pub fn from_rgba(image: &RgbaImage, fonts: Arc<FontBook>) -> Result<Self> {
        let pixmap = pixmap_from_rgba(image)?;
        Ok(Self {
            pixmap,
            state: DrawState::default(),
            fonts,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f32, self.height() as f32)
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Push the current state; it is restored when the guard drops.
    pub fn save(&mut self) -> StateGuard<'_> {
        let saved = self.state.clone();
        StateGuard {
            canvas: self,
            saved: Some(saved),
        }
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.state.transform = self.state.transform.pre_translate(x, y);
    }

    /// Rotate clockwise by `degrees` around the current origin.
    pub fn rotate(&mut self, degrees: f32) {
        if degrees != 0.0 {
            self.state.transform = self.state.transform.pre_concat(Transform::from_rotate(degrees));
        }
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.state.alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            1.0
        };
    }

    pub fn alpha(&self) -> f32 {
        self.state.alpha
    }

    pub fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.state.shadow = shadow.filter(|s| s.blur > 0.0).map(|s| Shadow {
            blur: s.blur.min(MAX_SHADOW_BLUR),
            ..s
        });
    }

    /// Intersect the clip region with `path` (in current user space).
    pub fn clip(&mut self, path: &Path) {
        let ts = self.state.transform;
        match self.state.clip.as_mut() {
            Some(mask) => mask.intersect_path(path, FillRule::Winding, true, ts),
            None => {
                let Some(mut mask) = Mask::new(self.pixmap.width(), self.pixmap.height()) else {
                    return;
                };
                mask.fill_path(path, FillRule::Winding, true, ts);
                self.state.clip = Some(mask);
            }
        }
    }

    /// Paint the whole surface, ignoring transform and clip.
    pub fn fill_background(&mut self, color: Color) {
        self.pixmap.fill(color);
    }

    pub fn fill_rect(&mut self, rect: Rect, brush: &Brush) {
        if let Some(path) = geometry::rect(rect) {
            self.fill_path(&path, brush);
        }
    }

    pub fn fill_path(&mut self, path: &Path, brush: &Brush) {
        self.paint_path(path, brush, PaintOp::Fill);
    }

    /// Stroke with butt caps and miter joins.
    pub fn stroke_path(&mut self, path: &Path, brush: &Brush, width: f32) {
        if width <= 0.0 {
            return;
        }
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.paint_path(path, brush, PaintOp::Stroke(&stroke));
    }

    pub fn stroke_path_with(&mut self, path: &Path, brush: &Brush, stroke: &Stroke) {
        self.paint_path(path, brush, PaintOp::Stroke(stroke));
    }

    /// Draw `image` scaled into `dest` with bilinear filtering.
    pub fn draw_image(&mut self, image: &Pixmap, dest: Rect) {
        if dest.is_empty() || image.width() == 0 || image.height() == 0 {
            return;
        }
        let paint = PixmapPaint {
            opacity: self.state.alpha,
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        let ts = self
            .state
            .transform
            .pre_translate(dest.x, dest.y)
            .pre_scale(dest.w / image.width() as f32, dest.h / image.height() as f32);
        self.pixmap
            .draw_pixmap(0, 0, image.as_ref(), &paint, ts, self.state.clip.as_ref());
    }

    pub fn measure_text(&self, text: &str, style: &TextStyle) -> Option<f32> {
        self.fonts.measure(text, style)
    }

    /// Fill `text` anchored at `(x, y)`. Without a usable font this is a no-op.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle, brush: &Brush) {
        let Some(shape) = self.fonts.shape(text, style) else {
            return;
        };
        let Some(path) = shape.path.transform(Transform::from_translate(x, y)) else {
            return;
        };
        self.fill_path(&path, brush);
        if let Some(width) = shape.embolden {
            let shadow = self.state.shadow.take();
            self.stroke_path(&path, brush, width);
            self.state.shadow = shadow;
        }
    }

    pub fn stroke_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        style: &TextStyle,
        brush: &Brush,
        width: f32,
    ) {
        let Some(shape) = self.fonts.shape(text, style) else {
            return;
        };
        let Some(path) = shape.path.transform(Transform::from_translate(x, y)) else {
            return;
        };
        let stroke = Stroke {
            width: width + shape.embolden.unwrap_or(0.0),
            line_join: tiny_skia::LineJoin::Round,
            ..Stroke::default()
        };
        self.stroke_path_with(&path, brush, &stroke);
    }

    /// Copy the surface out as straight-alpha RGBA.
    pub fn to_rgba(&self) -> RgbaImage {
        let mut out = RgbaImage::new(self.width(), self.height());
        for (dst, src) in out.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
        }
        out
    }

    /// Straight-alpha pixel at `(x, y)`, for inspection.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    fn paint_path(&mut self, path: &Path, brush: &Brush, op: PaintOp<'_>) {
        if self.state.alpha <= 0.0 {
            return;
        }
        if let Some(shadow) = self.state.shadow {
            self.paint_shadow(path, shadow, &op);
        }
        let mut paint = Paint::default();
        paint.shader = brush.shader(self.state.alpha);
        paint.anti_alias = true;
        let ts = self.state.transform;
        let clip = self.state.clip.as_ref();
        match op {
            PaintOp::Fill => self.pixmap.fill_path(path, &paint, FillRule::Winding, ts, clip),
            PaintOp::Stroke(stroke) => self.pixmap.stroke_path(path, &paint, stroke, ts, clip),
        }
    }

    /// Render `path` in the shadow colour on a side layer, blur it and
    /// composite it beneath whatever is drawn next.
    fn paint_shadow(&mut self, path: &Path, shadow: Shadow, op: &PaintOp<'_>) {
        let Some(device) = path.clone().transform(self.state.transform) else {
            return;
        };
        let b = device.bounds();
        let stroke_pad = match op {
            PaintOp::Fill => 0.0,
            PaintOp::Stroke(s) => s.width,
        };
        let spread = shadow.blur * 1.5 + stroke_pad;
        let left = (b.left() - spread).floor().max(0.0);
        let top = (b.top() - spread).floor().max(0.0);
        let right = (b.right() + spread).ceil().min(self.width() as f32);
        let bottom = (b.bottom() + spread).ceil().min(self.height() as f32);
        if right <= left || bottom <= top {
            return;
        }
        let (lw, lh) = ((right - left) as u32, (bottom - top) as u32);
        let Some(mut layer) = Pixmap::new(lw, lh) else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(with_opacity(shadow.color, self.state.alpha));
        paint.anti_alias = true;
        let ts = Transform::from_translate(-left, -top);
        match op {
            PaintOp::Fill => layer.fill_path(&device, &paint, FillRule::Winding, ts, None),
            PaintOp::Stroke(stroke) => {
                // Stroke in user space so the width follows the transform.
                let ts = ts.pre_concat(self.state.transform);
                layer.stroke_path(path, &paint, stroke, ts, None)
            }
        }

        let Some(raw) = RgbaImage::from_raw(lw, lh, layer.data().to_vec()) else {
            return;
        };
        let blurred = gaussian_blur_f32(&raw, shadow.blur / 2.0);
        for (dst, src) in layer.data_mut().chunks_exact_mut(4).zip(blurred.pixels()) {
            let [r, g, b, a] = src.0;
            dst.copy_from_slice(&[r.min(a), g.min(a), b.min(a), a]);
        }

        self.pixmap.draw_pixmap(
            left as i32,
            top as i32,
            layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            self.state.clip.as_ref(),
        );
    }
}

/// Scoped drawing state; dereferences to the canvas it was taken from.
pub struct StateGuard<'a> {
    canvas: &'a mut Canvas,
    saved: Option<DrawState>,
}

impl Deref for StateGuard<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for StateGuard<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.canvas.state = saved;
        }
    }
}

/// Convert straight-alpha RGBA into a premultiplied pixmap.
pub fn pixmap_from_rgba(image: &RgbaImage) -> Result<Pixmap> {
    let (width, height) = image.dimensions();
    let size =
        IntSize::from_wh(width, height).ok_or(RenderError::SurfaceUnavailable { width, height })?;
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = a as f32 / 255.0;
        data.push((r as f32 * alpha).round() as u8);
        data.push((g as f32 * alpha).round() as u8);
        data.push((b as f32 * alpha).round() as u8);
        data.push(a);
    }
    Pixmap::from_vec(data, size).ok_or(RenderError::SurfaceUnavailable { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn red() -> Brush {
        Brush::Solid(Color::from_rgba8(255, 0, 0, 255))
    }

    #[test]
    fn zero_sized_surface_is_unavailable() {
        let err = Canvas::new(0, 10).unwrap_err();
        assert!(matches!(
            err,
            RenderError::SurfaceUnavailable { width: 0, height: 10 }
        ));
    }

    #[test]
    fn guard_restores_transform_and_alpha() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        {
            let mut g = canvas.save();
            g.translate(10.0, 10.0);
            g.set_alpha(0.0);
            g.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), &red());
        }
        canvas.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), &red());
        assert_eq!(canvas.pixel(2, 2), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(12, 12), Some([0, 0, 0, 0]));
    }

    #[test]
    fn nested_guards_unwind_in_order() {
        let mut canvas = Canvas::new(30, 30).unwrap();
        {
            let mut outer = canvas.save();
            outer.translate(10.0, 0.0);
            {
                let mut inner = outer.save();
                inner.translate(0.0, 10.0);
                inner.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), &red());
            }
            outer.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), &red());
        }
        assert_eq!(canvas.pixel(11, 11).unwrap()[0], 255);
        assert_eq!(canvas.pixel(11, 1).unwrap()[0], 255);
        assert_eq!(canvas.pixel(1, 1).unwrap()[3], 0);
    }

    #[test]
    fn clip_limits_drawing() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        {
            let mut g = canvas.save();
            let clip = geometry::rect(Rect::new(0.0, 0.0, 10.0, 20.0)).unwrap();
            g.clip(&clip);
            g.fill_rect(canvas_rect(), &red());
        }
        assert_eq!(canvas.pixel(5, 5).unwrap()[3], 255);
        assert_eq!(canvas.pixel(15, 5).unwrap()[3], 0);
    }

    fn canvas_rect() -> Rect {
        Rect::new(0.0, 0.0, 20.0, 20.0)
    }

    #[test]
    fn draw_image_scales_into_dest() {
        let src = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]));
        let pixmap = pixmap_from_rgba(&src).unwrap();
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.draw_image(&pixmap, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(canvas.pixel(5, 5), Some([0, 0, 255, 255]));
    }

    #[test]
    fn rgba_round_trip_keeps_opaque_pixels() {
        let mut src = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        src.put_pixel(1, 1, Rgba([200, 100, 50, 255]));
        let canvas = Canvas::from_rgba(&src, Arc::new(FontBook::empty())).unwrap();
        assert_eq!(canvas.to_rgba(), src);
    }

    #[test]
    fn shadow_spreads_beyond_shape() {
        let mut canvas = Canvas::new(40, 40).unwrap();
        canvas.set_shadow(Some(Shadow {
            color: Color::BLACK,
            blur: 8.0,
        }));
        canvas.fill_rect(Rect::new(15.0, 15.0, 10.0, 10.0), &red());
        assert_eq!(canvas.pixel(20, 20), Some([255, 0, 0, 255]));
        assert!(canvas.pixel(13, 20).unwrap()[3] > 0, "shadow halo");
        assert_eq!(canvas.pixel(0, 0).unwrap()[3], 0);
    }

    #[test]
    fn shadow_blur_is_clamped() {
        let mut canvas = Canvas::new(40, 40).unwrap();
        for blur in [f32::INFINITY, 1.0e9] {
            canvas.set_shadow(Some(Shadow {
                color: Color::BLACK,
                blur,
            }));
            assert_eq!(canvas.state.shadow.map(|s| s.blur), Some(MAX_SHADOW_BLUR));
        }
        canvas.fill_rect(Rect::new(15.0, 15.0, 10.0, 10.0), &red());
        assert_eq!(canvas.pixel(20, 20), Some([255, 0, 0, 255]));

        canvas.set_shadow(Some(Shadow {
            color: Color::BLACK,
            blur: f32::NAN,
        }));
        assert!(canvas.state.shadow.is_none());
    }

    #[test]
    fn radial_gradient_runs_inner_to_outer() {
        let mut canvas = Canvas::new(40, 40).unwrap();
        let brush = Brush::Radial {
            center: (20.0, 20.0),
            inner: 5.0,
            outer: 20.0,
            stops: vec![(0.0, Color::TRANSPARENT), (1.0, Color::WHITE)],
        };
        canvas.fill_rect(Rect::new(0.0, 0.0, 40.0, 40.0), &brush);
        assert_eq!(canvas.pixel(20, 20).unwrap()[3], 0);
        assert!(canvas.pixel(20, 1).unwrap()[3] > 200);
    }

    #[test]
    fn text_without_fonts_is_a_no_op() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        canvas.fill_text("Hi", 10.0, 10.0, &TextStyle::new(12.0), &red());
        assert!(canvas.to_rgba().pixels().all(|p| p.0[3] == 0));
    }
}
