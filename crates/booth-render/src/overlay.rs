//! Free-form text and shape overlays placed in normalized coordinates.

use serde::{Deserialize, Serialize};
use tiny_skia::{Color, Path};
use tracing::trace;

use crate::canvas::{Brush, Canvas, Shadow};
use crate::color::color_or;
use crate::geometry;
use crate::tags::closed_tag;
use crate::text::{FontFamily, TextAlign, TextBaseline, TextStyle};

const DEFAULT_STROKE_WIDTH: f32 = 2.0;

closed_tag! {
    /// Vector glyphs available as shape overlays and stickers.
    pub enum ShapeKind {
        Heart => "heart",
        Star => "star",
        Sparkle => "sparkle",
        Unknown => "unknown",
    }
    fallback = Unknown;
}

impl ShapeKind {
    /// The glyph centered on the origin at `size`; `None` for unknown kinds.
    pub fn path(self, size: f32) -> Option<Path> {
        match self {
            ShapeKind::Heart => geometry::heart(size),
            ShapeKind::Star => geometry::star(size, size * 0.5, 5),
            ShapeKind::Sparkle => geometry::sparkle(size),
            ShapeKind::Unknown => None,
        }
    }
}

/// A positioned decoration. List order is z-order, first at the bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Overlay {
    Text(TextOverlay),
    Shape(ShapeOverlay),
    /// Any overlay type this renderer does not know; drawn as nothing.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOverlay {
    pub id: String,
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    pub font_size: f32,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_blur: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeOverlay {
    pub id: String,
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    pub shape: ShapeKind,
    pub size: f32,
    pub fill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f32>,
}

impl Overlay {
    pub fn id(&self) -> Option<&str> {
        match self {
            Overlay::Text(t) => Some(&t.id),
            Overlay::Shape(s) => Some(&s.id),
            Overlay::Unknown => None,
        }
    }

    /// Normalized `(x, y)` position.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Overlay::Text(t) => Some((t.x, t.y)),
            Overlay::Shape(s) => Some((s.x, s.y)),
            Overlay::Unknown => None,
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        match self {
            Overlay::Text(t) => {
                t.x = x;
                t.y = y;
            }
            Overlay::Shape(s) => {
                s.x = x;
                s.y = y;
            }
            Overlay::Unknown => {}
        }
    }

    fn transform(&self) -> (f32, f32) {
        match self {
            Overlay::Text(t) => (t.rotation.unwrap_or(0.0), t.opacity.unwrap_or(1.0)),
            Overlay::Shape(s) => (s.rotation.unwrap_or(0.0), s.opacity.unwrap_or(1.0)),
            Overlay::Unknown => (0.0, 1.0),
        }
    }
}

/// Pixel origin of an overlay on a `width` x `height` canvas, before rotation.
///
/// `x` is always relative to the width and `y` to the height. Values outside
/// `[0, 1]` are not clamped and place the overlay off-canvas.
pub fn overlay_origin(x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
    (x * width, y * height)
}

/// Draw `overlays` in order using `width` x `height` as the coordinate basis.
pub fn draw_overlays(canvas: &mut Canvas, width: f32, height: f32, overlays: &[Overlay]) {
    for overlay in overlays {
        let Some((x, y)) = overlay.position() else {
            trace!("Skipping overlay of unknown type");
            continue;
        };
        let (rotation, opacity) = overlay.transform();
        let (ox, oy) = overlay_origin(x, y, width, height);

        let mut c = canvas.save();
        c.translate(ox, oy);
        c.rotate(rotation);
        c.set_alpha(opacity);
        match overlay {
            Overlay::Text(text) => draw_text(&mut c, text),
            Overlay::Shape(shape) => draw_shape(&mut c, shape),
            Overlay::Unknown => {}
        }
    }
}

fn draw_text(canvas: &mut Canvas, t: &TextOverlay) {
    if t.text.is_empty() {
        return;
    }
    let style = TextStyle::new(t.font_size)
        .bold(t.bold.unwrap_or(false))
        .family(
            t.font_family
                .as_deref()
                .map(FontFamily::from_css)
                .unwrap_or_default(),
        )
        .align(t.align.unwrap_or(TextAlign::Center))
        .baseline(TextBaseline::Middle);

    if let Some(width) = t.outline_width.filter(|w| *w > 0.0) {
        let outline = color_or(t.outline_color.as_deref().unwrap_or("#000000"), Color::BLACK);
        canvas.stroke_text(&t.text, 0.0, 0.0, &style, &Brush::Solid(outline), width);
    }
    if let Some(blur) = t.shadow_blur.filter(|b| *b > 0.0) {
        let color = color_or(t.shadow_color.as_deref().unwrap_or("#000000"), Color::BLACK);
        canvas.set_shadow(Some(Shadow { color, blur }));
    }
    let fill = color_or(&t.color, Color::WHITE);
    canvas.fill_text(&t.text, 0.0, 0.0, &style, &Brush::Solid(fill));
}

fn draw_shape(canvas: &mut Canvas, s: &ShapeOverlay) {
    let Some(path) = s.shape.path(s.size) else {
        trace!(id = %s.id, shape = %s.shape, "Skipping unknown shape");
        return;
    };
    let fill = Brush::Solid(color_or(&s.fill, Color::WHITE));
    let width = s.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH);
    let stroke = s.stroke.as_deref().map(|c| Brush::Solid(color_or(c, Color::BLACK)));

    if s.shape == ShapeKind::Sparkle {
        // Lines only: stroke with the fill colour unless a stroke is set.
        canvas.stroke_path(&path, stroke.as_ref().unwrap_or(&fill), width);
        return;
    }
    canvas.fill_path(&path, &fill);
    if let Some(stroke) = &stroke {
        canvas.stroke_path(&path, stroke, width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(kind: ShapeKind, x: f32, y: f32) -> Overlay {
        Overlay::Shape(ShapeOverlay {
            id: "s1".into(),
            x,
            y,
            rotation: None,
            opacity: None,
            shape: kind,
            size: 10.0,
            fill: "#ff0000".into(),
            stroke: None,
            stroke_width: None,
        })
    }

    #[test]
    fn origin_maps_normalized_coordinates() {
        assert_eq!(overlay_origin(0.5, 0.5, 200.0, 100.0), (100.0, 50.0));
        assert_eq!(overlay_origin(1.5, -0.5, 200.0, 100.0), (300.0, -50.0));
    }

    #[test]
    fn deserializes_browser_shapes() {
        let json = r##"[
            {"type":"text","id":"t1","x":0.5,"y":0.85,"text":"Hi","fontSize":36,
             "color":"#ffffff","bold":true,"align":"center","outlineColor":"#000000",
             "outlineWidth":4,"shadowColor":"rgba(0,0,0,0.4)","shadowBlur":8},
            {"type":"shape","id":"s1","x":0.2,"y":0.3,"shape":"heart","size":28,
             "fill":"#f472b6","stroke":"#be185d","strokeWidth":2,"opacity":1},
            {"type":"sticker","id":"x"}
        ]"##;
        let overlays: Vec<Overlay> = serde_json::from_str(json).unwrap();
        assert_eq!(overlays.len(), 3);
        let Overlay::Text(t) = &overlays[0] else {
            panic!("expected text");
        };
        assert_eq!(t.font_size, 36.0);
        assert_eq!(t.outline_width, Some(4.0));
        assert!(matches!(&overlays[1], Overlay::Shape(s) if s.shape == ShapeKind::Heart));
        assert_eq!(overlays[2], Overlay::Unknown);
    }

    #[test]
    fn unknown_shape_kind_is_tolerated() {
        let json = r#"{"type":"shape","id":"s","x":0,"y":0,"shape":"moon","size":5,"fill":"red"}"#;
        let overlay: Overlay = serde_json::from_str(json).unwrap();
        assert!(matches!(overlay, Overlay::Shape(s) if s.shape == ShapeKind::Unknown));
    }

    #[test]
    fn shapes_draw_at_their_origin() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        draw_overlays(&mut canvas, 100.0, 100.0, &[shape(ShapeKind::Star, 0.5, 0.5)]);
        assert_eq!(canvas.pixel(50, 50), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(10, 10).unwrap()[3], 0);
    }

    #[test]
    fn unknown_entries_do_not_stop_the_batch() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        let overlays = [
            Overlay::Unknown,
            shape(ShapeKind::Unknown, 0.5, 0.5),
            shape(ShapeKind::Heart, 0.25, 0.25),
        ];
        draw_overlays(&mut canvas, 100.0, 100.0, &overlays);
        assert!(canvas.pixel(25, 25).unwrap()[3] > 0);
        assert_eq!(canvas.pixel(50, 50).unwrap()[3], 0);
    }

    #[test]
    fn opacity_and_rotation_do_not_accumulate() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        let mut faded = shape(ShapeKind::Star, 0.2, 0.2);
        if let Overlay::Shape(s) = &mut faded {
            s.opacity = Some(0.0);
            s.rotation = Some(45.0);
        }
        draw_overlays(&mut canvas, 100.0, 100.0, &[faded, shape(ShapeKind::Star, 0.7, 0.7)]);
        assert_eq!(canvas.pixel(20, 20).unwrap()[3], 0);
        assert_eq!(canvas.pixel(70, 70), Some([255, 0, 0, 255]));
    }

    #[test]
    fn sparkle_strokes_with_fill_colour() {
        let mut canvas = Canvas::new(40, 40).unwrap();
        draw_overlays(&mut canvas, 40.0, 40.0, &[shape(ShapeKind::Sparkle, 0.5, 0.5)]);
        // 2px horizontal arm through the centre
        assert_eq!(canvas.pixel(26, 19), Some([255, 0, 0, 255]));
    }

    #[test]
    fn set_position_moves_known_overlays() {
        let mut o = shape(ShapeKind::Heart, 0.1, 0.1);
        o.set_position(0.9, 0.4);
        assert_eq!(o.position(), Some((0.9, 0.4)));
        assert_eq!(o.id(), Some("s1"));
    }
}
