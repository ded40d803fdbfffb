//! Font loading and text layout.
//!
//! Text is converted to vector outlines so the drawing surface can fill,
//! stroke, rotate and shadow it like any other path. Sizes follow CSS: the
//! requested size is the em size in pixels.

use std::path::{Path as FsPath, PathBuf};

use ab_glyph::{Font, FontArc, GlyphId, Outline, OutlineCurve, PxScale, PxScaleFactor, ScaleFont};
use tiny_skia::{Path, PathBuilder};
use tracing::{debug, info, warn};

use crate::tags::closed_tag;
use crate::{RenderError, Result};

/// Stroke width used to fake a bold weight when no bold face is loaded,
/// as a fraction of the font size.
const SYNTHETIC_BOLD: f32 = 0.04;

closed_tag! {
    /// Horizontal anchoring of text relative to its origin.
    pub enum TextAlign {
        Left => "left",
        Center => "center",
        Right => "right",
    }
    fallback = Center;
}

/// Vertical anchoring of text relative to its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Middle,
}

/// Generic font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    #[default]
    SansSerif,
    Serif,
}

impl FontFamily {
    /// Map a CSS `font-family` value onto a generic family.
    pub fn from_css(family: &str) -> Self {
        let family = family.to_ascii_lowercase();
        if family.contains("serif") && !family.contains("sans") {
            Self::Serif
        } else {
            Self::SansSerif
        }
    }
}

/// Font selection and anchoring for one text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub family: FontFamily,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextStyle {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            bold: false,
            family: FontFamily::SansSerif,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn family(mut self, family: FontFamily) -> Self {
        self.family = family;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }
}

/// A laid-out text run, in coordinates relative to the run's anchor.
#[derive(Debug, Clone)]
pub struct TextShape {
    pub path: Path,
    pub width: f32,
    /// Stroke width to apply with the fill when the weight is synthesized.
    pub embolden: Option<f32>,
}

/// Font files to load. Missing entries fall back to the system candidates.
#[derive(Debug, Clone, Default)]
pub struct FontPaths {
    pub regular: Option<PathBuf>,
    pub bold: Option<PathBuf>,
    pub serif: Option<PathBuf>,
}

/// The faces available to a drawing surface.
#[derive(Clone, Default)]
pub struct FontBook {
    sans: Option<FontArc>,
    sans_bold: Option<FontArc>,
    serif: Option<FontArc>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("sans", &self.sans.is_some())
            .field("sans_bold", &self.sans_bold.is_some())
            .field("serif", &self.serif.is_some())
            .finish()
    }
}

impl FontBook {
    /// A book with no faces; every text draw becomes a no-op.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a book from in-memory TTF/OTF data.
    pub fn from_bytes(
        regular: Vec<u8>,
        bold: Option<Vec<u8>>,
        serif: Option<Vec<u8>>,
    ) -> Result<Self> {
        let parse = |data: Vec<u8>| FontArc::try_from_vec(data).map_err(|_| RenderError::FontUnavailable);
        Ok(Self {
            sans: Some(parse(regular)?),
            sans_bold: bold.map(parse).transpose()?,
            serif: serif.map(parse).transpose()?,
        })
    }

    /// Load the configured faces, probing system font locations for any
    /// face that is not configured or fails to parse.
    pub fn load(paths: &FontPaths) -> Self {
        let sans = paths
            .regular
            .as_deref()
            .and_then(load_face)
            .or_else(|| first_face(SANS_CANDIDATES));
        let sans_bold = paths
            .bold
            .as_deref()
            .and_then(load_face)
            .or_else(|| first_face(BOLD_CANDIDATES));
        let serif = paths
            .serif
            .as_deref()
            .and_then(load_face)
            .or_else(|| first_face(SERIF_CANDIDATES));

        let book = Self {
            sans,
            sans_bold,
            serif,
        };
        if book.is_empty() {
            warn!("No usable font found; text overlays and captions will not render");
        }
        book
    }

    /// Load faces from the system font locations only.
    pub fn system() -> Self {
        Self::load(&FontPaths::default())
    }

    pub fn is_empty(&self) -> bool {
        self.sans.is_none() && self.sans_bold.is_none() && self.serif.is_none()
    }

    /// Pick a face; the flag is true when bold has to be synthesized.
    fn face(&self, family: FontFamily, bold: bool) -> Option<(&FontArc, bool)> {
        if bold && family == FontFamily::SansSerif {
            if let Some(face) = &self.sans_bold {
                return Some((face, false));
            }
        }
        let preferred = match family {
            FontFamily::Serif => self.serif.as_ref().or(self.sans.as_ref()),
            FontFamily::SansSerif => self.sans.as_ref().or(self.serif.as_ref()),
        };
        preferred
            .or(self.sans_bold.as_ref())
            .map(|face| (face, bold))
    }

    /// Whether every non-whitespace character of `text` has a glyph.
    pub fn covers(&self, text: &str, family: FontFamily) -> bool {
        let Some((font, _)) = self.face(family, false) else {
            return false;
        };
        text.chars()
            .filter(|c| !c.is_whitespace() && !is_variation_selector(*c))
            .all(|c| font.glyph_id(c).0 != 0)
    }

    /// Advance width of `text` in pixels.
    pub fn measure(&self, text: &str, style: &TextStyle) -> Option<f32> {
        let (font, _) = self.face(style.family, style.bold)?;
        let scaled = font.as_scaled(em_scale(font, style.size));
        Some(advance(&scaled, text))
    }

    /// Lay out `text` as a path anchored according to `style`.
    pub fn shape(&self, text: &str, style: &TextStyle) -> Option<TextShape> {
        if text.is_empty() || style.size <= 0.0 {
            return None;
        }
        let (font, synthetic) = self.face(style.family, style.bold)?;
        let scaled = font.as_scaled(em_scale(font, style.size));
        let factor = scaled.scale_factor();
        let width = advance(&scaled, text);

        let dx = match style.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -width / 2.0,
            TextAlign::Right => -width,
        };
        let dy = match style.baseline {
            TextBaseline::Alphabetic => 0.0,
            TextBaseline::Middle => (scaled.ascent() + scaled.descent()) / 2.0,
        };

        let mut pb = PathBuilder::new();
        let mut pen = dx;
        let mut prev: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(p) = prev {
                pen += scaled.kern(p, id);
            }
            if id.0 != 0 {
                if let Some(outline) = font.outline(id) {
                    append_outline(&mut pb, &outline, pen, dy, factor);
                }
            }
            pen += scaled.h_advance(id);
            prev = Some(id);
        }

        let path = pb.finish()?;
        Some(TextShape {
            path,
            width,
            embolden: synthetic.then_some(style.size * SYNTHETIC_BOLD),
        })
    }
}

/// Scale such that the em square is `size` pixels tall.
fn em_scale(font: &FontArc, size: f32) -> PxScale {
    let upem = font.units_per_em().unwrap_or(1000.0);
    PxScale::from(size * font.height_unscaled() / upem)
}

fn advance<F: Font, SF: ScaleFont<F>>(scaled: &SF, text: &str) -> f32 {
    let mut width = 0.0f32;
    let mut prev: Option<GlyphId> = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(p) = prev {
            width += scaled.kern(p, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }
    width
}

/// Append one glyph outline; font units are y-up, the canvas is y-down.
fn append_outline(pb: &mut PathBuilder, outline: &Outline, x: f32, y: f32, f: PxScaleFactor) {
    let map = |p: ab_glyph::Point| (x + p.x * f.horizontal, y - p.y * f.vertical);
    let mut last: Option<ab_glyph::Point> = None;

    for curve in &outline.curves {
        let (start, end) = match curve {
            OutlineCurve::Line(a, b) => (*a, *b),
            OutlineCurve::Quad(a, _, b) => (*a, *b),
            OutlineCurve::Cubic(a, _, _, b) => (*a, *b),
        };
        if last != Some(start) {
            if last.is_some() {
                pb.close();
            }
            let (sx, sy) = map(start);
            pb.move_to(sx, sy);
        }
        match curve {
            OutlineCurve::Line(_, b) => {
                let (bx, by) = map(*b);
                pb.line_to(bx, by);
            }
            OutlineCurve::Quad(_, c, b) => {
                let (cx, cy) = map(*c);
                let (bx, by) = map(*b);
                pb.quad_to(cx, cy, bx, by);
            }
            OutlineCurve::Cubic(_, c1, c2, b) => {
                let (x1, y1) = map(*c1);
                let (x2, y2) = map(*c2);
                let (bx, by) = map(*b);
                pb.cubic_to(x1, y1, x2, y2, bx, by);
            }
        }
        last = Some(end);
    }
    if last.is_some() {
        pb.close();
    }
}

fn is_variation_selector(c: char) -> bool {
    matches!(c, '\u{FE00}'..='\u{FE0F}' | '\u{200D}')
}

fn load_face(path: &FsPath) -> Option<FontArc> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Font file not readable");
            return None;
        }
    };
    match FontArc::try_from_vec(data) {
        Ok(font) => {
            info!(path = %path.display(), "Loaded font");
            Some(font)
        }
        Err(_) => {
            warn!(path = %path.display(), "Font file is not valid TTF/OTF data");
            None
        }
    }
}

fn first_face(candidates: &[&str]) -> Option<FontArc> {
    candidates.iter().find_map(|p| {
        let path = FsPath::new(p);
        path.exists().then(|| load_face(path)).flatten()
    })
}

#[cfg(target_os = "macos")]
const SANS_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "/System/Library/Fonts/Supplemental/Helvetica.ttf",
];
#[cfg(target_os = "macos")]
const BOLD_CANDIDATES: &[&str] = &["/System/Library/Fonts/Supplemental/Arial Bold.ttf"];
#[cfg(target_os = "macos")]
const SERIF_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Times New Roman.ttf",
    "/System/Library/Fonts/Supplemental/Georgia.ttf",
];

#[cfg(target_os = "windows")]
const SANS_CANDIDATES: &[&str] = &["C:\\Windows\\Fonts\\arial.ttf", "C:\\Windows\\Fonts\\segoeui.ttf"];
#[cfg(target_os = "windows")]
const BOLD_CANDIDATES: &[&str] = &["C:\\Windows\\Fonts\\arialbd.ttf", "C:\\Windows\\Fonts\\segoeuib.ttf"];
#[cfg(target_os = "windows")]
const SERIF_CANDIDATES: &[&str] = &["C:\\Windows\\Fonts\\times.ttf", "C:\\Windows\\Fonts\\georgia.ttf"];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const SANS_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const BOLD_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const SERIF_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSerif.ttf",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_parses_leniently() {
        assert_eq!("right".parse::<TextAlign>(), Ok(TextAlign::Right));
        assert_eq!("justify".parse::<TextAlign>(), Ok(TextAlign::Center));
    }

    #[test]
    fn empty_book_shapes_nothing() {
        let book = FontBook::empty();
        assert!(book.is_empty());
        assert!(book.shape("Photo", &TextStyle::new(24.0)).is_none());
        assert!(book.measure("Photo", &TextStyle::new(24.0)).is_none());
        assert!(!book.covers("✨", FontFamily::SansSerif));
    }

    #[test]
    fn invalid_font_bytes_are_rejected() {
        let err = FontBook::from_bytes(vec![0, 1, 2, 3], None, None).unwrap_err();
        assert!(matches!(err, RenderError::FontUnavailable));
    }

    #[test]
    fn css_family_mapping() {
        assert_eq!(FontFamily::from_css("sans-serif"), FontFamily::SansSerif);
        assert_eq!(FontFamily::from_css("Georgia, serif"), FontFamily::Serif);
        assert_eq!(FontFamily::from_css("Comic Sans"), FontFamily::SansSerif);
    }

    #[test]
    fn align_tag_falls_back_to_center() {
        assert_eq!(TextAlign::from_tag("justify"), TextAlign::Center);
        assert_eq!(TextAlign::from_tag("right"), TextAlign::Right);
    }

    #[test]
    fn system_book_measures_when_available() {
        let book = FontBook::system();
        if book.is_empty() {
            return;
        }
        let style = TextStyle::new(32.0).align(TextAlign::Center);
        let narrow = book.measure("i", &style).unwrap();
        let wide = book.measure("iiii", &style).unwrap();
        assert!(wide > narrow * 3.0);
        let shape = book.shape("Hi", &style).unwrap();
        let b = shape.path.bounds();
        assert!(b.left() < 0.0 && b.right() > 0.0, "centered run straddles origin");
    }
}
