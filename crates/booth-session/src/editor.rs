//! Overlay editing: an ordered overlay list plus the current selection.

use booth_render::text::TextAlign;
use booth_render::{Overlay, ShapeKind, ShapeOverlay, TextOverlay};
use rand::Rng;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, SessionError};

/// Partial update for the selected overlay. Fields that do not apply to the
/// selected overlay's type are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlayPatch {
    pub rotation: Option<f32>,
    pub opacity: Option<f32>,
    // text
    pub text: Option<String>,
    pub color: Option<String>,
    pub font_size: Option<f32>,
    pub bold: Option<bool>,
    pub outline_color: Option<String>,
    pub outline_width: Option<f32>,
    pub shadow_color: Option<String>,
    pub shadow_blur: Option<f32>,
    // shape
    pub fill: Option<String>,
    pub size: Option<f32>,
}

#[derive(Debug, Clone, Default)]
pub struct OverlayEditor {
    overlays: Vec<Overlay>,
    selected: Option<String>,
}

impl OverlayEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_overlays(overlays: Vec<Overlay>) -> Self {
        Self {
            overlays,
            selected: None,
        }
    }

    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    /// Read-only copy handed to render calls.
    pub fn snapshot(&self) -> Vec<Overlay> {
        self.overlays.clone()
    }

    pub fn selected(&self) -> Option<&Overlay> {
        let id = self.selected.as_deref()?;
        self.overlays.iter().find(|o| o.id() == Some(id))
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Append a caption near the bottom and select it.
    pub fn add_text(&mut self) -> String {
        let id = format!("txt-{}", uuid::Uuid::new_v4());
        self.push(Overlay::Text(TextOverlay {
            id: id.clone(),
            x: 0.5,
            y: 0.85,
            rotation: None,
            opacity: None,
            text: "Your text".into(),
            font_family: None,
            font_size: 36.0,
            color: "#ffffff".into(),
            bold: Some(true),
            align: Some(TextAlign::Center),
            outline_color: Some("#000000".into()),
            outline_width: Some(4.0),
            shadow_color: Some("rgba(0,0,0,0.4)".into()),
            shadow_blur: Some(8.0),
        }));
        id
    }

    /// Append a shape at a random spot away from the edges and select it.
    pub fn add_shape(&mut self, kind: ShapeKind) -> String {
        self.add_shape_with_rng(kind, &mut OsRng)
    }

    pub fn add_shape_with_rng<R: Rng + ?Sized>(&mut self, kind: ShapeKind, rng: &mut R) -> String {
        let id = format!("shp-{}-{kind}", uuid::Uuid::new_v4());
        let (fill, stroke) = match kind {
            ShapeKind::Sparkle => ("#ffffff", "#ffffff"),
            _ => ("#f472b6", "#be185d"),
        };
        self.push(Overlay::Shape(ShapeOverlay {
            id: id.clone(),
            x: 0.1 + rng.r#gen::<f32>() * 0.8,
            y: 0.15 + rng.r#gen::<f32>() * 0.7,
            rotation: None,
            opacity: Some(1.0),
            shape: kind,
            size: 28.0,
            fill: fill.into(),
            stroke: Some(stroke.into()),
            stroke_width: Some(2.0),
        }));
        id
    }

    fn push(&mut self, overlay: Overlay) {
        self.selected = overlay.id().map(str::to_owned);
        debug!(id = ?self.selected, total = self.overlays.len() + 1, "Overlay added");
        self.overlays.push(overlay);
    }

    pub fn select(&mut self, id: &str) -> Result<()> {
        if !self.overlays.iter().any(|o| o.id() == Some(id)) {
            return Err(SessionError::UnknownOverlay(id.to_string()));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Move the selection to normalized `(nx, ny)`, clamped to the canvas.
    pub fn move_selected(&mut self, nx: f32, ny: f32) -> Result<()> {
        let overlay = self.selected_mut()?;
        overlay.set_position(nx.clamp(0.0, 1.0), ny.clamp(0.0, 1.0));
        Ok(())
    }

    pub fn update_selected(&mut self, patch: &OverlayPatch) -> Result<()> {
        match self.selected_mut()? {
            Overlay::Text(t) => {
                merge(&mut t.rotation, patch.rotation);
                merge(&mut t.opacity, patch.opacity);
                if let Some(text) = &patch.text {
                    t.text.clone_from(text);
                }
                if let Some(color) = &patch.color {
                    t.color.clone_from(color);
                }
                if let Some(size) = patch.font_size {
                    t.font_size = size;
                }
                merge(&mut t.bold, patch.bold);
                merge(&mut t.outline_color, patch.outline_color.clone());
                merge(&mut t.outline_width, patch.outline_width);
                merge(&mut t.shadow_color, patch.shadow_color.clone());
                merge(&mut t.shadow_blur, patch.shadow_blur);
            }
            Overlay::Shape(s) => {
                merge(&mut s.rotation, patch.rotation);
                merge(&mut s.opacity, patch.opacity);
                if let Some(fill) = &patch.fill {
                    s.fill.clone_from(fill);
                }
                if let Some(size) = patch.size {
                    s.size = size;
                }
            }
            Overlay::Unknown => {}
        }
        Ok(())
    }

    pub fn remove_selected(&mut self) -> Result<Overlay> {
        let id = self.selected.take().ok_or(SessionError::NoSelection)?;
        let index = self
            .overlays
            .iter()
            .position(|o| o.id() == Some(id.as_str()))
            .ok_or(SessionError::UnknownOverlay(id))?;
        Ok(self.overlays.remove(index))
    }

    fn selected_mut(&mut self) -> Result<&mut Overlay> {
        let id = self.selected.as_deref().ok_or(SessionError::NoSelection)?;
        self.overlays
            .iter_mut()
            .find(|o| o.id() == Some(id))
            .ok_or_else(|| SessionError::UnknownOverlay(id.to_string()))
    }
}

fn merge<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
