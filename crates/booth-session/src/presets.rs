//! Collage grid presets.
//!
//! Landscape presets use 4:3 cells, portrait presets 3:4, both built from a
//! 480px base side.

use booth_render::{CellMask, CollageLayout, CollageOptions, CollageStyle};
use serde::Serialize;

const BASE_SIDE: u32 = 480;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellAspect {
    Landscape,
    Portrait,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollagePreset {
    pub id: &'static str,
    pub layout: CollageLayout,
    pub aspect: CellAspect,
}

const fn preset(id: &'static str, rows: u32, cols: u32, aspect: CellAspect) -> CollagePreset {
    CollagePreset {
        id,
        layout: CollageLayout { rows, cols },
        aspect,
    }
}

pub const PRESETS: [CollagePreset; 6] = [
    preset("h-2x2", 2, 2, CellAspect::Landscape),
    preset("h-2x3", 2, 3, CellAspect::Landscape),
    preset("h-2x4", 2, 4, CellAspect::Landscape),
    preset("v-2x2", 2, 2, CellAspect::Portrait),
    preset("v-3x2", 3, 2, CellAspect::Portrait),
    preset("v-4x2", 4, 2, CellAspect::Portrait),
];

impl CollagePreset {
    pub fn find(id: &str) -> Option<&'static CollagePreset> {
        PRESETS.iter().find(|p| p.id == id)
    }

    pub fn max_slots(&self) -> usize {
        self.layout.slots()
    }

    /// `(width, height)` of one cell.
    pub fn cell_size(&self) -> (u32, u32) {
        let short = (BASE_SIDE as f32 * 0.75).round() as u32;
        match self.aspect {
            CellAspect::Landscape => (BASE_SIDE, short),
            CellAspect::Portrait => (short, BASE_SIDE),
        }
    }

    /// Render options for this preset; style-specific fields stay at their
    /// defaults for the caller to fill in.
    pub fn options(&self) -> CollageOptions {
        let (cell_width, cell_height) = self.cell_size();
        CollageOptions {
            cell_width,
            cell_height,
            padding: 12.0,
            corner_radius: 24.0,
            bg_color: "#fff0f5".into(),
            mask: CellMask::Rounded,
            style: CollageStyle::Classic,
            ..CollageOptions::default()
        }
    }
}
