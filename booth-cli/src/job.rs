//! JSON job files read by the CLI.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use booth_render::{CollageLayout, CollageOptions, Overlay};
use booth_session::{CollagePreset, EmojiSet};
use serde::Deserialize;
use serde_json::{Map, Value};

/// A collage request: sources plus either a layout or a named preset.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollageJob {
    pub images: Vec<String>,
    #[serde(default)]
    pub layout: Option<CollageLayout>,
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub emoji_set: Option<EmojiSet>,
    /// Partial `CollageOptions`, laid over the preset's options.
    #[serde(default)]
    pub options: Map<String, Value>,
}

impl CollageJob {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading job file {}", path.display()))?;
        let mut job: CollageJob = serde_json::from_str(&text)
            .with_context(|| format!("parsing job file {}", path.display()))?;
        let base = path.parent().unwrap_or(Path::new("."));
        for image in &mut job.images {
            *image = resolve_source(base, image);
        }
        Ok(job)
    }

    /// Effective layout and options.
    pub fn resolve(&self) -> anyhow::Result<(CollageLayout, CollageOptions)> {
        let preset = match self.preset.as_deref() {
            Some(id) => Some(
                CollagePreset::find(id).with_context(|| format!("unknown collage preset {id:?}"))?,
            ),
            None => None,
        };
        let layout = match (self.layout, preset) {
            (Some(layout), _) => layout,
            (None, Some(preset)) => preset.layout,
            (None, None) => bail!("collage job needs a layout or a preset"),
        };

        let mut base = preset.map_or_else(CollageOptions::default, CollagePreset::options);
        if let Some(set) = self.emoji_set {
            base.emojis = set.to_vec();
        }
        let mut merged = serde_json::to_value(base).context("serializing collage options")?;
        if let Value::Object(fields) = &mut merged {
            fields.extend(self.options.clone());
        }
        let options = serde_json::from_value(merged).context("invalid collage options")?;
        Ok((layout, options))
    }
}

/// Read an overlay list from a JSON file.
pub fn load_overlays(path: Option<&Path>) -> anyhow::Result<Vec<Overlay>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading overlays {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing overlays {}", path.display()))
}

/// Data URIs and absolute paths pass through; relative paths are taken
/// relative to `base`.
fn resolve_source(base: &Path, source: &str) -> String {
    if source.starts_with("data:") || Path::new(source).is_absolute() {
        return source.to_string();
    }
    let relative = source.strip_prefix("file://").unwrap_or(source);
    PathBuf::from(base).join(relative).to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use booth_render::{CellMask, CollageStyle};

    fn job(json: &str) -> CollageJob {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn preset_supplies_layout_and_options() {
        let (layout, options) = job(r#"{"images": [], "preset": "v-3x2"}"#).resolve().unwrap();
        assert_eq!(layout, CollageLayout::new(3, 2));
        assert_eq!((options.cell_width, options.cell_height), (360, 480));
        assert_eq!(options.bg_color, "#fff0f5");
    }

    #[test]
    fn explicit_fields_win() {
        let (layout, options) = job(
            r#"{"images": [], "preset": "h-2x2", "layout": {"rows": 1, "cols": 3},
                "emojiSet": "party", "options": {"style": "emoji", "mask": "circle", "padding": 4}}"#,
        )
        .resolve()
        .unwrap();
        assert_eq!(layout, CollageLayout::new(1, 3));
        assert_eq!(options.style, CollageStyle::Emoji);
        assert_eq!(options.mask, CellMask::Circle);
        assert_eq!(options.padding, 4.0);
        assert_eq!(options.cell_width, 480);
        assert_eq!(options.emojis[0], "🎉");
    }

    #[test]
    fn layout_or_preset_is_required() {
        assert!(job(r#"{"images": []}"#).resolve().is_err());
        assert!(job(r#"{"images": [], "preset": "huge"}"#).resolve().is_err());
    }

    #[test]
    fn relative_sources_follow_the_job_file() {
        assert_eq!(resolve_source(Path::new("/jobs"), "a.png"), "/jobs/a.png");
        assert_eq!(resolve_source(Path::new("/jobs"), "/abs/b.png"), "/abs/b.png");
        assert_eq!(resolve_source(Path::new("/jobs"), "data:image/png;base64,AA"), "data:image/png;base64,AA");
    }
}
