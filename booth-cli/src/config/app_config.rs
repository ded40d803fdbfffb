//! Runtime configuration loaded from environment variables.

use std::path::PathBuf;

use booth_render::{FontPaths, GifOptions};

use super::validation::validate_setting;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub font_paths: FontPaths,
    pub output_dir: PathBuf,
    pub log_level: String,
    /// Pins decorative randomness when set.
    pub scatter_seed: Option<u64>,
    pub gif: GifOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            font_paths: FontPaths::default(),
            output_dir: PathBuf::from("output"),
            log_level: "info".into(),
            scatter_seed: None,
            gif: GifOptions::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`. Invalid values are logged and
    /// replaced by their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let g = |key: &str| -> Option<String> {
            let value = lookup(key)?.trim().to_string();
            if value.is_empty() {
                return None;
            }
            match validate_setting(key, &value) {
                Ok(()) => Some(value),
                Err(msg) => {
                    tracing::warn!(key, value = %value, "Ignoring invalid setting: {msg}");
                    None
                }
            }
        };

        let defaults = Self::default();
        let gif = GifOptions {
            width: g("BOOTH_GIF_WIDTH").and_then(|v| v.parse().ok()).unwrap_or(defaults.gif.width),
            height: g("BOOTH_GIF_HEIGHT").and_then(|v| v.parse().ok()).unwrap_or(defaults.gif.height),
            frame_delay_seconds: g("BOOTH_GIF_DELAY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.gif.frame_delay_seconds),
            frame_count: None,
        };

        Self {
            font_paths: FontPaths {
                regular: g("BOOTH_FONT_PATH").map(PathBuf::from),
                bold: g("BOOTH_BOLD_FONT_PATH").map(PathBuf::from),
                serif: g("BOOTH_SERIF_FONT_PATH").map(PathBuf::from),
            },
            output_dir: g("BOOTH_OUTPUT_DIR").map_or(defaults.output_dir, PathBuf::from),
            log_level: g("BOOTH_LOG_LEVEL").unwrap_or(defaults.log_level),
            scatter_seed: g("BOOTH_SCATTER_SEED").and_then(|v| v.parse().ok()),
            gif,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = load(&[]);
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.scatter_seed, None);
        assert_eq!(config.gif, GifOptions::default());
        assert!(config.font_paths.regular.is_none());
    }

    #[test]
    fn valid_values_are_applied() {
        let config = load(&[
            ("BOOTH_OUTPUT_DIR", "renders"),
            ("BOOTH_LOG_LEVEL", "debug"),
            ("BOOTH_SCATTER_SEED", "99"),
            ("BOOTH_GIF_WIDTH", "320"),
            ("BOOTH_GIF_HEIGHT", "240"),
            ("BOOTH_GIF_DELAY", "0.25"),
        ]);
        assert_eq!(config.output_dir, PathBuf::from("renders"));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.scatter_seed, Some(99));
        assert_eq!((config.gif.width, config.gif.height), (320, 240));
        assert_eq!(config.gif.frame_delay_seconds, 0.25);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = load(&[
            ("BOOTH_LOG_LEVEL", "shouty"),
            ("BOOTH_GIF_WIDTH", "99999"),
            ("BOOTH_FONT_PATH", "/missing/font.ttf"),
        ]);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.gif.width, 640);
        assert!(config.font_paths.regular.is_none());
    }
}
