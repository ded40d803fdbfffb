//! Configuration value validation.

use std::path::Path;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "BOOTH_FONT_PATH" | "BOOTH_BOLD_FONT_PATH" | "BOOTH_SERIF_FONT_PATH" => {
            if !Path::new(value).is_file() {
                return Err("font file does not exist".into());
            }
        }
        "BOOTH_OUTPUT_DIR" => {
            if value.trim().is_empty() {
                return Err("must not be empty".into());
            }
        }
        "BOOTH_LOG_LEVEL" => {
            if !["trace", "debug", "info", "warn", "error"].contains(&value) {
                return Err("must be trace, debug, info, warn, or error".into());
            }
        }
        "BOOTH_SCATTER_SEED" => {
            value.parse::<u64>().map_err(|_| "must be an unsigned integer")?;
        }
        "BOOTH_GIF_WIDTH" | "BOOTH_GIF_HEIGHT" => validate_int_range(value, 16, 4096)?,
        "BOOTH_GIF_DELAY" => {
            let v: f32 = value.parse().map_err(|_| "must be a number")?;
            if !(0.02..=10.0).contains(&v) {
                return Err("must be between 0.02 and 10 seconds".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: u32, max: u32) -> Result<(), String> {
    let v: u32 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}
