//! Writing rendered images to disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use booth_render::EncodedImage;

/// Where `out` lands: relative paths go under `output_dir`.
pub fn output_path(output_dir: &Path, out: &Path) -> PathBuf {
    if out.is_absolute() {
        out.to_path_buf()
    } else {
        output_dir.join(out)
    }
}

/// Decode `image` and write its bytes to `path`.
pub async fn write_image(image: &EncodedImage, path: &Path) -> anyhow::Result<()> {
    if image.is_empty() {
        bail!("render produced no image (drawing surface unavailable)");
    }
    if !image.is_data_uri() {
        bail!("source {} could not be decoded; nothing was rendered", image.as_str());
    }
    let bytes = image.to_bytes().context("decoding rendered image")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    tokio::fs::write(path, &bytes)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Wrote image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_outputs_go_under_output_dir() {
        assert_eq!(output_path(Path::new("out"), Path::new("a.png")), PathBuf::from("out/a.png"));
        assert_eq!(output_path(Path::new("out"), Path::new("/tmp/a.png")), PathBuf::from("/tmp/a.png"));
    }

    #[tokio::test]
    async fn degraded_results_are_errors() {
        let path = std::env::temp_dir().join("booth-cli-never-written.png");
        assert!(write_image(&EncodedImage::empty(), &path).await.is_err());
        assert!(write_image(&EncodedImage::passthrough("a.jpg"), &path).await.is_err());
        assert!(!path.exists());
    }
}
