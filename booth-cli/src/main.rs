//! Headless photo booth renderer.
//!
//! Renders single photos, collages and GIFs from files or data URIs and
//! writes the results to disk.

mod config;
mod job;
mod output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use booth_render::{Compositor, Filter, FontBook, Frame};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::job::{CollageJob, load_overlays};
use crate::output::{output_path, write_image};

#[derive(Parser, Debug)]
#[command(name = "booth", about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter, frame and decorate one photo
    Photo {
        /// Image path or data URI
        input: String,
        #[arg(long, default_value = "none")]
        filter: Filter,
        #[arg(long, default_value = "none")]
        frame: Frame,
        /// JSON file holding an overlay list
        #[arg(long)]
        overlays: Option<PathBuf>,
        #[arg(long, short)]
        out: PathBuf,
    },
    /// Compose a collage described by a JSON job file
    Collage {
        #[arg(long)]
        job: PathBuf,
        #[arg(long, short)]
        out: PathBuf,
    },
    /// Assemble an animated GIF, optionally decorating every frame
    Gif {
        #[arg(long, num_args = 1.., required = true)]
        frames: Vec<String>,
        #[arg(long, default_value = "none")]
        frame: Frame,
        #[arg(long)]
        overlays: Option<PathBuf>,
        /// Seconds per frame; overrides BOOTH_GIF_DELAY
        #[arg(long)]
        delay: Option<f32>,
        #[arg(long, short)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = config::load_dotenv();
    let config = AppConfig::load();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();
    match dotenv {
        Some(path) => tracing::info!("Loaded .env from: {path}"),
        None => tracing::debug!("No .env file found, using system environment variables"),
    }

    let cli = Cli::parse();

    let fonts = Arc::new(FontBook::load(&config.font_paths));
    let mut engine = Compositor::new(fonts);
    if let Some(seed) = config.scatter_seed {
        tracing::info!(seed, "Scatter randomness pinned");
        engine = engine.with_seed(seed);
    }

    match cli.command {
        Command::Photo {
            input,
            filter,
            frame,
            overlays,
            out,
        } => {
            let overlays = load_overlays(overlays.as_deref())?;
            let image = engine
                .apply_filter_frame_and_overlays_to_image(&input, filter, frame, &overlays)
                .await;
            write_image(&image, &output_path(&config.output_dir, &out)).await?;
        }
        Command::Collage { job, out } => {
            let job = CollageJob::load(&job)?;
            let (layout, options) = job.resolve()?;
            tracing::info!(
                images = job.images.len(),
                rows = layout.rows,
                cols = layout.cols,
                style = %options.style,
                "Rendering collage"
            );
            let image = engine
                .create_collage(&job.images, layout, Some(&options))
                .await;
            write_image(&image, &output_path(&config.output_dir, &out)).await?;
        }
        Command::Gif {
            frames,
            frame,
            overlays,
            delay,
            out,
        } => {
            let overlays = load_overlays(overlays.as_deref())?;
            let mut options = config.gif;
            if let Some(delay) = delay {
                options.frame_delay_seconds = delay;
            }
            let outcome = engine.create_gif(&frames, frame, &overlays, &options).await;
            if outcome.error {
                bail!("GIF creation failed: {}", outcome.error_message);
            }
            write_image(&outcome.image, &output_path(&config.output_dir, &out)).await?;
        }
    }
    Ok(())
}
