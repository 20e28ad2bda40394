//! dct-preview - masked block-DCT reconstruction from the command line
//!
//! Loads an image (or a built-in sample), converts it to greyscale, drops the
//! requested DCT coefficients and writes the reconstruction and the basis
//! image atlas as PNG files.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use dctview::{atlas, luma_image, DctEngine, Dimensions, EngineOptions, GreyImage, TileOrigin};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dct-preview")]
#[command(about = "Block DCT coefficient filtering preview", long_about = None)]
#[command(version)]
struct Cli {
    /// Input image; a built-in sample is used when omitted
    input: Option<PathBuf>,

    /// Transform block size N
    #[arg(short = 'n', long, default_value_t = dctview::consts::DEFAULT_BLOCK_SIZE)]
    size: usize,

    /// Largest accepted block size
    #[arg(long, default_value_t = dctview::consts::MAX_BLOCK_SIZE)]
    max_size: usize,

    /// Keep only coefficients with row + col below this cutoff
    #[arg(long)]
    low_pass: Option<usize>,

    /// Start from an empty mask instead of a full one
    #[arg(long)]
    none: bool,

    /// Retain coefficient ROW,COL (repeatable)
    #[arg(long, value_parser = parse_coefficient)]
    keep: Vec<(usize, usize)>,

    /// Discard coefficient ROW,COL (repeatable)
    #[arg(long, value_parser = parse_coefficient)]
    drop: Vec<(usize, usize)>,

    /// Corner the block grid is anchored to
    #[arg(long, value_enum, default_value_t = Origin::TopLeft)]
    origin: Origin,

    /// Where to write the reconstruction
    #[arg(short, long, default_value = "reconstruction.png")]
    output: PathBuf,

    /// Where to write the basis image atlas
    #[arg(long)]
    atlas: Option<PathBuf>,

    /// Pixel enlargement of each basis image in the atlas
    #[arg(long, default_value_t = 16)]
    atlas_scale: u32,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Origin {
    TopLeft,
    BottomLeft,
}

impl From<Origin> for TileOrigin {
    fn from(origin: Origin) -> Self {
        match origin {
            Origin::TopLeft => TileOrigin::TopLeft,
            Origin::BottomLeft => TileOrigin::BottomLeft,
        }
    }
}

fn parse_coefficient(s: &str) -> Result<(usize, usize), String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{}'", s))?;
    let row = row.trim().parse().map_err(|e| format!("bad row '{}': {}", row, e))?;
    let col = col.trim().parse().map_err(|e| format!("bad col '{}': {}", col, e))?;
    Ok((row, col))
}

/// Concentric rings over a diagonal ramp: every frequency band has content
fn sample_image() -> Result<GreyImage> {
    let dims = Dimensions::new(256, 256);
    let image = GreyImage::from_fn(dims, |x, y| {
        let dx = x as f64 - 128.0;
        let dy = y as f64 - 128.0;
        let rings = (0.5 + 0.5 * ((dx * dx + dy * dy).sqrt() * 0.15).cos()) * 0.6;
        let ramp = (x + y) as f64 / 510.0 * 0.4;
        rings + ramp
    })?;
    Ok(image)
}

fn load_image(path: &Path) -> Result<GreyImage> {
    let rgb = image::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .to_rgb8();
    let dims = Dimensions::new(rgb.width(), rgb.height());
    let image = luma_image(dims, rgb.as_raw().as_slice(), 3)?;
    Ok(image)
}

fn save_image(image: &GreyImage, path: &Path) -> Result<()> {
    let Some(buffer) = image::GrayImage::from_raw(image.width(), image.height(), image.to_luma8())
    else {
        bail!("buffer does not match {}x{}", image.width(), image.height());
    };
    buffer
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let source = match &cli.input {
        Some(path) => load_image(path)?,
        None => {
            info!("no input given, using built-in sample");
            sample_image()?
        }
    };
    info!("Source image: {}x{}", source.width(), source.height());

    let options = EngineOptions::default()
        .max_size(cli.max_size)
        .tile_origin(cli.origin.into());
    let mut engine = DctEngine::new(options)?;
    engine
        .set_size(cli.size)
        .with_context(|| format!("cannot use block size {}", cli.size))?;

    // Mask edits land before the image so it is reconstructed once
    engine
        .update_mask(|mask| {
            if cli.none {
                mask.set_all(false);
            }
            if let Some(cutoff) = cli.low_pass {
                for row in 0..mask.size() {
                    for col in 0..mask.size() {
                        if row + col >= cutoff {
                            mask.set(row, col, false)?;
                        }
                    }
                }
            }
            for &(row, col) in &cli.keep {
                mask.set(row, col, true)?;
            }
            for &(row, col) in &cli.drop {
                mask.set(row, col, false)?;
            }
            Ok(())
        })
        .context("invalid coefficient mask")?;
    engine.set_image(source)?;

    let n = engine.size();
    info!(
        "Block size {}: keeping {} of {} coefficients",
        n,
        engine.mask().retained_count(),
        n * n
    );

    let Some(output) = engine.output() else {
        bail!("no reconstruction produced");
    };
    if let Some(original) = engine.image() {
        debug!("max abs error: {:.6}", original.max_abs_diff(output)?);
    }
    save_image(output, &cli.output)?;
    info!("Reconstruction written to {}", cli.output.display());

    if let Some(path) = &cli.atlas {
        let sheet = atlas(engine.previews(), cli.atlas_scale, 2)?;
        save_image(&sheet, path)?;
        info!("Basis atlas written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coefficient() {
        assert_eq!(parse_coefficient("2,3"), Ok((2, 3)));
        assert_eq!(parse_coefficient(" 0 , 7 "), Ok((0, 7)));
        assert!(parse_coefficient("2").is_err());
        assert!(parse_coefficient("a,1").is_err());
    }

    #[test]
    fn test_sample_image_in_range() {
        let image = sample_image().unwrap();
        assert!(image.data().iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
