//! ChromaSlice Application
//!
//! Renders the three gamut slices and the three range tracks for one
//! picker color into PNG files.

mod config;

pub use config::{AppConfig, ConfigError};

use chromaslice_core::{Axis, paint_range, paint_slice};
use chromaslice_render::{PixmapSurface, RenderError, write_png};
use kurbo::Size;
use std::path::PathBuf;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("IO error: {0}")]
    Io(String),
}

const AXES: [Axis; 3] = [Axis::L, Axis::C, Axis::H];

/// Render every slice and range track, returning the written paths.
pub fn run(config: &AppConfig) -> Result<Vec<PathBuf>, AppError> {
    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| AppError::Io(format!("{}: {}", config.output_dir.display(), e)))?;

    let ctx = config.paint_context();
    let current = config.current();
    let mut written = Vec::with_capacity(AXES.len() * 2);

    let slice_size = Size::new(f64::from(config.width), f64::from(config.height));
    for axis in AXES {
        let value = match axis {
            Axis::L => current.l,
            Axis::C => current.c,
            Axis::H => current.h,
        };
        let mut surface = PixmapSurface::new(config.width, config.height)?;
        paint_slice(&mut surface, &ctx, axis, slice_size, value, config.quality);

        let path = config.output_dir.join(format!("slice-{}.png", axis.name()));
        write_png(&surface, &path)?;
        log::info!("Wrote {} slice to {}", axis.name(), path.display());
        written.push(path);
    }

    let range_size = Size::new(f64::from(config.width), f64::from(config.range_height));
    for axis in AXES {
        let mut surface = PixmapSurface::new(config.width, config.range_height)?;
        paint_range(&mut surface, &ctx, axis, range_size, &current);

        let path = config.output_dir.join(format!("range-{}.png", axis.name()));
        write_png(&surface, &path)?;
        log::info!("Wrote {} range to {}", axis.name(), path.display());
        written.push(path);
    }

    Ok(written)
}
