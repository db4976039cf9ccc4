//! Application configuration.

use chromaslice_core::{
    CanvasFormat, ColorModel, GamutSettings, Lch, PaintContext, PreviewScale, Quality, parse,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// What to render and where.
///
/// `l`, `c` and `h` are in the units of `model` (OKLCH lightness is 0..1,
/// CIE LCH lightness is 0..100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: ColorModel,
    pub gamut: GamutSettings,
    pub canvas_format: CanvasFormat,
    /// Slice width in pixels; ranges share it.
    pub width: u32,
    pub height: u32,
    pub range_height: u32,
    pub background: String,
    pub l: f64,
    pub c: f64,
    pub h: f64,
    pub quality: Quality,
    pub preview_scale: PreviewScale,
    pub output_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: ColorModel::Oklch,
            gamut: GamutSettings::new(true, false),
            canvas_format: CanvasFormat::Srgb,
            width: 360,
            height: 200,
            range_height: 24,
            background: "#ffffff".to_string(),
            l: 0.7,
            c: 0.1,
            h: 250.0,
            quality: Quality::Full,
            preview_scale: PreviewScale::default(),
            output_dir: PathBuf::from("out"),
        }
    }
}

impl AppConfig {
    /// Load and validate a JSON config file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Config from the first command-line argument, or defaults.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, ConfigError> {
        match args.next() {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                log::info!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if parse(self.model, &self.background).is_none() {
            return Err(ConfigError::InvalidColor(self.background.clone()));
        }
        Ok(())
    }

    /// Paint settings for every pass of a run.
    pub fn paint_context(&self) -> PaintContext {
        PaintContext::new(self.model, self.gamut)
            .with_background(self.background.clone())
            .with_format(self.canvas_format)
            .with_preview(self.preview_scale)
    }

    /// The picker's current color.
    pub fn current(&self) -> Lch {
        Lch {
            l: self.l,
            c: self.c,
            h: self.h,
            alpha: None,
        }
    }
}
