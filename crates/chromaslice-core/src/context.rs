//! Per-pass paint configuration.

use crate::colors::{CanvasFormat, ColorModel};
use crate::visibility::GamutSettings;
use serde::{Deserialize, Serialize};

/// Whether a slice is painted at full resolution or as a scaled preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Full,
    Quick,
}

/// The axis a slice or range holds fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    L,
    C,
    H,
}

impl Axis {
    /// Lowercase axis letter.
    pub fn name(self) -> &'static str {
        match self {
            Axis::L => "l",
            Axis::C => "c",
            Axis::H => "h",
        }
    }
}

/// Surface scale used by quick previews, per slice kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewScale {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Default for PreviewScale {
    fn default() -> Self {
        Self {
            l: 4.0,
            c: 4.0,
            h: 4.0,
        }
    }
}

impl PreviewScale {
    /// Scale factor for a slice at the given quality. Full quality is 1.
    pub fn factor(&self, axis: Axis, quality: Quality) -> f64 {
        let factor = match (quality, axis) {
            (Quality::Full, _) => return 1.0,
            (Quality::Quick, Axis::L) => self.l,
            (Quality::Quick, Axis::C) => self.c,
            (Quality::Quick, Axis::H) => self.h,
        };
        if factor.is_finite() && factor >= 1.0 {
            factor
        } else {
            1.0
        }
    }
}

/// Everything a paint pass reads besides the color mapping.
///
/// Painters copy what they need out of this at entry, so a pass stays
/// consistent even if the caller's settings change while it runs.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintContext {
    /// Cylindrical model the axes are expressed in.
    pub model: ColorModel,
    /// Which wider gamuts are shown.
    pub settings: GamutSettings,
    /// Fill style syntax handed to the surface.
    pub format: CanvasFormat,
    /// CSS color painted under translucent pixels.
    pub background: String,
    /// Quick preview scales.
    pub preview: PreviewScale,
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::new(ColorModel::default(), GamutSettings::default())
    }
}

impl PaintContext {
    /// Create a context with a white background and sRGB fill styles.
    pub fn new(model: ColorModel, settings: GamutSettings) -> Self {
        Self {
            model,
            settings,
            format: CanvasFormat::Srgb,
            background: "#ffffff".to_string(),
            preview: PreviewScale::default(),
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    /// Set the fill style format.
    pub fn with_format(mut self, format: CanvasFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the quick preview scales.
    pub fn with_preview(mut self, preview: PreviewScale) -> Self {
        self.preview = preview;
        self
    }

    /// Chroma axis maximum for the current settings.
    pub fn chroma_limit(&self) -> f64 {
        if self.settings.show_rec2020 {
            self.model.c_max_rec2020()
        } else {
            self.model.c_max()
        }
    }
}
