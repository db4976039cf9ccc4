//! Color model adapter.
//!
//! Wraps the cylindrical spaces of the `color` crate (re-exported by peniko)
//! and provides the gamut membership tests the painters are built on.
//! Out-of-gamut colors are ordinary values here: nothing in this module
//! clamps unless the function name says so.

mod format;
mod parse;

pub use format::{CanvasFormat, format_rgb};
pub use parse::parse;

use peniko::color::{AlphaColor, ColorSpace, DisplayP3, Lch as CieLch, Oklch, Rec2020, Srgb};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance for the [0, 1] channel checks.
///
/// The color library converts in single precision, so achromatic colors at
/// the ends of the lightness axis land a few ulps outside the unit cube.
pub const GAMUT_EPSILON: f32 = 1e-4;

/// Number of bisection steps' worth of resolution used by [`ColorModel::to_rgb`].
const CHROMA_RESOLUTION_STEPS: f64 = 4096.0;

/// Which cylindrical space the picker works in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorModel {
    /// OKLCH (lightness 0..1).
    #[default]
    Oklch,
    /// CIE LCH (lightness 0..100).
    Lch,
}

impl ColorModel {
    /// CSS function keyword for this model.
    pub fn keyword(self) -> &'static str {
        match self {
            ColorModel::Oklch => "oklch",
            ColorModel::Lch => "lch",
        }
    }

    /// Maximum lightness.
    pub fn l_max(self) -> f64 {
        match self {
            ColorModel::Oklch => 1.0,
            ColorModel::Lch => 100.0,
        }
    }

    /// Chroma axis maximum when only sRGB and P3 are shown.
    pub fn c_max(self) -> f64 {
        match self {
            ColorModel::Oklch => 0.37,
            ColorModel::Lch => 145.0,
        }
    }

    /// Chroma axis maximum when Rec.2020 is shown.
    pub fn c_max_rec2020(self) -> f64 {
        match self {
            ColorModel::Oklch => 0.47,
            ColorModel::Lch => 195.0,
        }
    }

    /// Maximum hue in degrees.
    pub fn h_max(self) -> f64 {
        360.0
    }

    /// Build a color of this model. Values are not validated.
    pub fn build(self, l: f64, c: f64, h: f64) -> Color {
        self.build_with_alpha(l, c, h, 1.0)
    }

    /// Build a color of this model with an explicit alpha.
    pub fn build_with_alpha(self, l: f64, c: f64, h: f64, alpha: f64) -> Color {
        self.wrap(Lch {
            l,
            c,
            h,
            alpha: Some(alpha),
        })
    }

    /// Tag cylindrical components with this model.
    pub fn wrap(self, lch: Lch) -> Color {
        match self {
            ColorModel::Oklch => Color::Oklch(lch),
            ColorModel::Lch => Color::Lch(lch),
        }
    }

    /// Express any color in this model's cylindrical space, without clamping.
    pub fn to_lch(self, color: &Color) -> Lch {
        match (self, color) {
            (ColorModel::Oklch, Color::Oklch(lch)) | (ColorModel::Lch, Color::Lch(lch)) => *lch,
            (ColorModel::Oklch, _) => Lch::from_components(color.convert::<Oklch>(), color.alpha_opt()),
            (ColorModel::Lch, _) => Lch::from_components(color.convert::<CieLch>(), color.alpha_opt()),
        }
    }

    /// Nearest displayable sRGB color.
    ///
    /// Reduces chroma at constant lightness and hue until the color is
    /// inside sRGB. If even zero chroma is not displayable the channels are
    /// clipped. Non-finite chroma is treated as zero.
    pub fn to_rgb(self, color: &Color) -> Rgb {
        if in_rgb(color) {
            return Rgb::from_color(color);
        }

        let lch = self.to_lch(color);
        let resolution = self.c_max() / CHROMA_RESOLUTION_STEPS;
        let mut start = 0.0;
        // sRGB never reaches past the Rec.2020 chroma axis.
        let mut end = if lch.c.is_finite() {
            lch.c.clamp(0.0, self.c_max_rec2020())
        } else {
            0.0
        };
        while end - start > resolution {
            let c = start + (end - start) * 0.5;
            if in_rgb(&self.wrap(Lch { c, ..lch })) {
                start = c;
            } else {
                end = c;
            }
        }

        let clamped = self.wrap(Lch { c: start, ..lch });
        let rgb = Rgb::from_color(&clamped);
        if in_rgb(&clamped) { rgb } else { rgb.clip() }
    }
}

/// Cylindrical components: lightness, chroma, hue in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
    pub alpha: Option<f64>,
}

impl Lch {
    fn from_components([l, c, h, _]: [f32; 4], alpha: Option<f64>) -> Self {
        Self {
            l: f64::from(l),
            c: f64::from(c),
            h: f64::from(h),
            alpha,
        }
    }

    fn components(&self) -> [f32; 4] {
        [
            self.l as f32,
            self.c as f32,
            self.h as f32,
            self.alpha.unwrap_or(1.0) as f32,
        ]
    }
}

/// Gamma-encoded sRGB channels (the CSS `rgb()` space), unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub alpha: Option<f64>,
}

impl Rgb {
    /// RGB value; `None` alpha means opaque.
    pub fn new(r: f64, g: f64, b: f64, alpha: Option<f64>) -> Self {
        Self { r, g, b, alpha }
    }

    /// Convert any color to sRGB without clamping.
    pub fn from_color(color: &Color) -> Self {
        if let Color::Rgb(rgb) = color {
            return *rgb;
        }
        let [r, g, b, _] = color.convert::<Srgb>();
        Self::new(f64::from(r), f64::from(g), f64::from(b), color.alpha_opt())
    }

    /// Clip every channel into [0, 1].
    pub fn clip(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            alpha: self.alpha,
        }
    }

    fn components(&self) -> [f32; 4] {
        [
            self.r as f32,
            self.g as f32,
            self.b as f32,
            self.alpha.unwrap_or(1.0) as f32,
        ]
    }
}

/// A color tagged with the representation it is stored in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Oklch(Lch),
    Lch(Lch),
    Rgb(Rgb),
}

impl Color {
    /// Alpha, if the color carries one.
    pub fn alpha_opt(&self) -> Option<f64> {
        match self {
            Color::Oklch(lch) | Color::Lch(lch) => lch.alpha,
            Color::Rgb(rgb) => rgb.alpha,
        }
    }

    /// Alpha, defaulting to fully opaque.
    pub fn alpha(&self) -> f64 {
        self.alpha_opt().unwrap_or(1.0)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, alpha: f64) -> Self {
        match self {
            Color::Oklch(lch) => Color::Oklch(Lch {
                alpha: Some(alpha),
                ..lch
            }),
            Color::Lch(lch) => Color::Lch(Lch {
                alpha: Some(alpha),
                ..lch
            }),
            Color::Rgb(rgb) => Color::Rgb(Rgb {
                alpha: Some(alpha),
                ..rgb
            }),
        }
    }

    /// Cylindrical components, when the color is stored cylindrically.
    pub fn as_lch(&self) -> Option<&Lch> {
        match self {
            Color::Oklch(lch) | Color::Lch(lch) => Some(lch),
            Color::Rgb(_) => None,
        }
    }

    fn to_alpha_color<CS: ColorSpace>(&self) -> AlphaColor<CS> {
        match self {
            Color::Oklch(lch) => AlphaColor::<Oklch>::new(lch.components()).convert::<CS>(),
            Color::Lch(lch) => AlphaColor::<CieLch>::new(lch.components()).convert::<CS>(),
            Color::Rgb(rgb) => AlphaColor::<Srgb>::new(rgb.components()).convert::<CS>(),
        }
    }

    /// Components in another color space, unclamped.
    fn convert<CS: ColorSpace>(&self) -> [f32; 4] {
        self.to_alpha_color::<CS>().components
    }
}

fn channels_in_unit<CS: ColorSpace>(color: &Color) -> bool {
    let [r, g, b, _] = color.convert::<CS>();
    let range = -GAMUT_EPSILON..=1.0 + GAMUT_EPSILON;
    range.contains(&r) && range.contains(&g) && range.contains(&b)
}

/// Whether the color can be displayed on an sRGB screen.
pub fn in_rgb(color: &Color) -> bool {
    channels_in_unit::<Srgb>(color)
}

/// Whether the color lies inside Display-P3.
pub fn in_p3(color: &Color) -> bool {
    channels_in_unit::<DisplayP3>(color)
}

/// Whether the color lies inside Rec.2020.
pub fn in_rec2020(color: &Color) -> bool {
    channels_in_unit::<Rec2020>(color)
}

/// Output gamuts, narrowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gamut {
    Srgb,
    DisplayP3,
    Rec2020,
}

impl Gamut {
    /// Membership test for this gamut.
    pub fn contains(self, color: &Color) -> bool {
        match self {
            Gamut::Srgb => in_rgb(color),
            Gamut::DisplayP3 => in_p3(color),
            Gamut::Rec2020 => in_rec2020(color),
        }
    }
}

/// Narrowest gamut a color belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Space {
    Srgb,
    P3,
    Rec2020,
    Out,
}

impl Space {
    /// Short name used in the UI.
    pub fn name(self) -> &'static str {
        match self {
            Space::Srgb => "srgb",
            Space::P3 => "p3",
            Space::Rec2020 => "rec2020",
            Space::Out => "out",
        }
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a color by the first gamut (ascending) that contains it.
pub fn get_space(color: &Color) -> Space {
    if in_rgb(color) {
        Space::Srgb
    } else if in_p3(color) {
        Space::P3
    } else if in_rec2020(color) {
        Space::Rec2020
    } else {
        Space::Out
    }
}
