//! CSS text output for colors.

use super::{Color, ColorModel, Lch, Rgb};
use peniko::color::DisplayP3;
use serde::{Deserialize, Serialize};

/// How fill styles are written for a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CanvasFormat {
    /// `rgb()` / `rgba()` with 0-255 integer channels, clipped to sRGB.
    #[default]
    Srgb,
    /// `color(display-p3 ...)`, unclipped.
    DisplayP3,
}

impl CanvasFormat {
    /// Fill style for a color.
    pub fn style(self, color: &Color) -> String {
        match self {
            CanvasFormat::Srgb => {
                let Rgb { r, g, b, .. } = Rgb::from_color(color);
                let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round();
                let alpha = color.alpha().clamp(0.0, 1.0);
                if alpha < 1.0 {
                    format!(
                        "rgba({}, {}, {}, {})",
                        channel(r),
                        channel(g),
                        channel(b),
                        alpha
                    )
                } else {
                    format!("rgb({}, {}, {})", channel(r), channel(g), channel(b))
                }
            }
            CanvasFormat::DisplayP3 => {
                let [r, g, b, _] = color.convert::<DisplayP3>();
                let alpha = color.alpha();
                if alpha < 1.0 {
                    format!("color(display-p3 {} {} {} / {})", r, g, b, alpha)
                } else {
                    format!("color(display-p3 {} {} {})", r, g, b)
                }
            }
        }
    }
}

/// Round half up, like the browser's `Math.round`. Also folds `-0` into `0`.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor() + 0.0
}

/// Round to two decimals without binary-float noise.
///
/// The scaled value goes through a fixed-point string before rounding, so
/// results like `33.330000000004` never reach the output.
fn clean(value: f64) -> f64 {
    let scaled = value * 100.0;
    let fixed = format!("{:.2}", scaled).parse::<f64>().unwrap_or(scaled);
    round_half_up(fixed) / 100.0
}

fn to_percent(value: f64) -> String {
    format!("{}%", clean(100.0 * value))
}

/// `rgb(r, g, b)` or `rgba(r, g, b, a)` on the 0-255 scale, two decimals.
pub fn format_rgb(rgb: &Rgb) -> String {
    let channel = |v: f64| round_half_up(25500.0 * v) / 100.0;
    let (r, g, b) = (channel(rgb.r), channel(rgb.g), channel(rgb.b));
    match rgb.alpha {
        Some(alpha) if alpha < 1.0 => format!("rgba({}, {}, {}, {})", r, g, b, alpha),
        _ => format!("rgb({}, {}, {})", r, g, b),
    }
}

impl ColorModel {
    /// `<keyword>(L% C H)` with an optional ` / A%` when translucent.
    pub fn format_lch(self, lch: &Lch) -> String {
        let postfix = match lch.alpha {
            Some(alpha) if alpha < 1.0 => format!(" / {}", to_percent(alpha)),
            _ => String::new(),
        };
        format!(
            "{}({} {} {}{})",
            self.keyword(),
            to_percent(lch.l / self.l_max()),
            lch.c,
            lch.h,
            postfix
        )
    }

    /// Unrounded keyword syntax, for surfaces that accept it directly.
    pub fn fast_format(self, color: &Color) -> String {
        let lch = self.to_lch(color);
        format!(
            "{}({}% {} {} / {}%)",
            self.keyword(),
            100.0 * lch.l / self.l_max(),
            lch.c,
            lch.h,
            100.0 * color.alpha()
        )
    }
}
