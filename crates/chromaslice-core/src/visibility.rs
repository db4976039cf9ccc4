//! Which colors are drawn, and how strongly.
//!
//! Both policies are derived once from a [`GamutSettings`] snapshot and then
//! dispatched per color. The opacity rules live in a plain table so they can
//! be read at a glance.

use crate::colors::{Color, Gamut, in_p3, in_rgb};
use serde::{Deserialize, Serialize};

/// Which gamuts wider than sRGB the user asked to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GamutSettings {
    pub show_p3: bool,
    pub show_rec2020: bool,
}

impl GamutSettings {
    /// Settings with the given toggles.
    pub fn new(show_p3: bool, show_rec2020: bool) -> Self {
        Self {
            show_p3,
            show_rec2020,
        }
    }

    /// The widest gamut that is drawn at all.
    pub fn widest_shown(self) -> Gamut {
        if self.show_rec2020 {
            Gamut::Rec2020
        } else if self.show_p3 {
            Gamut::DisplayP3
        } else {
            Gamut::Srgb
        }
    }
}

/// Opacity column: where a color sits relative to sRGB and P3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Inside sRGB.
    Srgb,
    /// Inside P3 but not sRGB.
    P3,
    /// Outside P3.
    Wider,
}

/// Opacity by tier, one row per [`AlphaPolicy`].
const OPACITY: [[f64; 3]; 4] = [
    // srgb, p3, wider
    [1.0, 0.6, 0.4], // P3 and Rec.2020 shown
    [1.0, 0.6, 0.6], // P3 shown
    [1.0, 0.4, 0.4], // Rec.2020 shown
    [1.0, 1.0, 1.0], // sRGB only
];

/// Fade policy for colors outside sRGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaPolicy {
    Wide,
    P3,
    Rec2020,
    Srgb,
}

impl AlphaPolicy {
    /// Select the policy for a settings snapshot.
    pub fn new(settings: GamutSettings) -> Self {
        match (settings.show_p3, settings.show_rec2020) {
            (true, true) => AlphaPolicy::Wide,
            (true, false) => AlphaPolicy::P3,
            (false, true) => AlphaPolicy::Rec2020,
            (false, false) => AlphaPolicy::Srgb,
        }
    }

    /// Opacity row for this policy.
    pub fn row(self) -> [f64; 3] {
        OPACITY[self as usize]
    }

    /// Tier of a color, testing only as deep as this policy distinguishes.
    pub fn tier(self, color: &Color) -> Tier {
        match self {
            AlphaPolicy::Srgb => Tier::Srgb,
            _ if in_rgb(color) => Tier::Srgb,
            AlphaPolicy::Wide if in_p3(color) => Tier::P3,
            AlphaPolicy::Wide => Tier::Wider,
            AlphaPolicy::P3 | AlphaPolicy::Rec2020 => Tier::P3,
        }
    }

    /// Opacity to paint a color with.
    pub fn alpha(self, color: &Color) -> f64 {
        self.row()[self.tier(color) as usize]
    }
}

/// Visibility predicate: a color is drawn when the widest shown gamut holds it.
pub fn is_visible(settings: GamutSettings, color: &Color) -> bool {
    settings.widest_shown().contains(color)
}
