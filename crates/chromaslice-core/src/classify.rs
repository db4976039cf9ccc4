//! Block classification against the nested gamut boundaries.

use crate::colors::{Color, in_p3, in_rec2020, in_rgb};
use crate::visibility::GamutSettings;

/// Side length of a rasterizer block in plane units.
pub const BLOCK: u32 = 4;

/// How a block relates to the visible gamut union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Every corner sits in the innermost gamut that applies; bulk fill.
    Inside,
    /// Straddles a boundary; paint pixel by pixel.
    Between,
    /// No corner is visible.
    Outside,
}

/// Gamut membership of one corner. Wider flags imply the narrower ones.
#[derive(Debug, Clone, Copy, Default)]
struct Membership {
    srgb: bool,
    p3: bool,
    rec2020: bool,
}

impl Membership {
    /// Test only the gamuts that are shown; each test short-circuits on
    /// the narrower result.
    fn of(color: &Color, settings: GamutSettings) -> Self {
        let srgb = in_rgb(color);
        let p3 = settings.show_p3 && (srgb || in_p3(color));
        let rec2020 = settings.show_rec2020 && (srgb || p3 || in_rec2020(color));
        Self { srgb, p3, rec2020 }
    }
}

/// Classifies blocks for one settings snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    settings: GamutSettings,
}

impl Classifier {
    /// Bind the decision table to a settings snapshot.
    pub fn new(settings: GamutSettings) -> Self {
        Self { settings }
    }

    /// Classify a block from its four corner colors.
    pub fn classify(&self, corners: &[Color; 4]) -> BlockKind {
        let marks = corners.each_ref().map(|color| Membership::of(color, self.settings));
        let all = |flag: fn(&Membership) -> bool| marks.iter().all(flag);
        let some = |flag: fn(&Membership) -> bool| marks.iter().any(flag);

        let all_srgb = all(|m| m.srgb);
        let some_srgb = some(|m| m.srgb);

        let (inside, visible) = match (self.settings.show_p3, self.settings.show_rec2020) {
            (true, true) => {
                let some_p3 = some(|m| m.p3);
                let inside = all_srgb
                    || (all(|m| m.p3) && !some_srgb)
                    || (all(|m| m.rec2020) && !some_p3);
                (inside, some(|m| m.rec2020))
            }
            (false, true) => {
                let inside = all_srgb || (all(|m| m.rec2020) && !some_srgb);
                (inside, some(|m| m.rec2020))
            }
            (true, false) => {
                let inside = all_srgb || (all(|m| m.p3) && !some_srgb);
                (inside, some(|m| m.p3))
            }
            (false, false) => (all_srgb, some_srgb),
        };

        if inside {
            BlockKind::Inside
        } else if visible {
            BlockKind::Between
        } else {
            BlockKind::Outside
        }
    }

    /// Sample the corners of the block at `(x, y)` and classify it.
    pub fn classify_block<F>(&self, x: u32, y: u32, color_at: &F) -> BlockKind
    where
        F: Fn(u32, u32) -> Color,
    {
        let far = BLOCK - 1;
        let corners = [
            color_at(x, y),
            color_at(x, y + far),
            color_at(x + far, y),
            color_at(x + far, y + far),
        ];
        self.classify(&corners)
    }
}
