//! Adaptive gamut-slice rasterizer.
//!
//! The plane is walked in [`BLOCK`]-sized squares. Each block is classified
//! from its four corners: blocks well inside the visible gamut are filled in
//! a few solid rectangles, blocks on a boundary are painted pixel by pixel,
//! and blocks outside are skipped. Row 0 of the plane is the bottom edge of
//! the surface.

use crate::classify::{BLOCK, BlockKind, Classifier};
use crate::colors::{CanvasFormat, Color, Gamut};
use crate::context::PaintContext;
use crate::surface::Surface;
use crate::visibility::AlphaPolicy;
use kurbo::Rect;

/// Geometry and sampling hints for one paint pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Plane width in surface units.
    pub width: f64,
    /// Plane height in surface units.
    pub height: f64,
    /// Whether invisible regions may be followed by visible ones along y.
    /// When false, the first outside block ends the column.
    pub has_gaps: bool,
    /// Height of the sub-cells used to fill inside blocks.
    pub fast_step: u32,
}

/// Block counts of one pass, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Census {
    inside: u32,
    between: u32,
    outside: u32,
    cut_columns: u32,
}

/// Paints planes for one settings snapshot.
#[derive(Debug, Clone)]
pub struct Rasterizer<'a> {
    alpha: AlphaPolicy,
    visible: Gamut,
    classifier: Classifier,
    format: CanvasFormat,
    background: &'a str,
}

fn block_origins(extent: f64) -> impl Iterator<Item = u32> {
    (0..)
        .step_by(BLOCK as usize)
        .take_while(move |&origin| f64::from(origin) <= extent)
}

impl<'a> Rasterizer<'a> {
    /// Snapshot the visibility settings of `ctx`.
    pub fn new(ctx: &'a PaintContext) -> Self {
        Self {
            alpha: AlphaPolicy::new(ctx.settings),
            visible: ctx.settings.widest_shown(),
            classifier: Classifier::new(ctx.settings),
            format: ctx.format,
            background: &ctx.background,
        }
    }

    /// Paint the plane, asking `color_at` for the color at plane coordinates.
    pub fn paint<S, F>(&self, surface: &mut S, plane: Plane, color_at: F)
    where
        S: Surface + ?Sized,
        F: Fn(u32, u32) -> Color,
    {
        let mut census = Census::default();

        for x in block_origins(plane.width) {
            for y in block_origins(plane.height) {
                match self.classifier.classify_block(x, y, &color_at) {
                    BlockKind::Inside => {
                        census.inside += 1;
                        self.paint_fast(surface, &plane, x, y, &color_at);
                    }
                    BlockKind::Between => {
                        census.between += 1;
                        self.paint_slow(surface, &plane, x, y, &color_at);
                    }
                    BlockKind::Outside => {
                        census.outside += 1;
                        if !plane.has_gaps {
                            census.cut_columns += 1;
                            break;
                        }
                    }
                }
            }
        }

        log::debug!(
            "painted {}x{} plane: {} inside, {} between, {} outside, {} columns cut",
            plane.width,
            plane.height,
            census.inside,
            census.between,
            census.outside,
            census.cut_columns
        );
    }

    /// One color per `BLOCK x fast_step` sub-cell.
    fn paint_fast<S, F>(&self, surface: &mut S, plane: &Plane, x: u32, from_y: u32, color_at: &F)
    where
        S: Surface + ?Sized,
        F: Fn(u32, u32) -> Color,
    {
        let step_y = plane.fast_step.clamp(1, BLOCK);
        let flip_y = plane.height - f64::from(step_y) + 1.0;
        for y in (from_y..from_y + BLOCK).step_by(step_y as usize) {
            let rect = Rect::from_origin_size(
                (f64::from(x), flip_y - f64::from(y)),
                (f64::from(BLOCK), f64::from(step_y)),
            );
            self.paint_dot(surface, rect, color_at(x, y));
        }
    }

    /// Every pixel on its own; invisible pixels are left untouched.
    fn paint_slow<S, F>(&self, surface: &mut S, plane: &Plane, from_x: u32, from_y: u32, color_at: &F)
    where
        S: Surface + ?Sized,
        F: Fn(u32, u32) -> Color,
    {
        for x in from_x..from_x + BLOCK {
            for y in from_y..from_y + BLOCK {
                let color = color_at(x, y);
                if self.visible.contains(&color) {
                    let rect = Rect::from_origin_size(
                        (f64::from(x), plane.height - f64::from(y)),
                        (1.0, 1.0),
                    );
                    self.paint_dot(surface, rect, color);
                }
            }
        }
    }

    /// Fill one cell. Faded colors go over the background, not over
    /// whatever was drawn before.
    fn paint_dot<S>(&self, surface: &mut S, rect: Rect, color: Color)
    where
        S: Surface + ?Sized,
    {
        let alpha = self.alpha.alpha(&color);
        let color = if alpha < 1.0 {
            surface.fill_rect(rect, self.background);
            color.with_alpha(alpha)
        } else {
            color
        };
        surface.fill_rect(rect, &self.format.style(&color));
    }
}
