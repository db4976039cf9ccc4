//! Slider tracks: one color per column along a single axis.
//!
//! Columns inside sRGB are drawn at full height. Columns that are only
//! visible in a wider gamut keep the true color in the lower half and show
//! the faded color over the background in the upper half.

use crate::colors::{Color, Lch, in_rgb};
use crate::context::{Axis, PaintContext};
use crate::surface::Surface;
use crate::visibility::AlphaPolicy;
use kurbo::{Rect, Size};

/// Paint a track of `size`, asking `color_at` for the color of column `x`.
///
/// When `has_gaps` is false the first invisible column ends the track.
pub fn paint_track<S, F>(surface: &mut S, ctx: &PaintContext, size: Size, has_gaps: bool, color_at: F)
where
    S: Surface + ?Sized,
    F: Fn(u32) -> Color,
{
    surface.clear();

    let alpha = AlphaPolicy::new(ctx.settings);
    let visible = ctx.settings.widest_shown();
    let half = (size.height / 2.0).floor();
    let mut painted = 0u32;

    for x in (0u32..).take_while(|&x| f64::from(x) <= size.width) {
        let color = color_at(x);
        if !visible.contains(&color) {
            if has_gaps {
                continue;
            }
            break;
        }

        let left = f64::from(x);
        if in_rgb(&color) {
            surface.fill_rect(Rect::new(left, 0.0, left + 1.0, size.height), &ctx.format.style(&color));
        } else {
            let top = Rect::new(left, 0.0, left + 1.0, half);
            surface.fill_rect(Rect::new(left, half, left + 1.0, half + size.height), &ctx.format.style(&color));
            surface.fill_rect(top, &ctx.background);
            let faded = color.with_alpha(alpha.alpha(&color));
            surface.fill_rect(top, &ctx.format.style(&faded));
        }
        painted += 1;
    }

    log::debug!("painted {} of {} track columns", painted, size.width.max(0.0).floor() + 1.0);
}

/// Paint the track for `axis`, holding the other two components of
/// `current` fixed.
pub fn paint_range<S>(surface: &mut S, ctx: &PaintContext, axis: Axis, size: Size, current: &Lch)
where
    S: Surface + ?Sized,
{
    let model = ctx.model;
    let Lch { l, c, h, .. } = *current;
    log::trace!("painting {} track around {:?}", axis.name(), current);
    match axis {
        Axis::L => {
            let factor = model.l_max() / size.width;
            paint_track(surface, ctx, size, true, |x| model.build(f64::from(x) * factor, c, h));
        }
        Axis::C => {
            let factor = model.c_max() / size.width;
            paint_track(surface, ctx, size, false, |x| model.build(l, f64::from(x) * factor, h));
        }
        Axis::H => {
            let factor = model.h_max() / size.width;
            paint_track(surface, ctx, size, true, |x| model.build(l, c, f64::from(x) * factor));
        }
    }
}
