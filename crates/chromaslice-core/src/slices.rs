//! Slice generators: map plane coordinates onto two axes while the third
//! stays fixed, then hand the plane to the rasterizer.

use crate::classify::BLOCK;
use crate::colors::{Color, ColorModel};
use crate::context::{Axis, PaintContext, Quality};
use crate::raster::{Plane, Rasterizer};
use crate::surface::Surface;
use kurbo::Size;

/// Linear mapping from plane coordinates to a color.
#[derive(Debug, Clone, Copy, PartialEq)]
struct SliceMapping {
    model: ColorModel,
    axis: Axis,
    value: f64,
    x_factor: f64,
    y_factor: f64,
}

impl SliceMapping {
    fn new(ctx: &PaintContext, axis: Axis, plane: Size, value: f64) -> Self {
        let model = ctx.model;
        let (x_max, y_max) = match axis {
            // x: hue, y: chroma
            Axis::L => (model.h_max(), ctx.chroma_limit()),
            // x: hue, y: lightness
            Axis::C => (model.h_max(), model.l_max()),
            // x: lightness, y: chroma
            Axis::H => (model.l_max(), ctx.chroma_limit()),
        };
        Self {
            model,
            axis,
            value,
            x_factor: x_max / plane.width,
            y_factor: y_max / plane.height,
        }
    }

    fn color_at(&self, x: u32, y: u32) -> Color {
        let x = f64::from(x) * self.x_factor;
        let y = f64::from(y) * self.y_factor;
        match self.axis {
            Axis::L => self.model.build(self.value, y, x),
            Axis::C => self.model.build(y, self.value, x),
            Axis::H => self.model.build(x, y, self.value),
        }
    }

    /// Lightness and hue slices have one contiguous visible region per
    /// column; the chroma slice can leave and re-enter the gamut.
    fn plane(&self, size: Size) -> Plane {
        let (has_gaps, fast_step) = match self.axis {
            Axis::C => (true, 2),
            Axis::L | Axis::H => (false, BLOCK),
        };
        Plane {
            width: size.width,
            height: size.height,
            has_gaps,
            fast_step,
        }
    }
}

/// Paint the slice that holds `axis` fixed at `value`.
///
/// The surface is cleared and scaled first; in [`Quality::Quick`] the plane
/// shrinks by the preview factor so the pass touches fewer pixels.
pub fn paint_slice<S>(
    surface: &mut S,
    ctx: &PaintContext,
    axis: Axis,
    size: Size,
    value: f64,
    quality: Quality,
) where
    S: Surface + ?Sized,
{
    let factor = ctx.preview.factor(axis, quality);
    surface.clear();
    surface.scale(factor);

    let plane_size = Size::new(size.width / factor, size.height / factor);
    if !(plane_size.width > 0.0 && plane_size.height > 0.0) {
        log::trace!("skipping {} slice: empty plane {:?}", axis.name(), plane_size);
        return;
    }

    let mapping = SliceMapping::new(ctx, axis, plane_size, value);
    log::trace!(
        "painting {} slice at {} on {}x{} (scale {}, {:?})",
        axis.name(),
        value,
        plane_size.width,
        plane_size.height,
        factor,
        ctx.settings
    );
    Rasterizer::new(ctx).paint(surface, mapping.plane(plane_size), |x, y| {
        mapping.color_at(x, y)
    });
}

/// Hue on x, chroma on y, lightness fixed.
pub fn paint_l<S>(surface: &mut S, ctx: &PaintContext, size: Size, l: f64, quality: Quality)
where
    S: Surface + ?Sized,
{
    paint_slice(surface, ctx, Axis::L, size, l, quality);
}

/// Hue on x, lightness on y, chroma fixed.
pub fn paint_c<S>(surface: &mut S, ctx: &PaintContext, size: Size, c: f64, quality: Quality)
where
    S: Surface + ?Sized,
{
    paint_slice(surface, ctx, Axis::C, size, c, quality);
}

/// Lightness on x, chroma on y, hue fixed.
pub fn paint_h<S>(surface: &mut S, ctx: &PaintContext, size: Size, h: f64, quality: Quality)
where
    S: Surface + ?Sized,
{
    paint_slice(surface, ctx, Axis::H, size, h, quality);
}
