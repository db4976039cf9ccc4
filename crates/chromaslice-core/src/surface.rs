//! Drawing surface abstraction.

use kurbo::Rect;

/// A 2D raster target the painters draw into.
///
/// Fill styles are CSS color strings. Every call carries its own style, so
/// no fill state survives between calls.
pub trait Surface {
    /// Reset the transform to identity and erase every pixel.
    fn clear(&mut self);

    /// Multiply the current transform by a uniform scale.
    fn scale(&mut self, factor: f64);

    /// Fill `rect` (in transformed units) with a solid CSS color.
    fn fill_rect(&mut self, rect: Rect, style: &str);
}
