//! ChromaSlice Core Library
//!
//! Color model adapter and adaptive gamut-slice rasterizer for an LCH color
//! picker. Painting goes through the [`Surface`] trait so the same passes
//! drive an in-memory pixmap, a recording surface in tests, or anything
//! else that can fill rectangles with CSS colors.

pub mod classify;
pub mod colors;
pub mod context;
pub mod range;
pub mod raster;
pub mod slices;
pub mod surface;
pub mod visibility;

pub use classify::{BLOCK, BlockKind, Classifier};
pub use colors::{
    CanvasFormat, Color, ColorModel, GAMUT_EPSILON, Gamut, Lch, Rgb, Space, format_rgb, get_space,
    in_p3, in_rec2020, in_rgb, parse,
};
pub use context::{Axis, PaintContext, PreviewScale, Quality};
pub use range::{paint_range, paint_track};
pub use raster::{Plane, Rasterizer};
pub use slices::{paint_c, paint_h, paint_l, paint_slice};
pub use surface::Surface;
pub use visibility::{AlphaPolicy, GamutSettings, Tier, is_visible};
