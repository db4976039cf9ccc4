//! In-memory RGBA8 surface.

use crate::{RenderError, RenderResult};
use chromaslice_core::Surface;
use kurbo::{Affine, Rect};
use peniko::color::{Srgb, parse_color};

/// Straight-alpha RGBA8 pixmap, row-major from the top-left corner.
///
/// Fills cover every pixel whose center lies inside the transformed
/// rectangle and blend source-over. There is no anti-aliasing.
#[derive(Debug, Clone)]
pub struct PixmapSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
    transform: Affine,
    /// Last parsed fill style; painters repeat the same style a lot.
    cached_style: Option<(String, [f32; 4])>,
}

impl PixmapSurface {
    /// Create a transparent surface.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .filter(|&len| len > 0)
            .ok_or(RenderError::InvalidSize { width, height })?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
            transform: Affine::IDENTITY,
            cached_style: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Current transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// The pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = self.offset(x, y);
        let mut pixel = [0; 4];
        pixel.copy_from_slice(&self.data[offset..offset + 4]);
        Some(pixel)
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// Resolve a CSS color to clamped sRGB, reusing the last result when
    /// the style repeats.
    fn resolve_style(&mut self, style: &str) -> Option<[f32; 4]> {
        if let Some((cached, rgba)) = &self.cached_style {
            if cached == style {
                return Some(*rgba);
            }
        }
        let color = parse_color(style).ok()?.to_alpha_color::<Srgb>();
        let rgba = color.components.map(|channel| channel.clamp(0.0, 1.0));
        self.cached_style = Some((style.to_string(), rgba));
        Some(rgba)
    }

    fn blend(&mut self, x: u32, y: u32, source: [f32; 4]) {
        let offset = self.offset(x, y);
        let dest = &mut self.data[offset..offset + 4];
        let [sr, sg, sb, sa] = source;
        if sa >= 1.0 {
            dest.copy_from_slice(&[to_byte(sr), to_byte(sg), to_byte(sb), 255]);
            return;
        }

        let da = f32::from(dest[3]) / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return;
        }
        let mix = |s: f32, d: u8| (s * sa + f32::from(d) / 255.0 * da * (1.0 - sa)) / out_a;
        let blended = [
            to_byte(mix(sr, dest[0])),
            to_byte(mix(sg, dest[1])),
            to_byte(mix(sb, dest[2])),
            to_byte(out_a),
        ];
        dest.copy_from_slice(&blended);
    }
}

fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// First pixel whose center is at or past `edge`, clamped to `0..=limit`.
fn pixel_edge(edge: f64, limit: u32) -> u32 {
    (edge - 0.5).ceil().clamp(0.0, f64::from(limit)) as u32
}

impl Surface for PixmapSurface {
    fn clear(&mut self) {
        self.data.fill(0);
        self.transform = Affine::IDENTITY;
    }

    fn scale(&mut self, factor: f64) {
        self.transform *= Affine::scale(factor);
    }

    fn fill_rect(&mut self, rect: Rect, style: &str) {
        let Some(source) = self.resolve_style(style) else {
            log::warn!("Ignoring unparseable fill style {:?}", style);
            return;
        };
        if source[3] <= 0.0 {
            return;
        }

        let area = self.transform.transform_rect_bbox(rect).abs();
        let (x0, x1) = (pixel_edge(area.x0, self.width), pixel_edge(area.x1, self.width));
        let (y0, y1) = (pixel_edge(area.y0, self.height), pixel_edge(area.y1, self.height));
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, source);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromaslice_core::{GamutSettings, PaintContext, Quality, paint_h, paint_l};
    use kurbo::Size;

    const CLEAR: [u8; 4] = [0, 0, 0, 0];
    const RED: [u8; 4] = [255, 0, 0, 255];

    #[test]
    fn test_rejects_empty_size() {
        assert!(matches!(
            PixmapSurface::new(0, 10),
            Err(RenderError::InvalidSize { width: 0, height: 10 })
        ));
        assert!(PixmapSurface::new(10, 0).is_err());
    }

    #[test]
    fn test_fill_covers_pixel_centers() {
        let mut surface = PixmapSurface::new(5, 3).unwrap();
        surface.fill_rect(Rect::new(1.0, 1.0, 3.0, 2.0), "#ff0000");
        assert_eq!(surface.pixel(1, 1), Some(RED));
        assert_eq!(surface.pixel(2, 1), Some(RED));
        assert_eq!(surface.pixel(0, 1), Some(CLEAR));
        assert_eq!(surface.pixel(3, 1), Some(CLEAR));
        assert_eq!(surface.pixel(1, 0), Some(CLEAR));
        assert_eq!(surface.pixel(1, 2), Some(CLEAR));
        assert_eq!(surface.pixel(5, 0), None);
    }

    #[test]
    fn test_fill_is_clipped() {
        let mut surface = PixmapSurface::new(2, 2).unwrap();
        surface.fill_rect(Rect::new(-5.0, 1.0, 10.0, 3.0), "rgb(255, 0, 0)");
        assert_eq!(surface.pixel(0, 1), Some(RED));
        assert_eq!(surface.pixel(1, 1), Some(RED));
        assert_eq!(surface.pixel(0, 0), Some(CLEAR));
    }

    #[test]
    fn test_scale_and_clear() {
        let mut surface = PixmapSurface::new(4, 4).unwrap();
        surface.scale(2.0);
        surface.fill_rect(Rect::new(1.0, 1.0, 2.0, 2.0), "#ff0000");
        assert_eq!(surface.pixel(2, 2), Some(RED));
        assert_eq!(surface.pixel(3, 3), Some(RED));
        assert_eq!(surface.pixel(1, 1), Some(CLEAR));

        surface.clear();
        assert_eq!(surface.transform(), Affine::IDENTITY);
        assert!(surface.data().iter().all(|&byte| byte == 0));
    }

    #[test]
    fn test_translucent_fill_blends_over() {
        let mut surface = PixmapSurface::new(1, 1).unwrap();
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), "#ffffff");
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), "rgba(0, 0, 0, 0.5)");
        let [r, g, b, a] = surface.pixel(0, 0).unwrap();
        assert_eq!(a, 255);
        for channel in [r, g, b] {
            assert!((127..=128).contains(&channel), "{}", channel);
        }

        let mut empty = PixmapSurface::new(1, 1).unwrap();
        empty.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), "rgba(255, 0, 0, 0.6)");
        assert_eq!(empty.pixel(0, 0), Some([255, 0, 0, 153]));
    }

    #[test]
    fn test_unparseable_style_is_ignored() {
        let mut surface = PixmapSurface::new(2, 2).unwrap();
        surface.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), "not a color");
        assert!(surface.data().iter().all(|&byte| byte == 0));
    }

    #[test]
    fn test_l_slice_end_to_end() {
        let ctx = PaintContext::default();
        let size = Size::new(100.0, 100.0);
        let mut surface = PixmapSurface::new(100, 100).unwrap();
        paint_l(&mut surface, &ctx, size, 0.6, Quality::Full);

        // Chroma above 0.33 at L = 0.6 is outside sRGB for every hue.
        for y in 1..=9 {
            for x in 0..100 {
                assert_eq!(surface.pixel(x, y), Some(CLEAR), "pixel {} {}", x, y);
            }
        }
        // Hue 140, chroma 0.25 is too saturated for sRGB green.
        assert_eq!(surface.pixel(39, 32), Some(CLEAR));
        // Near-gray row at the bottom is fully painted.
        for x in 0..100 {
            assert_eq!(surface.pixel(x, 95).map(|[.., a]| a), Some(255), "column {}", x);
        }

        let first = surface.data().to_vec();
        paint_l(&mut surface, &ctx, size, 0.6, Quality::Full);
        assert_eq!(surface.data(), first.as_slice());
    }

    #[test]
    fn test_quick_preview_fills_scaled_blocks() {
        let ctx = PaintContext::default();
        let mut surface = PixmapSurface::new(100, 100).unwrap();
        paint_l(&mut surface, &ctx, Size::new(100.0, 100.0), 0.6, Quality::Quick);
        assert_eq!(surface.transform(), Affine::scale(4.0));
        for x in 0..100 {
            assert_eq!(surface.pixel(x, 98).map(|[.., a]| a), Some(255), "column {}", x);
        }
        assert_eq!(surface.pixel(50, 2), Some(CLEAR));
    }

    #[test]
    fn test_faded_pixels_are_opaque_over_background() {
        let ctx = PaintContext::new(Default::default(), GamutSettings::new(true, true));
        let mut surface = PixmapSurface::new(60, 60).unwrap();
        paint_h(&mut surface, &ctx, Size::new(60.0, 60.0), 150.0, Quality::Full);
        // Every painted pixel sits on the opaque background, so no pixel is
        // partially transparent.
        for pixel in surface.data().chunks_exact(4) {
            assert!(pixel[3] == 0 || pixel[3] == 255, "{:?}", pixel);
        }
    }
}
