//! PNG output.

use crate::{PixmapSurface, RenderError, RenderResult};
use std::path::Path;

/// Encode the surface as an 8-bit RGBA PNG.
pub fn encode_png(surface: &PixmapSurface) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, surface.width(), surface.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        writer
            .write_image_data(surface.data())
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| RenderError::Encode(e.to_string()))?;
    }
    Ok(png_data)
}

/// Encode the surface and write it to `path`.
pub fn write_png(surface: &PixmapSurface, path: impl AsRef<Path>) -> RenderResult<()> {
    let path = path.as_ref();
    let png_data = encode_png(surface)?;
    std::fs::write(path, &png_data)
        .map_err(|e| RenderError::Io(format!("{}: {}", path.display(), e)))?;
    log::debug!("Wrote {} bytes to {}", png_data.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromaslice_core::Surface;
    use kurbo::Rect;
    use std::io::Cursor;

    fn decode(bytes: &[u8]) -> (png::OutputInfo, Vec<u8>) {
        let decoder = png::Decoder::new(Cursor::new(bytes));
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        buf.truncate(info.buffer_size());
        (info, buf)
    }

    #[test]
    fn test_encode_preserves_pixels() {
        let mut surface = PixmapSurface::new(3, 2).unwrap();
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), "#00ff00");
        surface.fill_rect(Rect::new(2.0, 1.0, 3.0, 2.0), "rgba(0, 0, 255, 0.6)");

        let bytes = encode_png(&surface).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let (info, pixels) = decode(&bytes);
        assert_eq!((info.width, info.height), (3, 2));
        assert_eq!(info.color_type, png::ColorType::Rgba);
        assert_eq!(pixels, surface.data());
    }

    #[test]
    fn test_write_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let surface = PixmapSurface::new(4, 4).unwrap();
        write_png(&surface, &path).unwrap();

        let (info, _) = decode(&std::fs::read(&path).unwrap());
        assert_eq!((info.width, info.height), (4, 4));
    }

    #[test]
    fn test_write_png_reports_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        let surface = PixmapSurface::new(1, 1).unwrap();
        assert!(matches!(write_png(&surface, &path), Err(RenderError::Io(_))));
    }
}
