//! PNG export for [`PixelBuffer`].

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::RasterError;
use crate::pixel_buffer::PixelBuffer;

impl PixelBuffer {
    /// Encode the buffer as an 8-bit RGBA PNG into `writer`.
    pub fn write_png<W: Write>(&self, writer: W) -> Result<(), RasterError> {
        if self.width() == 0 || self.height() == 0 {
            return Err(RasterError::EmptyBuffer {
                width: self.width(),
                height: self.height(),
            });
        }

        let mut encoder = png::Encoder::new(writer, self.width(), self.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.to_rgba8())?;
        writer.finish()?;
        Ok(())
    }

    /// Encode the buffer as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, RasterError> {
        let mut png_buf = Vec::new();
        self.write_png(std::io::Cursor::new(&mut png_buf))?;
        Ok(png_buf)
    }

    /// Write the buffer to `path` as PNG, creating parent directories.
    pub fn save_png(&self, path: &Path) -> Result<(), RasterError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = self.to_png()?;
        std::fs::write(path, bytes)?;
        info!("Saved {}x{} snapshot to {}", self.width(), self.height(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfield_sim::{DrawSurface, Rgba};

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_png_has_signature() {
        let mut buf = PixelBuffer::new(8, 4);
        buf.fill_background(Rgba::BLACK);
        let bytes = buf.to_png().unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_png_decodes_to_same_dimensions() {
        let mut buf = PixelBuffer::new(16, 9);
        buf.fill_background(Rgba::BLACK);
        buf.set_fill_color(Rgba::WHITE);
        buf.fill_circle(8.0, 4.5, 2.0);
        let bytes = buf.to_png().unwrap();

        let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (16, 9));
        assert_eq!(info.color_type, png::ColorType::Rgba);
    }

    #[test]
    fn test_empty_buffer_rejected() {
        let buf = PixelBuffer::new(0, 10);
        let err = buf.to_png().unwrap_err();
        assert!(matches!(err, RasterError::EmptyBuffer { width: 0, height: 10 }));
    }

    #[test]
    fn test_save_png_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shots").join("frame.png");
        let mut buf = PixelBuffer::new(4, 4);
        buf.fill_background(Rgba::BLACK);

        buf.save_png(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    }
}
