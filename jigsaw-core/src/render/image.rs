//! Decoded source image held as a premultiplied pixmap.

use tiny_skia::{ColorU8, IntSize, Pixmap, PixmapRef};

use crate::error::{PuzzleError, Result};

/// The picture a puzzle is cut from.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixmap: Pixmap,
}

impl SourceImage {
    /// Wrap straight (non-premultiplied) RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        let invalid = |len| PuzzleError::InvalidImage {
            width,
            height,
            expected,
            len,
        };
        if data.len() != expected {
            return Err(invalid(data.len()));
        }

        for px in data.chunks_exact_mut(4) {
            let c = ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
            px.copy_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }

        let len = data.len();
        let pixmap = IntSize::from_wh(width, height)
            .and_then(|size| Pixmap::from_vec(data, size))
            .ok_or_else(|| invalid(len))?;
        Ok(Self { pixmap })
    }

    /// Wrap an already premultiplied pixmap.
    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> PixmapRef<'_> {
        self.pixmap.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba8_premultiplies() {
        let image = SourceImage::from_rgba8(1, 1, vec![200, 100, 50, 128]).unwrap();
        let px = image.pixmap().pixel(0, 0).unwrap();
        assert_eq!(px.alpha(), 128);
        assert!(px.red() <= 101);
        assert_eq!((image.width(), image.height()), (1, 1));
    }

    #[test]
    fn test_from_rgba8_rejects_short_buffer() {
        let err = SourceImage::from_rgba8(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            PuzzleError::InvalidImage {
                expected: 16,
                len: 15,
                ..
            }
        ));
    }

    #[test]
    fn test_from_rgba8_rejects_zero_size() {
        assert!(SourceImage::from_rgba8(0, 3, Vec::new()).is_err());
    }
}
