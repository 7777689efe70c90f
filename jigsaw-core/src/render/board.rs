//! Board layer: faded hint image, snapped pieces and the active highlight.

use tiny_skia::{FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::config::HINT_OPACITY;
use crate::error::{PuzzleError, Result};
use crate::model::{BoardGeometry, Piece, Point};
use crate::render::{HighlightOverlay, SourceImage};

fn board_canvas(geometry: &BoardGeometry) -> Result<Pixmap> {
    let width = (geometry.board_width as u32).max(1);
    let height = (geometry.board_height as u32).max(1);
    Pixmap::new(width, height).ok_or(PuzzleError::CanvasFailed { width, height })
}

fn at(p: Point) -> Transform {
    Transform::from_translate(p.x as f32, p.y as f32)
}

/// The source image scaled onto the board at hint opacity.
pub fn render_hint(image: &SourceImage, geometry: &BoardGeometry) -> Result<Pixmap> {
    let mut hint = board_canvas(geometry)?;
    let paint = PixmapPaint {
        opacity: HINT_OPACITY,
        quality: FilterQuality::Bilinear,
        ..Default::default()
    };
    let scale = geometry.scale as f32;
    hint.draw_pixmap(
        0,
        0,
        image.pixmap(),
        &paint,
        Transform::from_scale(scale, scale),
        None,
    );
    Ok(hint)
}

/// Stack the board layers: hint, snapped pieces at home, active highlight.
pub fn compose_board(
    geometry: &BoardGeometry,
    hint: &Pixmap,
    pieces: &[Piece],
    overlay: &HighlightOverlay,
) -> Result<Pixmap> {
    let mut board = board_canvas(geometry)?;
    let plain = PixmapPaint::default();
    board.draw_pixmap(0, 0, hint.as_ref(), &plain, Transform::identity(), None);

    for piece in pieces.iter().filter(|p| p.is_snapped()) {
        board.draw_pixmap(0, 0, piece.bitmap().as_ref(), &plain, at(piece.home), None);
    }

    if let Some(region) = overlay.active_region() {
        board.draw_pixmap(0, 0, region.bitmap().as_ref(), &plain, at(region.origin), None);
    }

    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PuzzleConfig;
    use crate::model::Grid;

    #[test]
    fn test_hint_is_faded() {
        let image = SourceImage::from_rgba8(20, 10, [0u8, 0, 255, 255].repeat(200)).unwrap();
        let grid = Grid::new(1, 2).unwrap();
        let geometry =
            BoardGeometry::fit(20, 10, (80.0, 60.0), grid, &PuzzleConfig::default()).unwrap();
        let hint = render_hint(&image, &geometry).unwrap();
        assert_eq!((hint.width(), hint.height()), (40, 20));
        let alpha = hint.pixel(20, 10).unwrap().alpha();
        assert!((60..=68).contains(&alpha), "alpha {alpha}");
    }
}
