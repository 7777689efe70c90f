//! Piece rasterization: image content clipped to a piece outline.

use tiny_skia::{
    FillRule, FilterQuality, Mask, Paint, Pattern, Pixmap, SpreadMode, Stroke, Transform,
};
use tracing::trace;

use crate::config::PIECE_STROKE_WIDTH;
use crate::error::{PuzzleError, Result};
use crate::generator::build_path;
use crate::model::{BoardGeometry, EdgeLayout, Point, Rect};
use crate::render::style;
use crate::render::SourceImage;

/// Output of rasterizing one cell.
#[derive(Debug, Clone)]
pub struct PieceRaster {
    /// Padded bitmap, `piece + 2 * (tab + margin)` on each axis.
    pub bitmap: Pixmap,
    /// Board-relative target position of the bitmap's top-left.
    pub home: Point,
    /// Region of the source image that was sampled, in image pixels.
    pub source: Rect,
}

/// Rasterize the piece at `(row, col)`.
///
/// The outline is placed with its nominal corner at `(tab + margin, tab + margin)`.
/// The sampled source rectangle is stretched over the whole padded canvas;
/// only the part of it that lies inside the image is painted, so boundary
/// pieces stay transparent past the picture's edge. A translucent dark
/// stroke is drawn under the same clip.
pub fn rasterize_piece(
    image: &SourceImage,
    geometry: &BoardGeometry,
    row: usize,
    col: usize,
    layout: &EdgeLayout,
) -> Result<PieceRaster> {
    let index = geometry.grid.index(row, col);
    let failed = || PuzzleError::RasterFailed { index };

    let (width, height) = geometry.canvas_size();
    let mut bitmap = Pixmap::new(width, height).ok_or_else(failed)?;

    let offset = geometry.raster_offset();
    let outline = build_path(
        geometry.piece_width,
        geometry.piece_height,
        geometry.tab_size,
        layout,
    )
    .translated(offset, offset)
    .to_skia()
    .ok_or_else(failed)?;

    let mut clip = Mask::new(width, height).ok_or_else(failed)?;
    clip.fill_path(&outline, FillRule::Winding, true, Transform::identity());

    // Source pixels to canvas pixels. The destination spans the unrounded
    // padded size, which makes both factors equal to the display scale.
    let source = geometry.source_rect(row, col);
    let full_w = geometry.piece_width + 2.0 * offset;
    let full_h = geometry.piece_height + 2.0 * offset;
    let kx = full_w / source.width;
    let ky = full_h / source.height;
    let to_canvas = Transform::from_row(
        kx as f32,
        0.0,
        0.0,
        ky as f32,
        (-source.x * kx) as f32,
        (-source.y * ky) as f32,
    );

    // Image bounds in canvas space, cut to the canvas.
    let left = (-source.x * kx).max(0.0);
    let top = (-source.y * ky).max(0.0);
    let right = ((image.width() as f64 - source.x) * kx).min(width as f64);
    let bottom = ((image.height() as f64 - source.y) * ky).min(height as f64);

    let visible = tiny_skia::Rect::from_ltrb(left as f32, top as f32, right as f32, bottom as f32);
    if let Some(visible) = visible {
        let paint = Paint {
            shader: Pattern::new(
                image.pixmap(),
                SpreadMode::Pad,
                FilterQuality::Bilinear,
                1.0,
                to_canvas,
            ),
            anti_alias: false,
            ..Default::default()
        };
        bitmap.fill_rect(visible, &paint, Transform::identity(), Some(&clip));
    }

    let mut paint = Paint::default();
    paint.set_color(style::piece_stroke());
    paint.anti_alias = true;
    let stroke = Stroke {
        width: PIECE_STROKE_WIDTH,
        ..Default::default()
    };
    bitmap.stroke_path(&outline, &paint, &stroke, Transform::identity(), Some(&clip));

    trace!(index, width, height, "Rasterized piece");

    Ok(PieceRaster {
        bitmap,
        home: geometry.home_position(row, col),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PuzzleConfig;
    use crate::model::{EdgeCode, Grid};

    fn solid_image(width: u32, height: u32) -> SourceImage {
        let data = [10u8, 200, 30, 255].repeat((width * height) as usize);
        SourceImage::from_rgba8(width, height, data).unwrap()
    }

    fn geometry_3x3() -> BoardGeometry {
        let grid = Grid::new(3, 3).unwrap();
        BoardGeometry::fit(300, 300, (340.0, 340.0), grid, &PuzzleConfig::default()).unwrap()
    }

    #[test]
    fn test_canvas_size_and_home() {
        let image = solid_image(300, 300);
        let g = geometry_3x3();
        let raster = rasterize_piece(&image, &g, 0, 0, &EdgeLayout::FLAT).unwrap();
        assert_eq!((raster.bitmap.width(), raster.bitmap.height()), (204, 204));
        assert_eq!(raster.home, Point::new(-52.0, -52.0));
    }

    #[test]
    fn test_clip_keeps_outside_transparent() {
        let image = solid_image(300, 300);
        let g = geometry_3x3();
        let raster = rasterize_piece(&image, &g, 1, 1, &EdgeLayout::FLAT).unwrap();
        let alpha = |x, y| raster.bitmap.pixel(x, y).unwrap().alpha();
        // Cell interior is opaque image content
        assert!(alpha(102, 102) >= 250);
        // Padding around a flat outline stays empty
        assert_eq!(alpha(5, 5), 0);
        assert_eq!(alpha(200, 102), 0);
    }

    #[test]
    fn test_tab_area_is_painted() {
        let image = solid_image(300, 300);
        let g = geometry_3x3();
        let layout = EdgeLayout::new(EdgeCode::Flat, EdgeCode::Tab, EdgeCode::Flat, EdgeCode::Flat);
        let raster = rasterize_piece(&image, &g, 1, 1, &layout).unwrap();
        // Right edge sits at x = 52 + 100; the tab reaches past it at mid height.
        let px = raster.bitmap.pixel(160, 102).unwrap();
        assert!(px.alpha() >= 250);
        assert!(px.green() > 150);
    }

    #[test]
    fn test_boundary_piece_outside_image_is_transparent() {
        let image = solid_image(300, 300);
        let g = geometry_3x3();
        // A top tab on the first row reaches above the picture.
        let layout = EdgeLayout::new(EdgeCode::Tab, EdgeCode::Flat, EdgeCode::Flat, EdgeCode::Flat);
        let raster = rasterize_piece(&image, &g, 0, 0, &layout).unwrap();
        assert_eq!(raster.source.y, -52.0);
        // Inside the tab, but canvas y = 40 maps to image y = -12.
        assert_eq!(raster.bitmap.pixel(102, 40).unwrap().alpha(), 0);
        // Below the top edge the image is painted.
        assert!(raster.bitmap.pixel(102, 60).unwrap().alpha() >= 250);
    }
}
