//! Board geometry: display scale, piece size, tab size and the raster margin.
//!
//! All positions produced here are board-relative display pixels, with the
//! board's top-left corner at the origin.

use serde::{Deserialize, Serialize};

use crate::config::PuzzleConfig;
use crate::error::{PuzzleError, Result};
use crate::model::{Grid, Point, Rect};

/// Derived sizes for one game session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardGeometry {
    pub grid: Grid,
    /// Source image width in image pixels.
    pub image_width: f64,
    /// Source image height in image pixels.
    pub image_height: f64,
    /// Display pixels per image pixel.
    pub scale: f64,
    pub board_width: f64,
    pub board_height: f64,
    pub piece_width: f64,
    pub piece_height: f64,
    pub tab_size: f64,
    /// Raster pad around the tab area: `ceil(tab_size) + raster_pad`.
    pub margin: f64,
    /// Release distance below which a piece snaps home.
    pub snap_threshold: f64,
}

impl BoardGeometry {
    /// Fit an image into a viewport, keeping its aspect ratio.
    ///
    /// `scale = min((vw - padding) / iw, (vh - padding) / ih)`.
    pub fn fit(
        image_width: u32,
        image_height: u32,
        viewport: (f64, f64),
        grid: Grid,
        config: &PuzzleConfig,
    ) -> Result<Self> {
        let iw = image_width as f64;
        let ih = image_height as f64;
        let scale = ((viewport.0 - config.viewport_padding) / iw)
            .min((viewport.1 - config.viewport_padding) / ih);
        Self::with_scale(image_width, image_height, scale, grid, config)
    }

    /// Build geometry for an explicit display scale.
    pub fn with_scale(
        image_width: u32,
        image_height: u32,
        scale: f64,
        grid: Grid,
        config: &PuzzleConfig,
    ) -> Result<Self> {
        let image_width = image_width as f64;
        let image_height = image_height as f64;
        let board_width = image_width * scale;
        let board_height = image_height * scale;
        let piece_width = board_width / grid.cols() as f64;
        let piece_height = board_height / grid.rows() as f64;

        // NaN fails both comparisons, so a zero-sized image lands here too.
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(piece_width) || !usable(piece_height) {
            return Err(PuzzleError::GeometryDegenerate {
                piece_width,
                piece_height,
            });
        }

        let min_side = piece_width.min(piece_height);
        let tab_size = min_side * config.tab_ratio;
        let margin = tab_size.ceil() + config.raster_pad;

        let geometry = Self {
            grid,
            image_width,
            image_height,
            scale,
            board_width,
            board_height,
            piece_width,
            piece_height,
            tab_size,
            margin,
            snap_threshold: min_side * config.snap_ratio,
        };

        // Sub-pixel pieces still truncate to an empty highlight canvas.
        let (hw, hh) = geometry.highlight_size();
        let (cw, ch) = geometry.canvas_size();
        if hw == 0 || hh == 0 || cw == 0 || ch == 0 {
            return Err(PuzzleError::GeometryDegenerate {
                piece_width,
                piece_height,
            });
        }

        Ok(geometry)
    }

    /// Distance from a piece bitmap's top-left to its nominal cell corner.
    pub fn raster_offset(&self) -> f64 {
        self.tab_size + self.margin
    }

    /// Padded bitmap size, truncated to whole pixels.
    pub fn canvas_size(&self) -> (u32, u32) {
        let pad = 2.0 * self.raster_offset();
        (
            (self.piece_width + pad) as u32,
            (self.piece_height + pad) as u32,
        )
    }

    /// Board-relative spot a piece bitmap must occupy to count as placed.
    pub fn home_position(&self, row: usize, col: usize) -> Point {
        let off = self.raster_offset();
        Point::new(
            col as f64 * self.piece_width - off,
            row as f64 * self.piece_height - off,
        )
    }

    /// Highlight region size (cell plus tab on every side), truncated.
    pub fn highlight_size(&self) -> (u32, u32) {
        (
            (self.piece_width + 2.0 * self.tab_size) as u32,
            (self.piece_height + 2.0 * self.tab_size) as u32,
        )
    }

    /// Board-relative top-left of a highlight region.
    pub fn highlight_origin(&self, row: usize, col: usize) -> Point {
        Point::new(
            col as f64 * self.piece_width - self.tab_size,
            row as f64 * self.piece_height - self.tab_size,
        )
    }

    /// Source-image rectangle sampled into a piece bitmap.
    ///
    /// The nominal cell expanded by the raster offset, converted back into
    /// image pixels. May extend past the image for boundary cells.
    pub fn source_rect(&self, row: usize, col: usize) -> Rect {
        let cell_w = self.image_width / self.grid.cols() as f64;
        let cell_h = self.image_height / self.grid.rows() as f64;
        let pad = self.raster_offset() / self.scale;
        Rect::new(
            col as f64 * cell_w - pad,
            row as f64 * cell_h - pad,
            cell_w + 2.0 * pad,
            cell_h + 2.0 * pad,
        )
    }

    /// Cell under a board-relative point.
    ///
    /// Columns and rows are floored; a point on the right or bottom border
    /// yields an out-of-range cell and therefore `None`.
    pub fn cell_at(&self, rel: Point) -> Option<usize> {
        if rel.x < 0.0 || rel.y < 0.0 {
            return None;
        }
        let col = (rel.x / self.piece_width).floor() as usize;
        let row = (rel.y / self.piece_height).floor() as usize;
        self.grid.checked_index(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::float_cmp::approx_eq;

    fn geometry_300() -> BoardGeometry {
        let grid = Grid::new(3, 3).unwrap();
        BoardGeometry::fit(300, 300, (340.0, 340.0), grid, &PuzzleConfig::default()).unwrap()
    }

    // ==================== Fit tests ====================

    #[test]
    fn test_fit_3x3_300px() {
        let g = geometry_300();
        assert!(approx_eq(g.scale, 1.0));
        assert!(approx_eq(g.piece_width, 100.0));
        assert!(approx_eq(g.piece_height, 100.0));
        assert!(approx_eq(g.tab_size, 25.0));
        assert!(approx_eq(g.margin, 27.0));
        assert!(approx_eq(g.snap_threshold, 50.0));
        assert_eq!(g.canvas_size(), (204, 204));
        assert_eq!(g.highlight_size(), (150, 150));
    }

    #[test]
    fn test_fit_keeps_aspect_ratio() {
        let grid = Grid::new(2, 4).unwrap();
        let g = BoardGeometry::fit(800, 400, (440.0, 1040.0), grid, &PuzzleConfig::default())
            .unwrap();
        assert!(approx_eq(g.scale, 0.5));
        assert!(approx_eq(g.board_width, 400.0));
        assert!(approx_eq(g.board_height, 200.0));
        assert!(approx_eq(g.piece_width, 100.0));
        assert!(approx_eq(g.piece_height, 100.0));
    }

    #[test]
    fn test_fit_degenerate_viewport() {
        let grid = Grid::new(3, 3).unwrap();
        let result = BoardGeometry::fit(300, 300, (40.0, 500.0), grid, &PuzzleConfig::default());
        assert!(matches!(
            result,
            Err(PuzzleError::GeometryDegenerate { .. })
        ));
    }

    #[test]
    fn test_fit_zero_sized_image() {
        let grid = Grid::new(3, 3).unwrap();
        let result = BoardGeometry::fit(0, 300, (500.0, 500.0), grid, &PuzzleConfig::default());
        assert!(matches!(
            result,
            Err(PuzzleError::GeometryDegenerate { .. })
        ));
    }

    #[test]
    fn test_with_scale_rejects_empty_highlight() {
        let grid = Grid::new(3, 3).unwrap();
        let config = PuzzleConfig::default();
        // Pieces of 1/3 px: highlight 0.5 px truncates to 0.
        let tiny = BoardGeometry::with_scale(300, 300, 1.0 / 300.0, grid, &config);
        assert!(matches!(tiny, Err(PuzzleError::GeometryDegenerate { .. })));
        // 1 px pieces still give a 1 px highlight.
        let g = BoardGeometry::with_scale(300, 300, 0.01, grid, &config).unwrap();
        assert_eq!(g.highlight_size(), (1, 1));
    }

    // ==================== Position tests ====================

    #[test]
    fn test_home_position() {
        let g = geometry_300();
        assert_eq!(g.home_position(0, 0), Point::new(-52.0, -52.0));
        assert_eq!(g.home_position(1, 2), Point::new(148.0, 48.0));
        assert_eq!(g.home_position(1, 2), g.home_position(1, 2));
    }

    #[test]
    fn test_highlight_origin() {
        let g = geometry_300();
        assert_eq!(g.highlight_origin(0, 0), Point::new(-25.0, -25.0));
        assert_eq!(g.highlight_origin(2, 1), Point::new(75.0, 175.0));
    }

    #[test]
    fn test_source_rect_includes_margin() {
        let g = geometry_300();
        let r = g.source_rect(1, 1);
        assert!(approx_eq(r.x, 48.0));
        assert!(approx_eq(r.y, 48.0));
        assert!(approx_eq(r.width, 204.0));
        assert!(approx_eq(r.height, 204.0));
    }

    #[test]
    fn test_cell_at_border() {
        let g = geometry_300();
        assert_eq!(g.cell_at(Point::new(0.0, 0.0)), Some(0));
        assert_eq!(g.cell_at(Point::new(150.0, 250.0)), Some(7));
        assert_eq!(g.cell_at(Point::new(300.0, 10.0)), None);
        assert_eq!(g.cell_at(Point::new(10.0, 300.0)), None);
        assert_eq!(g.cell_at(Point::new(-1.0, 10.0)), None);
    }
}
