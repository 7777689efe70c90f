//! Game session setup: geometry, layouts, overlay and rasterized pieces.

use tiny_skia::Pixmap;
use tracing::{info, warn};

use crate::config::{GridSpec, PuzzleConfig};
use crate::error::{PuzzleError, Result};
use crate::generator::{generate_shapes, RandomSource};
use crate::model::{BoardGeometry, EdgeLayout, Grid, Piece, Point};
use crate::render::{compose_board, rasterize_piece, render_hint, HighlightOverlay, SourceImage};
use crate::validation::validate_layouts;

/// Everything that belongs to one game. Replaced wholesale by a new game.
#[derive(Debug, Clone)]
pub struct Session {
    geometry: BoardGeometry,
    layouts: Vec<EdgeLayout>,
    pieces: Vec<Piece>,
    overlay: HighlightOverlay,
    hint: Pixmap,
}

impl Session {
    /// Build a full session or nothing.
    ///
    /// Checks run in order: image present, grid valid, geometry usable,
    /// layouts consistent. Pieces are then rasterized and scattered over
    /// a `staging` sized area with samples from `source`.
    pub fn setup(
        image: Option<&SourceImage>,
        spec: GridSpec,
        viewport: (f64, f64),
        staging: (f64, f64),
        config: &PuzzleConfig,
        source: &mut dyn RandomSource,
    ) -> Result<Self> {
        let image = image.ok_or(PuzzleError::MissingInput)?;
        let grid = Grid::try_from(spec)?;
        let geometry = BoardGeometry::fit(image.width(), image.height(), viewport, grid, config)?;

        let layouts = generate_shapes(grid, source);
        let report = validate_layouts(grid, &layouts);
        for warning in &report.warnings {
            warn!("{}", warning);
        }
        if !report.passed {
            for error in &report.errors {
                warn!("{}", error);
            }
            return Err(PuzzleError::LayoutViolation {
                violations: report.violations(),
            });
        }

        let overlay = HighlightOverlay::build(&geometry, &layouts)?;
        let hint = render_hint(image, &geometry)?;

        let mut pieces = Vec::with_capacity(grid.len());
        for (index, layout) in layouts.iter().enumerate() {
            let (row, col) = grid.cell(index);
            let raster = rasterize_piece(image, &geometry, row, col, layout)?;
            let (w, h) = (raster.bitmap.width() as f64, raster.bitmap.height() as f64);
            let position = Point::new(
                source.next_unit() * (staging.0 - w).max(0.0),
                source.next_unit() * (staging.1 - h).max(0.0),
            );
            pieces.push(Piece::new(
                index,
                row,
                col,
                *layout,
                raster.bitmap,
                raster.home,
                position,
            ));
        }

        info!(
            rows = grid.rows(),
            cols = grid.cols(),
            piece_width = geometry.piece_width,
            piece_height = geometry.piece_height,
            tab_size = geometry.tab_size,
            "Session ready with {} pieces",
            pieces.len()
        );

        Ok(Self {
            geometry,
            layouts,
            pieces,
            overlay,
            hint,
        })
    }

    pub fn grid(&self) -> Grid {
        self.geometry.grid
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn layouts(&self) -> &[EdgeLayout] {
        &self.layouts
    }

    /// Pieces in index order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, index: usize) -> Option<&Piece> {
        self.pieces.get(index)
    }

    pub(crate) fn piece_mut(&mut self, index: usize) -> Option<&mut Piece> {
        self.pieces.get_mut(index)
    }

    /// Pieces from bottom to top of the visual stack.
    pub fn pieces_by_stack(&self) -> Vec<&Piece> {
        let mut sorted: Vec<&Piece> = self.pieces.iter().collect();
        sorted.sort_by_key(|p| p.stack_order);
        sorted
    }

    pub fn overlay(&self) -> &HighlightOverlay {
        &self.overlay
    }

    pub(crate) fn overlay_mut(&mut self) -> &mut HighlightOverlay {
        &mut self.overlay
    }

    /// Faded source image covering the board.
    pub fn hint(&self) -> &Pixmap {
        &self.hint
    }

    /// Board layer as the player sees it.
    pub fn compose_board(&self) -> Result<Pixmap> {
        compose_board(&self.geometry, &self.hint, &self.pieces, &self.overlay)
    }

    pub fn snapped_count(&self) -> usize {
        self.pieces.iter().filter(|p| p.is_snapped()).count()
    }

    pub fn remaining(&self) -> usize {
        self.pieces.len() - self.snapped_count()
    }

    pub fn is_solved(&self) -> bool {
        self.remaining() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::SequenceSource;

    fn image(width: u32, height: u32) -> SourceImage {
        SourceImage::from_rgba8(width, height, vec![128; (width * height * 4) as usize]).unwrap()
    }

    fn setup(spec: GridSpec, viewport: (f64, f64)) -> Result<Session> {
        Session::setup(
            Some(&image(300, 300)),
            spec,
            viewport,
            (600.0, 500.0),
            &PuzzleConfig::default(),
            &mut SequenceSource::constant(0.5),
        )
    }

    #[test]
    fn test_setup_missing_image() {
        let result = Session::setup(
            None,
            GridSpec::new(3, 3),
            (340.0, 340.0),
            (600.0, 500.0),
            &PuzzleConfig::default(),
            &mut SequenceSource::default(),
        );
        assert!(matches!(result, Err(PuzzleError::MissingInput)));
    }

    #[test]
    fn test_setup_invalid_grid() {
        let result = setup(GridSpec::new(3, 0), (340.0, 340.0));
        assert!(matches!(
            result,
            Err(PuzzleError::InvalidConfiguration { rows: 3, cols: 0 })
        ));
    }

    #[test]
    fn test_setup_degenerate_viewport() {
        let result = setup(GridSpec::new(3, 3), (30.0, 340.0));
        assert!(matches!(result, Err(PuzzleError::GeometryDegenerate { .. })));
    }

    #[test]
    fn test_setup_sub_pixel_pieces_are_degenerate() {
        // Board is 1x1, so every highlight canvas would truncate to 0 px.
        let err = setup(GridSpec::new(3, 3), (41.0, 41.0)).unwrap_err();
        assert!(matches!(err, PuzzleError::GeometryDegenerate { .. }));
        assert_eq!(err.severity(), crate::error::Severity::Advisory);
    }

    #[test]
    fn test_setup_scatters_loose_pieces() {
        let session = setup(GridSpec::new(3, 3), (340.0, 340.0)).unwrap();
        assert_eq!(session.pieces().len(), 9);
        assert_eq!(session.overlay().len(), 9);
        assert_eq!(session.snapped_count(), 0);
        assert_eq!(session.remaining(), 9);
        for piece in session.pieces() {
            assert!(piece.is_loose());
            // Bitmaps are 204 px; half of (600 - 204, 500 - 204)
            assert_eq!(piece.position, Point::new(198.0, 148.0));
        }
    }

    #[test]
    fn test_scatter_never_negative_in_small_staging() {
        let session = Session::setup(
            Some(&image(300, 300)),
            GridSpec::new(3, 3),
            (340.0, 340.0),
            (100.0, 100.0),
            &PuzzleConfig::default(),
            &mut SequenceSource::constant(0.9),
        )
        .unwrap();
        assert!(session.pieces().iter().all(|p| p.position == Point::ZERO));
    }

    #[test]
    fn test_compose_board_size() {
        let session = setup(GridSpec::new(3, 3), (340.0, 340.0)).unwrap();
        let board = session.compose_board().unwrap();
        assert_eq!((board.width(), board.height()), (300, 300));
        assert_eq!((session.hint().width(), session.hint().height()), (300, 300));
    }
}
