//! Drop-target highlight overlay, one pre-rendered region per cell.

use tiny_skia::{FillRule, Paint, Pixmap, Stroke, Transform};
use tracing::trace;

use crate::config::HIGHLIGHT_STROKE_WIDTH;
use crate::error::{PuzzleError, Result};
use crate::generator::build_path;
use crate::model::{BoardGeometry, EdgeLayout, Point};
use crate::render::style;

/// Highlight shape of one cell.
#[derive(Debug, Clone)]
pub struct HighlightRegion {
    pub index: usize,
    /// Board-relative top-left: `(col * pw - tab, row * ph - tab)`.
    pub origin: Point,
    bitmap: Pixmap,
}

impl HighlightRegion {
    /// Stroked and lightly filled outline, `piece + 2 * tab` in size.
    pub fn bitmap(&self) -> &Pixmap {
        &self.bitmap
    }
}

/// All highlight regions of a board and which one, if any, is active.
#[derive(Debug, Clone)]
pub struct HighlightOverlay {
    regions: Vec<HighlightRegion>,
    active: Option<usize>,
}

impl HighlightOverlay {
    /// Render one region per layout. Must be rebuilt when the grid or board
    /// geometry changes.
    pub fn build(geometry: &BoardGeometry, layouts: &[EdgeLayout]) -> Result<Self> {
        let (width, height) = geometry.highlight_size();
        let tab = geometry.tab_size;

        let mut stroke_paint = Paint::default();
        stroke_paint.set_color(style::highlight_stroke());
        let mut fill_paint = Paint::default();
        fill_paint.set_color(style::highlight_fill());
        let stroke = Stroke {
            width: HIGHLIGHT_STROKE_WIDTH,
            ..Default::default()
        };

        let mut regions = Vec::with_capacity(layouts.len());
        for (index, layout) in layouts.iter().enumerate() {
            let failed = || PuzzleError::RasterFailed { index };
            let (row, col) = geometry.grid.cell(index);

            let path = build_path(geometry.piece_width, geometry.piece_height, tab, layout)
                .translated(tab, tab)
                .to_skia()
                .ok_or_else(failed)?;

            let mut bitmap = Pixmap::new(width, height).ok_or_else(failed)?;
            bitmap.stroke_path(&path, &stroke_paint, &stroke, Transform::identity(), None);
            bitmap.fill_path(&path, &fill_paint, FillRule::Winding, Transform::identity(), None);

            regions.push(HighlightRegion {
                index,
                origin: geometry.highlight_origin(row, col),
                bitmap,
            });
        }

        Ok(Self {
            regions,
            active: None,
        })
    }

    /// Make exactly one region active, or none.
    ///
    /// An index with no region clears every highlight. Returns whether the
    /// active region changed.
    pub fn set_active(&mut self, index: Option<usize>) -> bool {
        let next = index.filter(|&i| i < self.regions.len());
        let changed = next != self.active;
        if changed {
            trace!(from = ?self.active, to = ?next, "Highlight changed");
        }
        self.active = next;
        changed
    }

    /// Clear every highlight.
    pub fn clear(&mut self) {
        self.set_active(None);
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    pub fn active_region(&self) -> Option<&HighlightRegion> {
        self.active.and_then(|i| self.regions.get(i))
    }

    pub fn regions(&self) -> &[HighlightRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
