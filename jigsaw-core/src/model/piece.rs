//! A single puzzle piece: its layout, bitmap and placement.

use serde::{Deserialize, Serialize};
use tiny_skia::Pixmap;

use crate::model::{EdgeLayout, Point};

/// Where a piece currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlacementState {
    /// Draggable; positioned relative to the staging area.
    #[default]
    Loose,
    /// Locked at its home position on the board. Terminal.
    Snapped,
}

/// One piece of the puzzle.
///
/// `position` is the top-left of the padded bitmap. For a loose piece it is
/// relative to the staging area; once snapped it equals `home` and is
/// relative to the board.
#[derive(Debug, Clone)]
pub struct Piece {
    /// Linear index `row * cols + col`.
    pub index: usize,
    pub row: usize,
    pub col: usize,
    pub layout: EdgeLayout,
    bitmap: Pixmap,
    /// Board-relative target position.
    pub home: Point,
    pub position: Point,
    pub state: PlacementState,
    /// Visual stacking order; higher draws on top.
    pub stack_order: u32,
}

impl Piece {
    /// Create a loose piece at `position`.
    pub fn new(
        index: usize,
        row: usize,
        col: usize,
        layout: EdgeLayout,
        bitmap: Pixmap,
        home: Point,
        position: Point,
    ) -> Self {
        Self {
            index,
            row,
            col,
            layout,
            bitmap,
            home,
            position,
            state: PlacementState::Loose,
            stack_order: 0,
        }
    }

    /// Rendered image content, clipped to the outline. Never mutated.
    pub fn bitmap(&self) -> &Pixmap {
        &self.bitmap
    }

    /// Padded footprint in display pixels.
    pub fn size(&self) -> (f64, f64) {
        (self.bitmap.width() as f64, self.bitmap.height() as f64)
    }

    pub fn is_loose(&self) -> bool {
        self.state == PlacementState::Loose
    }

    pub fn is_snapped(&self) -> bool {
        self.state == PlacementState::Snapped
    }

    /// Lock the piece at its home position.
    pub fn snap(&mut self) {
        self.position = self.home;
        self.state = PlacementState::Snapped;
    }

    /// Alpha of the bitmap under a point relative to the bitmap's top-left.
    pub fn alpha_at(&self, local: Point) -> u8 {
        if local.x < 0.0 || local.y < 0.0 {
            return 0;
        }
        self.bitmap
            .pixel(local.x.floor() as u32, local.y.floor() as u32)
            .map_or(0, |px| px.alpha())
    }
}
