//! Bitmap production: piece rasters, highlight regions and the board layer.

mod board;
mod image;
mod overlay;
mod piece;
pub mod style;

pub use board::{compose_board, render_hint};
pub use image::SourceImage;
pub use overlay::{HighlightOverlay, HighlightRegion};
pub use piece::{rasterize_piece, PieceRaster};
