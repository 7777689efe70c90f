//! Data model for the puzzle: grid, edge layouts, geometry, outlines and pieces.

mod board;
mod edge;
mod grid;
mod path;
mod piece;
mod point;

pub use board::BoardGeometry;
pub use edge::{EdgeCode, EdgeLayout, Side};
pub use grid::Grid;
pub use path::{PiecePath, Segment};
pub use piece::{Piece, PlacementState};
pub use point::{Point, Rect};
