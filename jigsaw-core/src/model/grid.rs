//! Grid dimensions and linear cell indexing.

use serde::{Deserialize, Serialize};

use crate::config::GridSpec;
use crate::error::{PuzzleError, Result};

/// A validated `rows x cols` grid; both dimensions are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridSpec", into = "GridSpec")]
pub struct Grid {
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Create a grid, rejecting empty dimensions.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows < 1 || cols < 1 {
            return Err(PuzzleError::InvalidConfiguration { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells (and pieces).
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Always false; a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Row-major linear index of `(row, col)`.
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Inverse of [`Grid::index`].
    pub fn cell(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Linear index of `(row, col)` if the cell exists.
    pub fn checked_index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| self.index(row, col))
    }

    /// All `(row, col)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| (row, col)))
    }
}

impl TryFrom<GridSpec> for Grid {
    type Error = PuzzleError;

    fn try_from(spec: GridSpec) -> Result<Self> {
        Grid::new(spec.rows, spec.cols)
    }
}

impl From<Grid> for GridSpec {
    fn from(grid: Grid) -> Self {
        GridSpec::new(grid.rows, grid.cols)
    }
}
