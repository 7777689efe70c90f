//! Error types for puzzle setup and rendering.

use thiserror::Error;

/// Error codes for puzzle setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Grid dimensions below 1 (-1)
    InvalidConfiguration = -1,
    /// No image supplied (-2)
    MissingInput = -2,
    /// Board too small to host a piece (-3)
    GeometryDegenerate = -3,
    /// Pixel buffer does not match its dimensions (E100)
    InvalidImage = 100,
    /// Generated layouts failed validation (E200)
    LayoutViolation = 200,
    /// Piece bitmap could not be produced (E300)
    RasterFailed = 300,
    /// Board-sized canvas could not be allocated (E301)
    CanvasFailed = 301,
}

/// How a host should surface an error to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Blocking message; the game does not start.
    Blocking,
    /// Non-fatal advisory toast; prior state is untouched.
    Advisory,
}

/// Main error type for the puzzle engine.
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("Invalid grid configuration: {rows} x {cols} (rows and columns must be at least 1)")]
    InvalidConfiguration { rows: usize, cols: usize },

    #[error("Please choose an image first")]
    MissingInput,

    #[error("Board is too small for a {piece_width} x {piece_height} piece")]
    GeometryDegenerate { piece_width: f64, piece_height: f64 },

    #[error("Invalid image buffer: {width} x {height} needs {expected} bytes, got {len}")]
    InvalidImage {
        width: u32,
        height: u32,
        expected: usize,
        len: usize,
    },

    #[error("Generated piece layouts broke {violations} edge rule(s)")]
    LayoutViolation { violations: usize },

    #[error("Failed to rasterize piece {index}")]
    RasterFailed { index: usize },

    #[error("Failed to allocate a {width} x {height} canvas")]
    CanvasFailed { width: u32, height: u32 },
}

impl PuzzleError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PuzzleError::InvalidConfiguration { .. } => ErrorCode::InvalidConfiguration,
            PuzzleError::MissingInput => ErrorCode::MissingInput,
            PuzzleError::GeometryDegenerate { .. } => ErrorCode::GeometryDegenerate,
            PuzzleError::InvalidImage { .. } => ErrorCode::InvalidImage,
            PuzzleError::LayoutViolation { .. } => ErrorCode::LayoutViolation,
            PuzzleError::RasterFailed { .. } => ErrorCode::RasterFailed,
            PuzzleError::CanvasFailed { .. } => ErrorCode::CanvasFailed,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }

    /// Whether the error blocks the game or is only an advisory.
    pub fn severity(&self) -> Severity {
        match self.code() {
            ErrorCode::MissingInput | ErrorCode::GeometryDegenerate => Severity::Advisory,
            _ => Severity::Blocking,
        }
    }
}

/// Result type alias for puzzle operations.
pub type Result<T> = std::result::Result<T, PuzzleError>;
