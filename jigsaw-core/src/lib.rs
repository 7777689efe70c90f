//! jigsaw-core - Core library for generating and playing jigsaw puzzles.
//!
//! This library cuts a decoded image into interlocking tab-and-blank pieces,
//! rasterizes every piece clipped to its outline, and runs the drag, snap and
//! completion logic of a puzzle board. Hosts (a CLI and an egui viewer) only
//! feed it pixels and pointer events.
//!
//! # Example
//!
//! ```no_run
//! use jigsaw_core::{Difficulty, PuzzleConfig, PuzzleGame, Rect, ScreenLayout, SourceImage};
//!
//! let image = SourceImage::from_rgba8(2, 2, vec![255; 16]).unwrap();
//! let layout = ScreenLayout {
//!     board_area: Rect::new(600.0, 0.0, 640.0, 480.0),
//!     staging: Rect::new(0.0, 0.0, 580.0, 480.0),
//! };
//! let mut game = PuzzleGame::new(PuzzleConfig::default(), layout);
//! game.start_game(Some(&image), Difficulty::Easy.grid()).unwrap();
//! println!("{}", game.check_completion().message());
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod interaction;
pub mod model;
pub mod render;
pub mod validation;

// Re-exports for convenience
pub use config::{Difficulty, GridSpec, PuzzleConfig};
pub use error::{ErrorCode, PuzzleError, Result, Severity};
pub use generator::{
    build_path, generate_shapes, RandomSource, SeededSource, SequenceSource, ThreadSource,
};
pub use interaction::{Completion, PuzzleGame, Release, ScreenLayout, Session};
pub use model::{
    BoardGeometry, EdgeCode, EdgeLayout, Grid, Piece, PiecePath, PlacementState, Point, Rect,
};
pub use render::{HighlightOverlay, HighlightRegion, SourceImage};
pub use tiny_skia::Pixmap;
pub use validation::{validate_layouts, ValidationResult};

/// Build a session for a headless host.
///
/// Fits the image into `viewport`, scatters pieces over `staging` and seeds
/// the random source when `seed` is given, so the same seed always yields
/// the same cut and scatter.
pub fn build_session(
    image: &SourceImage,
    grid: GridSpec,
    viewport: (f64, f64),
    staging: (f64, f64),
    seed: Option<u64>,
) -> Result<Session> {
    let config = PuzzleConfig::default();
    match seed {
        Some(seed) => Session::setup(
            Some(image),
            grid,
            viewport,
            staging,
            &config,
            &mut SeededSource::seeded(seed),
        ),
        None => Session::setup(
            Some(image),
            grid,
            viewport,
            staging,
            &config,
            &mut ThreadSource::new(),
        ),
    }
}
