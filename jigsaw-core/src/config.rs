//! Configuration constants and settings for puzzle generation and play.

use serde::{Deserialize, Serialize};

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Tab size as a fraction of the smaller piece dimension.
pub const TAB_RATIO: f64 = 0.25;

/// Distance of the bulge control points from the edge line, in tab sizes.
pub const BULGE_FACTOR: f64 = 1.5;

/// Extra raster pad (px) added on top of `ceil(tab_size)`.
pub const RASTER_PAD: f64 = 2.0;

/// Space (px) kept free around the board inside the viewport budget.
pub const VIEWPORT_PADDING: f64 = 40.0;

/// Snap threshold as a fraction of the smaller piece dimension.
pub const SNAP_RATIO: f64 = 0.5;

/// Stacking order before the first grab.
pub const INITIAL_STACK_ORDER: u32 = 100;

/// Stroke width (px) of the separating line on each piece.
pub const PIECE_STROKE_WIDTH: f32 = 2.0;

/// Stroke width (px) of a highlight region outline.
pub const HIGHLIGHT_STROKE_WIDTH: f32 = 3.0;

/// Opacity of the hint image underneath the board.
pub const HINT_OPACITY: f32 = 0.25;

/// How long a progress message stays visible (ms).
pub const PROGRESS_TOAST_MS: u64 = 3000;

/// How long the success message stays visible (ms).
pub const SOLVED_TOAST_MS: u64 = 6000;

/// Rows and columns of a puzzle grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    pub rows: usize,
    pub cols: usize,
}

impl GridSpec {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

/// Difficulty presets offered to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Hell,
}

impl Difficulty {
    /// All presets, easiest first.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Hell,
    ];

    /// Grid dimensions for this preset.
    pub fn grid(&self) -> GridSpec {
        match self {
            Difficulty::Easy => GridSpec::new(3, 3),
            Difficulty::Medium => GridSpec::new(5, 5),
            Difficulty::Hard => GridSpec::new(8, 8),
            Difficulty::Hell => GridSpec::new(15, 15),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "hell" => Ok(Difficulty::Hell),
            other => Err(format!(
                "unknown difficulty '{other}' (expected easy, medium, hard or hell)"
            )),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Hell => write!(f, "hell"),
        }
    }
}

impl From<Difficulty> for GridSpec {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.grid()
    }
}

/// Tunables for geometry and snapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    /// Tab size as a fraction of `min(piece_width, piece_height)`.
    pub tab_ratio: f64,
    /// Extra raster pad beyond `ceil(tab_size)`.
    pub raster_pad: f64,
    /// Space kept free around the board.
    pub viewport_padding: f64,
    /// Snap threshold as a fraction of `min(piece_width, piece_height)`.
    pub snap_ratio: f64,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            tab_ratio: TAB_RATIO,
            raster_pad: RASTER_PAD,
            viewport_padding: VIEWPORT_PADDING,
            snap_ratio: SNAP_RATIO,
        }
    }
}

/// Tolerant float comparison for geometry checks.
pub mod float_cmp {
    use super::EPS;

    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }
}
