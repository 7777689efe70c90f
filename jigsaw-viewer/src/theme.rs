//! Colors and sizes for the puzzle table.

use egui::Color32;

// =============================================================================
// TABLE
// =============================================================================
pub const TABLE_BG: Color32 = Color32::from_rgb(38, 44, 40);
pub const STAGING_FILL: Color32 = Color32::from_rgb(46, 54, 49);
pub const STAGING_BORDER: Color32 = Color32::from_rgb(70, 82, 74);

// =============================================================================
// BOARD
// =============================================================================
pub const BOARD_FILL: Color32 = Color32::from_rgb(228, 224, 214);
pub const BOARD_BORDER: Color32 = Color32::from_rgb(120, 110, 95);
pub const BOARD_BORDER_SOLVED: Color32 = Color32::from_rgb(250, 200, 60);

// =============================================================================
// TOAST
// =============================================================================
pub const TOAST_BG: Color32 = Color32::from_rgba_premultiplied(20, 20, 20, 220);
pub const TOAST_TEXT: Color32 = Color32::from_rgb(245, 245, 245);
pub const TOAST_SOLVED_TEXT: Color32 = Color32::from_rgb(255, 215, 90);

// =============================================================================
// LAYOUT
// =============================================================================

/// Share of the canvas width given to the staging area.
pub const STAGING_SHARE: f32 = 0.45;
/// Gap between the staging area and the board area.
pub const AREA_GAP: f32 = 12.0;
pub const TOAST_MARGIN: f32 = 24.0;
pub const TOAST_ROUNDING: f32 = 6.0;
