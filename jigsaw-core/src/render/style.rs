//! Colors used when painting pieces and highlights.

use tiny_skia::Color;

/// Separating line on each piece: black at 0.5 alpha.
pub fn piece_stroke() -> Color {
    Color::from_rgba8(0, 0, 0, 128)
}

/// Highlight outline: yellow at 0.8 alpha.
pub fn highlight_stroke() -> Color {
    Color::from_rgba8(255, 255, 0, 204)
}

/// Highlight fill: yellow at 0.2 alpha.
pub fn highlight_fill() -> Color {
    Color::from_rgba8(255, 255, 0, 51)
}
