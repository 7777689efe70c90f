//! Game session and pointer-driven interaction.

mod controller;
mod session;

pub use controller::{Completion, DragSession, PuzzleGame, Release, ScreenLayout};
pub use session::Session;
