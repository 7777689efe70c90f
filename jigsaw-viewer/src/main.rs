//! Jigsaw viewer - play a jigsaw puzzle cut from any image.

mod app;
mod canvas;
mod theme;

use app::PuzzleApp;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Optional image to open on startup
    let initial_image: Option<PathBuf> = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Jigsaw Puzzle"),
        vsync: false,
        ..Default::default()
    };

    eframe::run_native(
        "Jigsaw Puzzle",
        options,
        Box::new(move |cc| Ok(Box::new(PuzzleApp::new(cc, initial_image)))),
    )
}
