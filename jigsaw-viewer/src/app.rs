//! Main application state and eframe integration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use egui::{CentralPanel, Context, CursorIcon, Key, PointerButton, TopBottomPanel, Vec2};
use jigsaw_core::config::PROGRESS_TOAST_MS;
use jigsaw_core::{
    Difficulty, PuzzleConfig, PuzzleError, PuzzleGame, Release, ScreenLayout, Severity,
    SourceImage,
};

use crate::canvas::{self, SessionTextures};
use crate::theme;

/// A timed message over the table.
#[derive(Debug, Clone, PartialEq)]
struct Toast {
    message: String,
    solved: bool,
    /// Context time, in seconds, after which the toast is gone.
    expires_at: f64,
}

impl Toast {
    fn new(message: String, solved: bool, now: f64, display_ms: u64) -> Self {
        Self {
            message,
            solved,
            expires_at: now + display_ms as f64 / 1000.0,
        }
    }

    fn is_visible(&self, now: f64) -> bool {
        now < self.expires_at
    }
}

/// Main application state.
pub struct PuzzleApp {
    game: PuzzleGame,
    /// Decoded image of the next game
    image: Option<SourceImage>,
    image_path: Option<PathBuf>,
    difficulty: Difficulty,

    /// Textures of the running session
    textures: Option<SessionTextures>,
    /// Start a game once the canvas has been laid out
    start_pending: bool,

    status_message: String,
    error_message: Option<String>,
    toast: Option<Toast>,
    show_about_dialog: bool,
}

impl PuzzleApp {
    /// Create a new puzzle application.
    pub fn new(_cc: &eframe::CreationContext<'_>, initial_image: Option<PathBuf>) -> Self {
        let mut app = Self {
            game: PuzzleGame::new(PuzzleConfig::default(), ScreenLayout::default()),
            image: None,
            image_path: None,
            difficulty: Difficulty::default(),
            textures: None,
            start_pending: false,
            status_message: "No image loaded. Use File > Open or Ctrl+O".to_string(),
            error_message: None,
            toast: None,
            show_about_dialog: false,
        };

        if let Some(path) = initial_image {
            app.load_image(path);
        }

        app
    }

    /// Decode an image file and queue a new game with it.
    fn load_image(&mut self, path: PathBuf) {
        match decode_image(&path) {
            Ok(image) => {
                tracing::info!(
                    "Loaded {} ({} x {})",
                    path.display(),
                    image.width(),
                    image.height()
                );
                self.status_message = format!(
                    "Loaded: {} | {} x {}",
                    path.file_name()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_default(),
                    image.width(),
                    image.height()
                );
                self.image = Some(image);
                self.image_path = Some(path);
                self.error_message = None;
                self.start_pending = true;
            }
            Err(e) => {
                tracing::error!("Failed to load {}: {}", path.display(), e);
                self.error_message = Some(format!("Failed to load image: {}", e));
                self.status_message = "Error loading image".to_string();
            }
        }
    }

    /// Open file dialog and load the selected image.
    fn open_file_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "webp"])
            .add_filter("All Files", &["*"])
            .pick_file()
        {
            self.load_image(path);
        }
    }

    /// Cut the loaded image at the selected difficulty.
    fn start_game(&mut self, ctx: &Context) {
        let grid = self.difficulty.grid();
        match self.game.start_game(self.image.as_ref(), grid) {
            Ok(()) => {
                self.textures = self
                    .game
                    .session()
                    .map(|session| SessionTextures::upload(ctx, session));
                self.toast = None;
                self.status_message = format!(
                    "New {} game: {} x {} pieces",
                    self.difficulty, grid.rows, grid.cols
                );
                tracing::info!("Started {} x {} game", grid.rows, grid.cols);
            }
            Err(e) => self.report(ctx, &e),
        }
    }

    /// Advisory errors become a toast, blocking ones a dialog.
    fn report(&mut self, ctx: &Context, error: &PuzzleError) {
        match error.severity() {
            Severity::Advisory => {
                tracing::warn!("{}", error);
                self.show_toast(ctx, error.to_string(), false, PROGRESS_TOAST_MS);
            }
            Severity::Blocking => {
                tracing::error!("Failed to start game: {}", error);
                self.error_message = Some(error.to_string());
            }
        }
    }

    fn show_toast(&mut self, ctx: &Context, message: String, solved: bool, display_ms: u64) {
        let now = ctx.input(|i| i.time);
        self.toast = Some(Toast::new(message, solved, now, display_ms));
    }

    fn check_progress(&mut self, ctx: &Context) {
        let completion = self.game.check_completion();
        self.show_toast(
            ctx,
            completion.message(),
            completion.is_solved(),
            completion.display_ms(),
        );
    }

    /// Completion is only reported when the player asks for it.
    fn on_release(&mut self, release: Release) {
        if let Some(status) = release_status(release) {
            self.status_message = status;
        }
        match release {
            Release::Snapped { piece } => {
                tracing::debug!("Piece {} snapped", piece);
            }
            Release::Returned { piece, .. } => {
                tracing::debug!("Piece {} returned to staging", piece);
            }
        }
    }

    /// Render the menu bar.
    fn render_menu(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                // File menu
                ui.menu_button("File", |ui| {
                    if ui.button("Open Image... (Ctrl+O)").clicked() {
                        self.open_file_dialog();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit (Ctrl+Q)").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                // Game menu
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (Ctrl+N)").clicked() {
                        self.start_game(ctx);
                        ui.close_menu();
                    }
                    if ui.button("Check Progress (C)").clicked() {
                        self.check_progress(ctx);
                        ui.close_menu();
                    }
                });

                // Help menu
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.show_about_dialog = true;
                        ui.close_menu();
                    }
                });

                ui.separator();

                egui::ComboBox::from_label("Difficulty")
                    .selected_text(self.difficulty.to_string())
                    .show_ui(ui, |ui| {
                        for difficulty in Difficulty::ALL {
                            let grid = difficulty.grid();
                            ui.selectable_value(
                                &mut self.difficulty,
                                difficulty,
                                format!("{} ({} x {})", difficulty, grid.rows, grid.cols),
                            );
                        }
                    });

                if ui.button("Start").clicked() {
                    self.start_game(ctx);
                }
                if ui.button("Check").clicked() {
                    self.check_progress(ctx);
                }
            });
        });
    }

    /// Render the status bar.
    fn render_status_bar(&mut self, ctx: &Context) {
        TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(session) = self.game.session() {
                        let grid = session.grid();
                        ui.label(format!(
                            "{} / {} placed",
                            session.snapped_count(),
                            session.pieces().len()
                        ));
                        ui.separator();
                        ui.label(format!("{} x {}", grid.rows(), grid.cols()));
                    }
                });
            });
        });
    }

    /// Render the staging area and the board.
    fn render_canvas(&mut self, ctx: &Context) {
        CentralPanel::default()
            .frame(egui::Frame::none().fill(theme::TABLE_BG))
            .show(ctx, |ui| {
                self.handle_keyboard(ctx);

                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
                let canvas_rect = response.rect;

                let (staging, board_area) = canvas::split_canvas(canvas_rect);
                self.game.set_layout(canvas::screen_layout(staging, board_area));

                if self.start_pending {
                    self.start_pending = false;
                    self.start_game(ctx);
                }

                // Grab where the press happened, not where the drag was recognized
                if response.drag_started_by(PointerButton::Primary) {
                    let origin = ctx.input(|i| i.pointer.press_origin());
                    if let Some(pos) = origin.or(response.interact_pointer_pos()) {
                        let pointer = canvas::to_point(pos);
                        if let Some(index) = self.game.piece_at(pointer) {
                            self.game.pointer_down(index, pointer);
                            self.game.pointer_move(pointer);
                        }
                    }
                }

                if self.game.is_dragging() && response.dragged_by(PointerButton::Primary) {
                    if let Some(pos) = response.interact_pointer_pos() {
                        self.game.pointer_move(canvas::to_point(pos));
                    }
                }

                if response.drag_stopped() {
                    if let Some(release) = self.game.pointer_up() {
                        self.on_release(release);
                    }
                }

                if self.game.is_dragging() {
                    ctx.set_cursor_icon(CursorIcon::Grabbing);
                } else if let Some(pos) = response.hover_pos() {
                    if self.game.piece_at(canvas::to_point(pos)).is_some() {
                        ctx.set_cursor_icon(CursorIcon::Grab);
                    }
                }

                canvas::render_table(&painter, &self.game, self.textures.as_ref(), staging);

                let now = ctx.input(|i| i.time);
                if self.toast.as_ref().is_some_and(|t| !t.is_visible(now)) {
                    self.toast = None;
                }
                if let Some(toast) = &self.toast {
                    canvas::render_toast(&painter, canvas_rect, &toast.message, toast.solved);
                    let left = (toast.expires_at - now).max(0.0);
                    ctx.request_repaint_after(Duration::from_secs_f64(left));
                }
            });
    }

    /// Handle keyboard shortcuts.
    fn handle_keyboard(&mut self, ctx: &Context) {
        let (open, new_game, check, quit) = ctx.input(|i| {
            (
                i.modifiers.ctrl && i.key_pressed(Key::O),
                i.modifiers.ctrl && i.key_pressed(Key::N),
                !i.modifiers.ctrl && i.key_pressed(Key::C),
                i.modifiers.ctrl && i.key_pressed(Key::Q),
            )
        });

        if open {
            self.open_file_dialog();
        }
        if new_game {
            self.start_game(ctx);
        }
        if check {
            self.check_progress(ctx);
        }
        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    /// Show error dialog if there's an error.
    fn show_error_dialog(&mut self, ctx: &Context) {
        if let Some(error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(&error);
                    ui.separator();
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }
    }

    /// Show about dialog.
    fn show_about(&mut self, ctx: &Context) {
        if !self.show_about_dialog {
            return;
        }

        egui::Window::new("About Jigsaw Puzzle")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.heading("Jigsaw Puzzle");
                ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                ui.separator();
                ui.label("Drag pieces from the left onto the board.");
                ui.label("A piece locks in when dropped close to its place.");
                ui.separator();
                if let Some(path) = &self.image_path {
                    ui.label(format!("Image: {}", path.display()));
                }
                if ui.button("Close").clicked() {
                    self.show_about_dialog = false;
                }
            });
    }
}

/// Decode an image file into straight RGBA pixels.
fn decode_image(path: &Path) -> Result<SourceImage, String> {
    let decoded = image::open(path).map_err(|e| e.to_string())?.to_rgba8();
    let (width, height) = decoded.dimensions();
    SourceImage::from_rgba8(width, height, decoded.into_raw()).map_err(|e| e.to_string())
}

/// Status bar text after a drop. Returned pieces leave the status alone.
fn release_status(release: Release) -> Option<String> {
    match release {
        Release::Snapped { piece } => Some(format!("Placed piece {}", piece + 1)),
        Release::Returned { .. } => None,
    }
}

impl eframe::App for PuzzleApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.render_menu(ctx);
        self.render_status_bar(ctx);
        self.render_canvas(ctx);
        self.show_error_dialog(ctx);
        self.show_about(ctx);

        // Only repaint on interaction
        if ctx.input(|i| i.pointer.is_moving() || i.pointer.any_down()) {
            ctx.request_repaint();
        }
    }
}
