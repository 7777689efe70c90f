//! Drag, snap and completion state machine.
//!
//! Screen coordinates come from the host. The controller keeps the last
//! reported [`ScreenLayout`] and only changes it through
//! [`PuzzleGame::set_layout`], so a page reflow in the middle of a drag does
//! not move the snap target until the host reports it.

use tracing::{debug, info, warn};

use crate::config::{
    GridSpec, PuzzleConfig, INITIAL_STACK_ORDER, PROGRESS_TOAST_MS, SOLVED_TOAST_MS,
};
use crate::error::Result;
use crate::generator::{RandomSource, ThreadSource};
use crate::interaction::Session;
use crate::model::{Piece, Point, Rect};
use crate::render::SourceImage;

/// Host-reported screen geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenLayout {
    /// Area the board is fitted into, padding included. The board is
    /// centered inside it.
    pub board_area: Rect,
    /// Area loose pieces live in.
    pub staging: Rect,
}

/// An open drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub piece: usize,
    /// Pointer position relative to the piece's top-left at grab time.
    pub grab_offset: Point,
    /// Staging-relative position before the drag started.
    pub origin: Point,
}

/// Outcome of a pointer release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// The piece locked onto its home position.
    Snapped { piece: usize },
    /// The piece went back to the staging area at `at` (staging-relative).
    Returned { piece: usize, at: Point },
}

/// Result of an explicit completion check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// No game has been started.
    NotStarted,
    /// Every piece is snapped.
    Solved,
    /// This many pieces are still loose.
    Remaining(usize),
}

impl Completion {
    pub fn is_solved(&self) -> bool {
        matches!(self, Completion::Solved)
    }

    /// Text for the host's toast.
    pub fn message(&self) -> String {
        match self {
            Completion::NotStarted => "Start a game first".to_string(),
            Completion::Solved => "Congratulations! Puzzle complete!".to_string(),
            Completion::Remaining(1) => "1 piece left, keep going!".to_string(),
            Completion::Remaining(n) => format!("{n} pieces left, keep going!"),
        }
    }

    /// How long the toast should stay up, in milliseconds.
    pub fn display_ms(&self) -> u64 {
        match self {
            Completion::Solved => SOLVED_TOAST_MS,
            _ => PROGRESS_TOAST_MS,
        }
    }
}

/// The puzzle game: one session at a time plus the drag state.
pub struct PuzzleGame {
    config: PuzzleConfig,
    random: Box<dyn RandomSource>,
    layout: ScreenLayout,
    session: Option<Session>,
    drag: Option<DragSession>,
    next_stack_order: u32,
}

impl PuzzleGame {
    /// Create a game using the system random source.
    pub fn new(config: PuzzleConfig, layout: ScreenLayout) -> Self {
        Self::with_source(config, layout, Box::new(ThreadSource::new()))
    }

    /// Create a game with an injected random source.
    pub fn with_source(
        config: PuzzleConfig,
        layout: ScreenLayout,
        random: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            config,
            random,
            layout,
            session: None,
            drag: None,
            next_stack_order: INITIAL_STACK_ORDER,
        }
    }

    /// Start a new game, replacing any previous one.
    ///
    /// On error nothing changes: the previous session, drag and stacking
    /// counter stay as they were.
    pub fn start_game(&mut self, image: Option<&SourceImage>, grid: GridSpec) -> Result<()> {
        let viewport = (self.layout.board_area.width, self.layout.board_area.height);
        let staging = (self.layout.staging.width, self.layout.staging.height);
        let session = Session::setup(
            image,
            grid,
            viewport,
            staging,
            &self.config,
            self.random.as_mut(),
        )
        .inspect_err(|e| warn!("Game not started: {}", e))?;

        if self.session.is_some() {
            info!("Discarding previous session");
        }
        self.session = Some(session);
        self.drag = None;
        self.next_stack_order = INITIAL_STACK_ORDER;
        Ok(())
    }

    /// Update the cached screen geometry.
    pub fn set_layout(&mut self, layout: ScreenLayout) {
        if layout != self.layout {
            debug!(?layout, "Screen layout changed");
        }
        self.layout = layout;
    }

    pub fn layout(&self) -> ScreenLayout {
        self.layout
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Screen rectangle of the board, centered in the board area.
    pub fn board_rect(&self) -> Option<Rect> {
        let geometry = self.session.as_ref()?.geometry();
        let area = self.layout.board_area;
        Some(Rect::new(
            area.x + (area.width - geometry.board_width) / 2.0,
            area.y + (area.height - geometry.board_height) / 2.0,
            geometry.board_width,
            geometry.board_height,
        ))
    }

    /// Screen position of a piece's bitmap top-left.
    pub fn screen_position(&self, piece: &Piece) -> Point {
        match self.board_rect() {
            Some(board) if piece.is_snapped() => board.origin() + piece.position,
            _ => self.layout.staging.origin() + piece.position,
        }
    }

    /// Topmost loose piece with a visible pixel under the pointer.
    pub fn piece_at(&self, pointer: Point) -> Option<usize> {
        let session = self.session.as_ref()?;
        session
            .pieces()
            .iter()
            .filter(|p| p.is_loose())
            .filter(|p| p.alpha_at(pointer - self.screen_position(p)) > 0)
            .max_by_key(|p| p.stack_order)
            .map(|p| p.index)
    }

    /// Grab a loose piece. Returns `false` when the grab is ignored.
    pub fn pointer_down(&mut self, index: usize, pointer: Point) -> bool {
        if self.drag.is_some() {
            warn!(index, "Grab ignored: another piece is being dragged");
            return false;
        }
        let staging = self.layout.staging.origin();
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(piece) = session.piece_mut(index) else {
            return false;
        };
        if piece.is_snapped() {
            return false;
        }

        self.next_stack_order += 1;
        piece.stack_order = self.next_stack_order;
        let grab_offset = pointer - (staging + piece.position);
        self.drag = Some(DragSession {
            piece: index,
            grab_offset,
            origin: piece.position,
        });
        debug!(index, stack_order = piece.stack_order, "Grabbed piece");
        true
    }

    /// Follow the pointer. Returns the highlighted cell, if any.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<usize> {
        let drag = self.drag?;
        let board = self.board_rect()?;
        let staging = self.layout.staging.origin();
        let session = self.session.as_mut()?;

        if let Some(piece) = session.piece_mut(drag.piece) {
            piece.position = pointer - drag.grab_offset - staging;
        }

        let target = if board.contains(pointer) {
            session.geometry().cell_at(pointer - board.origin())
        } else {
            None
        };
        session.overlay_mut().set_active(target);
        session.overlay().active()
    }

    /// Drop the dragged piece: snap it home or return it to staging.
    pub fn pointer_up(&mut self) -> Option<Release> {
        let drag = self.drag.take()?;
        let board = self.board_rect()?;
        let staging = self.layout.staging;
        let session = self.session.as_mut()?;
        session.overlay_mut().clear();

        let threshold = session.geometry().snap_threshold;
        let piece = session.piece_mut(drag.piece)?;
        let current = staging.origin() + piece.position;
        let target = board.origin() + piece.home;
        let distance = current.distance_to(target);

        if distance < threshold {
            piece.snap();
            debug!(index = drag.piece, distance, "Snapped piece");
            return Some(Release::Snapped { piece: drag.piece });
        }

        let (w, h) = piece.size();
        let at = Point::new(
            piece.position.x.min(staging.width - w * 0.5).max(-w * 0.5),
            piece.position.y.min(staging.height - h * 0.5).max(-h * 0.5),
        );
        piece.position = at;
        debug!(index = drag.piece, distance, x = at.x, y = at.y, "Returned piece");
        Some(Release::Returned {
            piece: drag.piece,
            at,
        })
    }

    /// Compare snapped pieces with the total. Safe to call any number of times.
    pub fn check_completion(&self) -> Completion {
        let Some(session) = self.session.as_ref() else {
            return Completion::NotStarted;
        };
        if session.is_solved() {
            info!("Puzzle solved");
            Completion::Solved
        } else {
            Completion::Remaining(session.remaining())
        }
    }

    pub fn snapped_count(&self) -> usize {
        self.session.as_ref().map_or(0, Session::snapped_count)
    }

    pub fn remaining(&self) -> usize {
        self.session.as_ref().map_or(0, Session::remaining)
    }

    pub fn is_solved(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_solved)
    }

    /// Current value of the stacking counter.
    pub fn stack_order(&self) -> u32 {
        self.next_stack_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PuzzleError;
    use crate::generator::SequenceSource;

    // Board area 340x340 at (600, 0) centers a 300x300 board at (620, 20).
    fn layout() -> ScreenLayout {
        ScreenLayout {
            board_area: Rect::new(600.0, 0.0, 340.0, 340.0),
            staging: Rect::new(0.0, 0.0, 500.0, 400.0),
        }
    }

    fn image() -> SourceImage {
        SourceImage::from_rgba8(300, 300, vec![200; 300 * 300 * 4]).unwrap()
    }

    fn started() -> PuzzleGame {
        let mut game = PuzzleGame::with_source(
            PuzzleConfig::default(),
            layout(),
            Box::new(SequenceSource::constant(0.0)),
        );
        game.start_game(Some(&image()), GridSpec::new(3, 3)).unwrap();
        game
    }

    // ==================== Setup tests ====================

    #[test]
    fn test_board_rect_centered() {
        let game = started();
        assert_eq!(game.board_rect(), Some(Rect::new(620.0, 20.0, 300.0, 300.0)));
    }

    #[test]
    fn test_missing_image_leaves_state() {
        let mut game = started();
        game.pointer_down(0, Point::new(60.0, 60.0));
        let err = game.start_game(None, GridSpec::new(5, 5)).unwrap_err();
        assert!(matches!(err, PuzzleError::MissingInput));
        assert!(game.is_dragging());
        assert_eq!(game.session().map(|s| s.pieces().len()), Some(9));
    }

    // ==================== Grab tests ====================

    #[test]
    fn test_grab_raises_stack_order() {
        let mut game = started();
        assert_eq!(game.stack_order(), 100);
        assert!(game.pointer_down(3, Point::new(60.0, 60.0)));
        assert_eq!(game.session().unwrap().piece(3).unwrap().stack_order, 101);
        game.pointer_up();
        assert!(game.pointer_down(5, Point::new(60.0, 60.0)));
        assert_eq!(game.session().unwrap().piece(5).unwrap().stack_order, 102);
    }

    #[test]
    fn test_second_grab_ignored_while_dragging() {
        let mut game = started();
        assert!(game.pointer_down(1, Point::new(10.0, 10.0)));
        assert!(!game.pointer_down(2, Point::new(10.0, 10.0)));
        assert_eq!(game.drag().map(|d| d.piece), Some(1));
    }

    #[test]
    fn test_piece_at_prefers_top_of_stack() {
        let mut game = started();
        // All pieces start at staging (0, 0); raise piece 6 last.
        game.pointer_down(6, Point::new(102.0, 102.0));
        game.pointer_up();
        assert_eq!(game.piece_at(Point::new(102.0, 102.0)), Some(6));
        // Padded corner is transparent for every piece.
        assert_eq!(game.piece_at(Point::new(1.0, 1.0)), None);
    }

    // ==================== Move tests ====================

    #[test]
    fn test_move_keeps_grab_offset_and_highlights() {
        let mut game = started();
        game.pointer_down(0, Point::new(100.0, 100.0));
        let active = game.pointer_move(Point::new(770.0, 170.0));
        // Board-relative (150, 150) is the center cell.
        assert_eq!(active, Some(4));
        let piece = game.session().unwrap().piece(0).unwrap();
        assert_eq!(piece.position, Point::new(670.0, 70.0));
    }

    #[test]
    fn test_move_off_board_clears_highlight() {
        let mut game = started();
        game.pointer_down(0, Point::new(100.0, 100.0));
        game.pointer_move(Point::new(700.0, 100.0));
        assert_eq!(game.pointer_move(Point::new(400.0, 100.0)), None);
        // Right border is inside the board but maps to column 3.
        assert_eq!(game.pointer_move(Point::new(920.0, 100.0)), None);
        assert_eq!(game.session().unwrap().overlay().active(), None);
    }

    #[test]
    fn test_move_without_drag_is_noop() {
        let mut game = started();
        assert_eq!(game.pointer_move(Point::new(700.0, 100.0)), None);
    }

    // ==================== Release tests ====================

    #[test]
    fn test_release_far_away_clamps_into_staging() {
        let mut game = started();
        game.pointer_down(2, Point::new(0.0, 0.0));
        game.pointer_move(Point::new(-500.0, 900.0));
        let release = game.pointer_up();
        // Bitmap is 204 px: x >= -102, y <= 400 - 102.
        assert_eq!(
            release,
            Some(Release::Returned {
                piece: 2,
                at: Point::new(-102.0, 298.0)
            })
        );
        assert!(!game.is_dragging());
        assert_eq!(game.session().unwrap().overlay().active(), None);
    }

    #[test]
    fn test_release_near_home_snaps() {
        let mut game = started();
        // Piece 4 home is board (48, 48) = screen (668, 68).
        game.pointer_down(4, Point::new(0.0, 0.0));
        game.pointer_move(Point::new(668.0 + 30.0, 68.0 + 30.0));
        assert_eq!(game.pointer_up(), Some(Release::Snapped { piece: 4 }));
        let piece = game.session().unwrap().piece(4).unwrap();
        assert!(piece.is_snapped());
        assert_eq!(piece.position, Point::new(48.0, 48.0));
        assert_eq!(game.snapped_count(), 1);
        // Snapped pieces cannot be grabbed again.
        assert!(!game.pointer_down(4, Point::new(700.0, 100.0)));
    }

    #[test]
    fn test_pointer_up_without_drag() {
        let mut game = started();
        assert_eq!(game.pointer_up(), None);
    }

    // ==================== Completion tests ====================

    #[test]
    fn test_completion_messages() {
        assert_eq!(Completion::Remaining(3).message(), "3 pieces left, keep going!");
        assert_eq!(Completion::Remaining(1).message(), "1 piece left, keep going!");
        assert_eq!(Completion::Solved.display_ms(), 6000);
        assert_eq!(Completion::Remaining(2).display_ms(), 3000);
    }

    #[test]
    fn test_check_completion_before_start() {
        let game = PuzzleGame::with_source(
            PuzzleConfig::default(),
            layout(),
            Box::new(SequenceSource::default()),
        );
        assert_eq!(game.check_completion(), Completion::NotStarted);
    }
}
