//! jigsaw - CLI tool to cut an image into interlocking jigsaw pieces.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use jigsaw_core::{
    validate_layouts, BoardGeometry, Difficulty, EdgeLayout, GridSpec, PlacementState, Point,
    PuzzleConfig, PuzzleGame, RandomSource, Rect, Release, ScreenLayout, SeededSource, Session,
    SourceImage, ThreadSource, ValidationResult,
};

/// Cut an image into jigsaw pieces and write them as PNG files.
#[derive(Parser, Debug)]
#[command(name = "jigsaw")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input image path (PNG, JPEG, ...)
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory (defaults to `<input stem>_pieces`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Difficulty preset: easy, medium, hard or hell
    #[arg(short, long, default_value = "easy")]
    difficulty: Difficulty,

    /// Explicit row count (overrides the difficulty)
    #[arg(long, requires = "cols")]
    rows: Option<usize>,

    /// Explicit column count (overrides the difficulty)
    #[arg(long, requires = "rows")]
    cols: Option<usize>,

    /// Board viewport width in pixels
    #[arg(long, default_value_t = 800.0)]
    viewport_width: f64,

    /// Board viewport height in pixels
    #[arg(long, default_value_t = 600.0)]
    viewport_height: f64,

    /// Staging area width in pixels
    #[arg(long, default_value_t = 600.0)]
    staging_width: f64,

    /// Staging area height in pixels
    #[arg(long, default_value_t = 600.0)]
    staging_height: f64,

    /// Seed for a reproducible cut and scatter
    #[arg(long)]
    seed: Option<u64>,

    /// Drop every piece on its home position before writing the board
    #[arg(long)]
    solve: bool,

    /// Validate only, don't generate output
    #[arg(long)]
    validate: bool,

    /// Output debug information as JSON
    #[arg(long)]
    debug: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn grid(&self) -> GridSpec {
        match (self.rows, self.cols) {
            (Some(rows), Some(cols)) => GridSpec::new(rows, cols),
            _ => self.difficulty.grid(),
        }
    }

    fn screen(&self) -> ScreenLayout {
        ScreenLayout {
            board_area: Rect::new(
                self.staging_width,
                0.0,
                self.viewport_width,
                self.viewport_height,
            ),
            staging: Rect::new(0.0, 0.0, self.staging_width, self.staging_height),
        }
    }

    fn output_dir(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let stem = self
                .input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("puzzle");
            self.input.with_file_name(format!("{stem}_pieces"))
        })
    }
}

/// Piece entry of the debug dump.
#[derive(Debug, Serialize)]
struct PieceReport {
    index: usize,
    row: usize,
    col: usize,
    layout: EdgeLayout,
    home: Point,
    position: Point,
    state: PlacementState,
    width: u32,
    height: u32,
}

/// Session description written by `--debug`.
#[derive(Debug, Serialize)]
struct SessionReport<'a> {
    geometry: &'a BoardGeometry,
    pieces: Vec<PieceReport>,
}

impl<'a> SessionReport<'a> {
    fn new(session: &'a Session) -> Self {
        let pieces = session
            .pieces()
            .iter()
            .map(|p| PieceReport {
                index: p.index,
                row: p.row,
                col: p.col,
                layout: p.layout,
                home: p.home,
                position: p.position,
                state: p.state,
                width: p.bitmap().width(),
                height: p.bitmap().height(),
            })
            .collect();
        Self {
            geometry: session.geometry(),
            pieces,
        }
    }
}

/// One-line outcome of a layout check.
fn validation_summary(validation: &ValidationResult) -> String {
    format!(
        "Validation {}: {} warning(s), {} error(s)",
        if validation.passed { "passed" } else { "failed" },
        validation.warnings.len(),
        validation.errors.len()
    )
}

/// Decode an image file into straight RGBA pixels.
fn load_image(path: &Path) -> Result<SourceImage> {
    let decoded = image::open(path)
        .with_context(|| format!("Failed to decode {}", path.display()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    let image = SourceImage::from_rgba8(width, height, decoded.into_raw())?;
    Ok(image)
}

/// Drag every loose piece onto its home position through the controller.
fn solve(game: &mut PuzzleGame) -> Result<usize> {
    let board = game.board_rect().context("No game in progress")?;
    let count = game.session().map_or(0, |s| s.pieces().len());

    let mut snapped = 0;
    for index in 0..count {
        let (grab, target) = {
            let Some(piece) = game.session().and_then(|s| s.piece(index)) else {
                continue;
            };
            if piece.is_snapped() {
                continue;
            }
            (game.screen_position(piece), board.origin() + piece.home)
        };
        game.pointer_down(index, grab);
        game.pointer_move(target);
        match game.pointer_up() {
            Some(Release::Snapped { .. }) => snapped += 1,
            other => warn!(index, ?other, "Piece did not snap"),
        }
    }
    Ok(snapped)
}

/// Write piece, highlight and board PNGs. Returns the number of files.
fn write_outputs(session: &Session, dir: &Path) -> Result<usize> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut written = 0;
    for piece in session.pieces() {
        let path = dir.join(format!("piece_{:03}.png", piece.index));
        piece
            .bitmap()
            .save_png(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written += 1;
    }

    for region in session.overlay().regions() {
        let path = dir.join(format!("highlight_{:03}.png", region.index));
        region
            .bitmap()
            .save_png(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written += 1;
    }

    let path = dir.join("board.png");
    session
        .compose_board()?
        .save_png(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    written += 1;

    Ok(written)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Processing: {}", args.input.display());

    let image = load_image(&args.input)?;
    info!("Loaded {} x {} image", image.width(), image.height());

    let random: Box<dyn RandomSource> = match args.seed {
        Some(seed) => Box::new(SeededSource::seeded(seed)),
        None => Box::new(ThreadSource::new()),
    };
    let mut game = PuzzleGame::with_source(PuzzleConfig::default(), args.screen(), random);

    let grid = args.grid();
    game.start_game(Some(&image), grid)
        .with_context(|| format!("Failed to set up a {} x {} puzzle", grid.rows, grid.cols))?;
    let session = game.session().context("No game in progress")?;

    // Validate-only mode: setup already rejected broken layouts, this
    // prints the full report for the accepted cut.
    if args.validate {
        let validation = validate_layouts(session.grid(), session.layouts());
        for warning in &validation.warnings {
            warn!("{}", warning);
        }
        for err in &validation.errors {
            error!("{}", err);
        }
        info!("{}", validation_summary(&validation));
        return Ok(());
    }

    if args.solve {
        let snapped = solve(&mut game)?;
        info!("Snapped {} piece(s)", snapped);
        info!("{}", game.check_completion().message());
    }

    let session = game.session().context("No game in progress")?;

    // Debug output
    if args.debug {
        let json = serde_json::to_string_pretty(&SessionReport::new(session))?;
        println!("{}", json);
        return Ok(());
    }

    let dir = args.output_dir();
    let written = write_outputs(session, &dir)?;

    info!("Generated {} file(s) in {}", written, dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_test_png(dir: &Path) -> PathBuf {
        let path = dir.join("photo.png");
        let img = image::RgbaImage::from_fn(120, 90, |x, y| {
            image::Rgba([(x * 2) as u8, (y * 2) as u8, 128, 255])
        });
        img.save(&path).unwrap();
        path
    }

    fn screen() -> ScreenLayout {
        ScreenLayout {
            board_area: Rect::new(400.0, 0.0, 280.0, 220.0),
            staging: Rect::new(0.0, 0.0, 400.0, 400.0),
        }
    }

    #[test]
    fn test_args_grid_override() {
        let args = Args::parse_from(["jigsaw", "-i", "a.png", "--rows", "2", "--cols", "7"]);
        assert_eq!(args.grid(), GridSpec::new(2, 7));
        let args = Args::parse_from(["jigsaw", "-i", "a.png", "-d", "hard"]);
        assert_eq!(args.grid(), GridSpec::new(8, 8));
    }

    #[test]
    fn test_default_output_dir() {
        let args = Args::parse_from(["jigsaw", "-i", "shots/cat.jpg"]);
        assert_eq!(args.output_dir(), PathBuf::from("shots/cat_pieces"));
    }

    #[test]
    fn test_load_image_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let image = load_image(&write_test_png(dir.path())).unwrap();
        assert_eq!((image.width(), image.height()), (120, 90));
    }

    #[test]
    fn test_load_image_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_image(&dir.path().join("nope.png")).is_err());
    }

    #[test]
    fn test_write_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let image = load_image(&write_test_png(dir.path())).unwrap();
        let mut game = PuzzleGame::with_source(
            PuzzleConfig::default(),
            screen(),
            Box::new(SeededSource::seeded(3)),
        );
        game.start_game(Some(&image), GridSpec::new(2, 3)).unwrap();

        let out = dir.path().join("out");
        let written = write_outputs(game.session().unwrap(), &out).unwrap();
        assert_eq!(written, 6 + 6 + 1);
        assert!(out.join("piece_005.png").exists());
        assert!(out.join("highlight_000.png").exists());

        let board = image::open(out.join("board.png")).unwrap();
        // Image 120x90 fitted into 240x180 at scale 2
        assert_eq!((board.width(), board.height()), (240, 180));
    }

    #[test]
    fn test_solve_snaps_everything() {
        let dir = tempfile::tempdir().unwrap();
        let image = load_image(&write_test_png(dir.path())).unwrap();
        let mut game = PuzzleGame::with_source(
            PuzzleConfig::default(),
            screen(),
            Box::new(SeededSource::seeded(8)),
        );
        game.start_game(Some(&image), Difficulty::Easy.grid()).unwrap();
        assert_eq!(solve(&mut game).unwrap(), 9);
        assert!(game.check_completion().is_solved());
    }

    #[test]
    fn test_validation_summary() {
        let dir = tempfile::tempdir().unwrap();
        let image = load_image(&write_test_png(dir.path())).unwrap();
        let mut game = PuzzleGame::with_source(
            PuzzleConfig::default(),
            screen(),
            Box::new(SeededSource::seeded(2)),
        );
        game.start_game(Some(&image), GridSpec::new(3, 4)).unwrap();
        let session = game.session().unwrap();
        let validation = validate_layouts(session.grid(), session.layouts());
        assert_eq!(
            validation_summary(&validation),
            "Validation passed: 0 warning(s), 0 error(s)"
        );

        let mut broken = ValidationResult::clean();
        broken.add_error("Piece 0 (0, 0): outer Top edge is 1, expected 0");
        assert_eq!(
            validation_summary(&broken),
            "Validation failed: 0 warning(s), 1 error(s)"
        );
    }

    #[test]
    fn test_debug_report_serializes() {
        let dir = tempfile::tempdir().unwrap();
        let image = load_image(&write_test_png(dir.path())).unwrap();
        let mut game = PuzzleGame::with_source(
            PuzzleConfig::default(),
            screen(),
            Box::new(SeededSource::seeded(1)),
        );
        game.start_game(Some(&image), GridSpec::new(1, 1)).unwrap();
        let json = serde_json::to_value(SessionReport::new(game.session().unwrap())).unwrap();
        assert_eq!(json["pieces"][0]["layout"]["top"], 0);
        assert_eq!(json["pieces"][0]["state"], "Loose");
        assert_eq!(json["geometry"]["grid"]["rows"], 1);
    }
}
