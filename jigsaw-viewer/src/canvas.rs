//! Painting the staging area and the board.

use egui::{
    pos2, Align2, Color32, ColorImage, Context, FontId, Painter, Pos2, Rect, Stroke,
    TextureHandle, TextureOptions, Vec2,
};
use jigsaw_core::{Pixmap, Point, PuzzleGame, ScreenLayout, Session};

use crate::theme;

pub fn to_point(pos: Pos2) -> Point {
    Point::new(pos.x as f64, pos.y as f64)
}

pub fn to_pos(point: Point) -> Pos2 {
    pos2(point.x as f32, point.y as f32)
}

fn to_core_rect(rect: Rect) -> jigsaw_core::Rect {
    jigsaw_core::Rect::new(
        rect.min.x as f64,
        rect.min.y as f64,
        rect.width() as f64,
        rect.height() as f64,
    )
}

/// Split the canvas into a staging area on the left and a board area on the right.
pub fn split_canvas(canvas: Rect) -> (Rect, Rect) {
    let staging_width = (canvas.width() * theme::STAGING_SHARE).floor();
    let staging = Rect::from_min_size(canvas.min, Vec2::new(staging_width, canvas.height()));
    let board_area = Rect::from_min_max(
        pos2(staging.max.x + theme::AREA_GAP, canvas.min.y),
        canvas.max,
    );
    (staging, board_area)
}

/// Screen geometry reported to the game.
pub fn screen_layout(staging: Rect, board_area: Rect) -> ScreenLayout {
    ScreenLayout {
        board_area: to_core_rect(board_area),
        staging: to_core_rect(staging),
    }
}

fn color_image(pixmap: &Pixmap) -> ColorImage {
    // tiny-skia stores premultiplied RGBA, same as egui expects here.
    ColorImage::from_rgba_premultiplied(
        [pixmap.width() as usize, pixmap.height() as usize],
        pixmap.data(),
    )
}

/// GPU copies of one session's bitmaps.
pub struct SessionTextures {
    hint: TextureHandle,
    pieces: Vec<TextureHandle>,
    highlights: Vec<TextureHandle>,
}

impl SessionTextures {
    /// Upload every bitmap of `session`.
    pub fn upload(ctx: &Context, session: &Session) -> Self {
        let options = TextureOptions::LINEAR;
        let hint = ctx.load_texture("hint", color_image(session.hint()), options);
        let pieces = session
            .pieces()
            .iter()
            .map(|p| {
                ctx.load_texture(format!("piece_{}", p.index), color_image(p.bitmap()), options)
            })
            .collect();
        let highlights = session
            .overlay()
            .regions()
            .iter()
            .map(|r| {
                let name = format!("highlight_{}", r.index);
                ctx.load_texture(name, color_image(r.bitmap()), options)
            })
            .collect();

        tracing::info!("Uploaded {} piece textures", session.pieces().len());

        Self {
            hint,
            pieces,
            highlights,
        }
    }
}

fn paint_texture(painter: &Painter, texture: &TextureHandle, min: Pos2) {
    let rect = Rect::from_min_size(min, texture.size_vec2());
    let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
    painter.image(texture.id(), rect, uv, Color32::WHITE);
}

/// Paint the table: staging, board with hint, snapped pieces, the active
/// highlight, then loose pieces from bottom to top of the stack.
pub fn render_table(
    painter: &Painter,
    game: &PuzzleGame,
    textures: Option<&SessionTextures>,
    staging: Rect,
) {
    painter.rect_filled(staging, 4.0, theme::STAGING_FILL);
    painter.rect_stroke(staging, 4.0, Stroke::new(1.0, theme::STAGING_BORDER));

    let (Some(session), Some(textures), Some(board)) =
        (game.session(), textures, game.board_rect())
    else {
        return;
    };

    let board_min = to_pos(board.origin());
    let board_size = Vec2::new(board.width as f32, board.height as f32);
    let board_rect = Rect::from_min_size(board_min, board_size);
    painter.rect_filled(board_rect, 0.0, theme::BOARD_FILL);
    paint_texture(painter, &textures.hint, board_min);

    let stack = session.pieces_by_stack();
    for piece in stack.iter().filter(|p| p.is_snapped()) {
        if let Some(texture) = textures.pieces.get(piece.index) {
            paint_texture(painter, texture, to_pos(game.screen_position(piece)));
        }
    }

    let border = if session.is_solved() {
        theme::BOARD_BORDER_SOLVED
    } else {
        theme::BOARD_BORDER
    };
    painter.rect_stroke(board_rect, 0.0, Stroke::new(2.0, border));

    if let Some(region) = session.overlay().active_region() {
        if let Some(texture) = textures.highlights.get(region.index) {
            paint_texture(painter, texture, to_pos(board.origin() + region.origin));
        }
    }

    for piece in stack.iter().filter(|p| p.is_loose()) {
        if let Some(texture) = textures.pieces.get(piece.index) {
            paint_texture(painter, texture, to_pos(game.screen_position(piece)));
        }
    }
}

/// Paint a message centered at the bottom of `canvas`.
pub fn render_toast(painter: &Painter, canvas: Rect, message: &str, solved: bool) {
    let color = if solved {
        theme::TOAST_SOLVED_TEXT
    } else {
        theme::TOAST_TEXT
    };
    let anchor = pos2(canvas.center().x, canvas.max.y - theme::TOAST_MARGIN);
    let galley = painter.layout_no_wrap(message.to_string(), FontId::proportional(20.0), color);
    let text_rect = Align2::CENTER_BOTTOM.anchor_size(anchor, galley.size());
    painter.rect_filled(text_rect.expand(10.0), theme::TOAST_ROUNDING, theme::TOAST_BG);
    painter.galley(text_rect.min, galley, color);
}
