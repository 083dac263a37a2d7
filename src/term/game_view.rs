//! GameView: maps `core::Game` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::Game;
use crate::term::fb::FrameBuffer;
use crate::types::{Rgb, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Board cell footprint in terminal glyphs. The original drew 30-unit canvas
/// squares; two glyphs wide compensates for the terminal glyph aspect ratio.
const CELL_W: u16 = 2;
const CELL_H: u16 = 1;

const BORDER_COLOR: Rgb = Rgb::new(200, 200, 200);
const TEXT_COLOR: Rgb = Rgb::new(255, 255, 255);

/// Projects the game state into a framebuffer every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct GameView;

impl GameView {
    /// Render the current game state into a framebuffer.
    pub fn render(&self, game: &Game, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear();

        let field_w = BOARD_WIDTH as u16 * CELL_W;
        let field_h = BOARD_HEIGHT as u16 * CELL_H;

        // Board cells. Every cell carries its own color, so active, settled
        // and empty cells all render the same way.
        for row in 0..BOARD_HEIGHT {
            for col in 0..BOARD_WIDTH {
                let cell = game.board().cell(row, col);
                fb.fill_block(
                    1 + col as u16 * CELL_W,
                    1 + row as u16 * CELL_H,
                    CELL_W,
                    cell.color,
                );
            }
        }

        self.draw_border(&mut fb, 0, 0, field_w + 2, field_h + 2);
        self.draw_side_panel(&mut fb, game, field_w + 4);

        if game.is_over() {
            let x = 1 + field_w.saturating_sub(9) / 2;
            fb.put_str(x, 1 + field_h / 2, "GAME OVER", TEXT_COLOR);
        }

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_str(x, y, "┌", BORDER_COLOR);
        fb.put_str(x + w - 1, y, "┐", BORDER_COLOR);
        fb.put_str(x, y + h - 1, "└", BORDER_COLOR);
        fb.put_str(x + w - 1, y + h - 1, "┘", BORDER_COLOR);

        for dx in 1..w - 1 {
            fb.put_str(x + dx, y, "─", BORDER_COLOR);
            fb.put_str(x + dx, y + h - 1, "─", BORDER_COLOR);
        }
        for dy in 1..h - 1 {
            fb.put_str(x, y + dy, "│", BORDER_COLOR);
            fb.put_str(x + w - 1, y + dy, "│", BORDER_COLOR);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, game: &Game, panel_x: u16) {
        if panel_x >= fb.width() {
            return;
        }

        fb.put_str(panel_x, 1, "TETRIS", TEXT_COLOR);

        fb.put_str(panel_x, 3, &format!("Score: {}", game.score()), TEXT_COLOR);
        fb.put_str(panel_x, 4, &format!("Lines: {}", game.lines()), TEXT_COLOR);

        fb.put_str(panel_x, 6, "Next Piece", TEXT_COLOR);
        if let Some(next) = game.next_piece() {
            for (row, col) in next.grid.cell_offsets() {
                fb.fill_block(
                    panel_x + col as u16 * CELL_W,
                    8 + row as u16 * CELL_H,
                    CELL_W,
                    next.color,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EMPTY_CELL_COLOR;

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        (0..fb.width())
            .map(|x| fb.get(x, y).map(|g| g.ch).unwrap_or(' '))
            .collect()
    }

    #[test]
    fn renders_board_cells_with_their_colors() {
        let game = Game::new(1);
        let fb = GameView.render(&game, Viewport::new(60, 24));

        // The falling piece's cells carry its color; the rest of the field
        // is background.
        let piece = game.active_piece().unwrap();
        let mut piece_glyphs = 0;
        let mut empty_glyphs = 0;
        for y in 1..=BOARD_HEIGHT as u16 {
            for x in 1..=(BOARD_WIDTH as u16 * CELL_W) {
                match fb.get(x, y).unwrap().bg {
                    bg if bg == piece.color => piece_glyphs += 1,
                    bg if bg == EMPTY_CELL_COLOR => empty_glyphs += 1,
                    _ => {}
                }
            }
        }
        assert_eq!(piece_glyphs, 4 * CELL_W as usize);
        assert_eq!(
            empty_glyphs,
            BOARD_WIDTH * BOARD_HEIGHT * CELL_W as usize - 4 * CELL_W as usize
        );
    }

    #[test]
    fn side_panel_shows_score_and_lines() {
        let game = Game::new(1);
        let fb = GameView.render(&game, Viewport::new(60, 24));

        assert!(row_text(&fb, 3).contains("Score: 0"));
        assert!(row_text(&fb, 4).contains("Lines: 0"));
        assert!(row_text(&fb, 6).contains("Next Piece"));
    }

    #[test]
    fn preview_draws_the_lookahead_color() {
        let game = Game::new(1);
        let fb = GameView.render(&game, Viewport::new(60, 24));

        let next = game.next_piece().unwrap();
        let found = (0..fb.height())
            .any(|y| (0..fb.width()).any(|x| fb.get(x, y).unwrap().bg == next.color));
        assert!(found);
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let game = Game::new(1);
        let _ = GameView.render(&game, Viewport::new(5, 3));
    }
}
