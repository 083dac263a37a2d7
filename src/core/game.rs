//! Game module - the board/piece state machine
//!
//! Owns the grid and the currently falling piece, advances one discrete step
//! per tick, and answers move/rotate requests with a "did the board change"
//! bool. All operations are total: illegal requests change nothing and return
//! false, a blocked spawn marks the game over instead of failing.
//!
//! The tick orchestration has three states: Falling (gravity, then spawn or
//! clear detection), Clearing (one pending row collapses per cycle) and Over
//! (no further mutation). A multi-row clear therefore resolves serially, one
//! row per two ticks, not atomically.

use crate::core::board::{Board, Cell};
use crate::core::rng::SimpleRng;
use crate::core::shapes::{color, template, ShapeGrid};
use crate::types::{
    Direction, PieceKind, Rgb, BOARD_HEIGHT, BOARD_WIDTH, FALLBACK_SPAWN_COL, LINE_CLEAR_SCORE,
    SPAWN_SCORE,
};

/// The currently falling piece: a (possibly rotated) occupancy grid plus its
/// anchor on the board. The anchor is signed because a rotated shape whose
/// filled cells sit right of the matrix edge can legally anchor past the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub grid: ShapeGrid,
    pub color: Rgb,
    pub origin_col: i32,
    pub origin_row: i32,
}

/// The lookahead piece, chosen ahead of time for the preview pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextPiece {
    pub kind: PieceKind,
    pub grid: ShapeGrid,
    pub color: Rgb,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    active: Option<ActivePiece>,
    next: Option<NextPiece>,
    needs_new_piece: bool,
    score: u32,
    lines: u32,
    game_over: bool,
    clear_pause: bool,
    /// Row blanked by the sweep, waiting for its collapse.
    pending_row: Option<usize>,
    rng: SimpleRng,
}

impl Game {
    /// Create a new game: empty board, first piece spawned, score zeroed.
    pub fn new(seed: u32) -> Self {
        let mut game = Self {
            board: Board::new(),
            active: None,
            next: None,
            needs_new_piece: true,
            score: 0,
            lines: 0,
            game_over: false,
            clear_pause: false,
            pending_row: None,
            rng: SimpleRng::new(seed),
        };
        game.spawn_next_piece();
        // The opening spawn does not count toward the score.
        game.score = 0;
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// True exactly while a completed row is being collapsed.
    pub fn is_clear_paused(&self) -> bool {
        self.clear_pause
    }

    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    /// Lookahead for the preview pane. Always present after construction.
    pub fn next_piece(&self) -> Option<&NextPiece> {
        self.next.as_ref()
    }

    /// Advance exactly one game step. Idempotent no-op once the game is over.
    pub fn tick(&mut self) {
        if self.game_over {
            return;
        }

        if self.clear_pause {
            // Re-check guards against a stale pause; the pending row then
            // collapses, returning to Falling. Spawning waits for the next
            // tick's needs-new-piece path.
            self.sweep_completed_row();
            if self.clear_pause {
                self.collapse_cleared_row();
            }
            return;
        }

        self.advance_gravity();
        if self.needs_new_piece {
            self.sweep_completed_row();
            if !self.clear_pause {
                self.spawn_next_piece();
            }
        }
    }

    /// One row of gravity, all-or-nothing.
    ///
    /// Every falling cell is validated one row below on the staged board; if
    /// all pass the staged result is committed and the anchor drops, otherwise
    /// the piece lands where it is and a new piece is requested.
    fn advance_gravity(&mut self) {
        let Some(active) = self.active else {
            return;
        };

        let mut staged = self.board.stage_without_active();
        let mut all_legal = true;
        for (row, col) in self.board.active_cells() {
            if staged.placement_legal(col, row + 1) {
                staged.set(row + 1, col, self.board.cell(row, col));
            } else {
                all_legal = false;
            }
        }

        if all_legal {
            self.board = staged;
            self.active = Some(ActivePiece {
                origin_row: active.origin_row + 1,
                ..active
            });
        } else {
            self.board.deactivate_all();
            self.active = None;
            self.needs_new_piece = true;
        }
    }

    /// Find the lowest fully occupied row, blank it and flag the pause.
    ///
    /// At most one row per invocation. Idempotent: a pending row keeps its
    /// state until the collapse consumes it.
    fn sweep_completed_row(&mut self) {
        if self.pending_row.is_some() {
            return;
        }

        for row in (0..BOARD_HEIGHT).rev() {
            if self.board.is_row_full(row) {
                self.board.blank_row(row);
                self.pending_row = Some(row);
                self.clear_pause = true;
                return;
            }
        }

        self.clear_pause = false;
        self.pending_row = None;
    }

    /// Collapse everything above the pending row and score the clear.
    fn collapse_cleared_row(&mut self) {
        let Some(row) = self.pending_row.take() else {
            return;
        };
        self.board.collapse_above(row);
        self.score += LINE_CLEAR_SCORE;
        self.lines += 1;
        self.clear_pause = false;
    }

    /// Promote the lookahead to the falling piece (drawing a fresh lookahead)
    /// and place it at a pseudo-random column along the top.
    fn spawn_next_piece(&mut self) {
        let piece = match self.next.take() {
            Some(next) => next,
            None => self.draw_piece(),
        };
        self.next = Some(self.draw_piece());

        let start_col = {
            let raw = self.rng.next_range(BOARD_WIDTH as u32) as i32 - 2;
            clamp_spawn_column(raw, piece.grid.size())
        };
        self.place_piece(piece, start_col);
        self.score += SPAWN_SCORE;
    }

    fn draw_piece(&mut self) -> NextPiece {
        let kind = self.rng.next_kind();
        NextPiece {
            kind,
            grid: template(kind),
            color: color(kind),
        }
    }

    /// Write a piece's cells onto the board from the top row down.
    ///
    /// Spawning over a settled cell loses the game; placement continues
    /// regardless so the overlap still renders.
    fn place_piece(&mut self, piece: NextPiece, start_col: i32) {
        for (row, col) in piece.grid.cell_offsets() {
            let board_col = (start_col + col as i32) as usize;
            if self.board.cell(row, board_col).occupied {
                self.game_over = true;
            }
            self.board.set(row, board_col, Cell::falling(piece.color));
        }

        self.active = Some(ActivePiece {
            grid: piece.grid,
            color: piece.color,
            origin_col: start_col,
            origin_row: 0,
        });
        self.needs_new_piece = false;
    }

    /// Try to shift the falling piece one column. Returns whether the board
    /// changed (callers use this to decide on a redraw).
    pub fn request_move(&mut self, direction: Direction) -> bool {
        if self.game_over || self.clear_pause {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let mut staged = self.board.stage_without_active();
        let legal = match direction {
            Direction::Left => self.shift_left(&mut staged),
            Direction::Right => self.shift_right(&mut staged),
        };
        if !legal {
            return false;
        }

        self.board = staged;
        let delta = match direction {
            Direction::Left => -1,
            Direction::Right => 1,
        };
        self.active = Some(ActivePiece {
            origin_col: active.origin_col + delta,
            ..active
        });
        true
    }

    /// Stage a left shift. Scans left-to-right so a cell's own trailing
    /// neighbor (still active on the live board) never blocks it.
    fn shift_left(&self, staged: &mut Board) -> bool {
        let mut all_legal = true;
        for row in 0..BOARD_HEIGHT {
            for col in 0..BOARD_WIDTH {
                let cell = self.board.cell(row, col);
                if !cell.active {
                    continue;
                }
                let clear = col >= 1 && {
                    let adjacent = self.board.cell(row, col - 1);
                    adjacent.active || !adjacent.occupied
                };
                if clear {
                    staged.set(row, col - 1, cell);
                } else {
                    all_legal = false;
                }
            }
        }
        all_legal
    }

    /// Stage a right shift; mirror of `shift_left` with a right-to-left scan.
    fn shift_right(&self, staged: &mut Board) -> bool {
        let mut all_legal = true;
        for row in 0..BOARD_HEIGHT {
            for col in (0..BOARD_WIDTH).rev() {
                let cell = self.board.cell(row, col);
                if !cell.active {
                    continue;
                }
                let clear = col + 1 < BOARD_WIDTH && {
                    let adjacent = self.board.cell(row, col + 1);
                    adjacent.active || !adjacent.occupied
                };
                if clear {
                    staged.set(row, col + 1, cell);
                } else {
                    all_legal = false;
                }
            }
        }
        all_legal
    }

    /// Try to rotate the falling piece 90 degrees clockwise in place.
    ///
    /// The rotation is computed on a scratch grid and validated cell by cell
    /// at the current anchor (no wall kicks): every post-rotation cell must be
    /// in bounds on both axes and unoccupied on the staged board. On success
    /// the piece is repainted onto the staged board, which replaces the live
    /// one; on failure nothing changes.
    pub fn request_rotate(&mut self) -> bool {
        if self.game_over || self.clear_pause {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.grid.rotated_cw();
        let mut staged = self.board.stage_without_active();

        for (row, col) in rotated.cell_offsets() {
            let board_row = active.origin_row + row as i32;
            let board_col = active.origin_col + col as i32;
            let in_bounds = (0..BOARD_WIDTH as i32).contains(&board_col)
                && (0..BOARD_HEIGHT as i32).contains(&board_row);
            if !in_bounds || staged.cell(board_row as usize, board_col as usize).occupied {
                return false;
            }
        }

        for (row, col) in rotated.cell_offsets() {
            let board_row = (active.origin_row + row as i32) as usize;
            let board_col = (active.origin_col + col as i32) as usize;
            staged.set(board_row, board_col, Cell::falling(active.color));
        }
        self.board = staged;
        self.active = Some(ActivePiece {
            grid: rotated,
            ..active
        });
        true
    }
}

/// Clamp a raw spawn-column offset (roughly [-2, W-2)) into a playable start:
/// a template that would overflow the right edge is forced to the fallback
/// column, then anything negative lands on the left wall, in that order.
fn clamp_spawn_column(raw: i32, template_size: usize) -> i32 {
    let mut col = raw;
    if col + template_size as i32 >= BOARD_WIDTH as i32 {
        col = FALLBACK_SPAWN_COL;
    }
    if col < 0 {
        col = 0;
    }
    col
}
