//! Board module - manages the game grid
//!
//! The board is a 10x20 grid of colored cells indexed [row][col], row 0 at top.
//! Each cell knows whether it is occupied and whether it belongs to the
//! currently falling piece. Mutations that need validation go through a staged
//! copy of the board with the falling piece erased, so legality checks are
//! side-effect-free and a piece never collides with itself.

use arrayvec::ArrayVec;

use crate::types::{Rgb, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_CELL_COLOR};

/// A single grid position.
///
/// Invariant: `active` implies `occupied`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub color: Rgb,
    pub occupied: bool,
    pub active: bool,
}

impl Cell {
    /// The empty cell: background color, unoccupied.
    pub const EMPTY: Cell = Cell {
        color: EMPTY_CELL_COLOR,
        occupied: false,
        active: false,
    };

    /// A cell belonging to the falling piece.
    pub const fn falling(color: Rgb) -> Self {
        Cell {
            color,
            occupied: true,
            active: true,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::EMPTY
    }
}

/// Coordinates of the falling piece's cells; a piece never has more than four.
pub type ActiveCells = ArrayVec<(usize, usize), 4>;

/// The game board - 10 columns x 20 rows of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            rows: [[Cell::EMPTY; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    /// Cell at (row, col). Out-of-range indices are a programming error.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.rows[row][col]
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.rows[row][col] = cell;
    }

    /// Whether a cell may move into (col, row).
    ///
    /// False iff the row is past the bottom boundary or the target is occupied
    /// by a settled cell. A target that holds part of the falling piece is
    /// legal (self-overlap during staging). Columns are not checked here; the
    /// lateral-move and rotation paths bound-check columns themselves.
    pub fn placement_legal(&self, col: usize, row: usize) -> bool {
        if row >= BOARD_HEIGHT {
            return false;
        }
        let cell = self.rows[row][col];
        cell.active || !cell.occupied
    }

    /// Deep copy of the board with every falling-piece cell erased.
    ///
    /// Every legality check in the game runs against this staged copy.
    pub fn stage_without_active(&self) -> Board {
        let mut staged = self.clone();
        for row in staged.rows.iter_mut() {
            for cell in row.iter_mut() {
                if cell.active {
                    *cell = Cell::EMPTY;
                }
            }
        }
        staged
    }

    /// Coordinates of all falling-piece cells, row-major order.
    pub fn active_cells(&self) -> ActiveCells {
        let mut cells = ActiveCells::new();
        for (y, row) in self.rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if cell.active {
                    cells.push((y, x));
                }
            }
        }
        cells
    }

    /// Settle the falling piece: its cells stay put but stop being active.
    pub fn deactivate_all(&mut self) {
        for row in self.rows.iter_mut() {
            for cell in row.iter_mut() {
                cell.active = false;
            }
        }
    }

    /// Whether every column of a row is occupied
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows[row].iter().all(|cell| cell.occupied)
    }

    /// Overwrite a row with empty cells
    pub fn blank_row(&mut self, row: usize) {
        self.rows[row] = [Cell::EMPTY; BOARD_WIDTH];
    }

    /// Shift every row above `row` down by one, leaving row 0 empty.
    pub fn collapse_above(&mut self, row: usize) {
        for y in (1..=row).rev() {
            self.rows[y] = self.rows[y - 1];
        }
        self.rows[0] = [Cell::EMPTY; BOARD_WIDTH];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled() -> Cell {
        Cell {
            color: Rgb::new(200, 40, 40),
            occupied: true,
            active: false,
        }
    }

    #[test]
    fn empty_board_placement_is_legal() {
        let board = Board::new();
        assert!(board.placement_legal(0, 0));
        assert!(board.placement_legal(9, 19));
    }

    #[test]
    fn placement_below_bottom_is_illegal() {
        let board = Board::new();
        assert!(!board.placement_legal(4, BOARD_HEIGHT));
    }

    #[test]
    fn placement_onto_settled_cell_is_illegal() {
        let mut board = Board::new();
        board.set(10, 3, settled());
        assert!(!board.placement_legal(3, 10));
    }

    #[test]
    fn placement_onto_active_cell_is_legal() {
        let mut board = Board::new();
        board.set(10, 3, Cell::falling(Rgb::new(0, 255, 255)));
        assert!(board.placement_legal(3, 10));
    }

    #[test]
    fn staging_erases_only_active_cells() {
        let mut board = Board::new();
        board.set(5, 2, Cell::falling(Rgb::new(0, 255, 255)));
        board.set(18, 7, settled());

        let staged = board.stage_without_active();
        assert_eq!(staged.cell(5, 2), Cell::EMPTY);
        assert_eq!(staged.cell(18, 7), settled());
        // Staging never mutates the live board.
        assert!(board.cell(5, 2).active);
    }

    #[test]
    fn active_cells_reports_all_falling_cells() {
        let mut board = Board::new();
        board.set(0, 4, Cell::falling(Rgb::new(255, 255, 0)));
        board.set(0, 5, Cell::falling(Rgb::new(255, 255, 0)));
        board.set(1, 4, Cell::falling(Rgb::new(255, 255, 0)));
        board.set(1, 5, Cell::falling(Rgb::new(255, 255, 0)));

        let cells = board.active_cells();
        assert_eq!(cells.len(), 4);
        assert!(cells.contains(&(0, 4)));
        assert!(cells.contains(&(1, 5)));
    }

    #[test]
    fn deactivate_keeps_cells_occupied() {
        let mut board = Board::new();
        board.set(19, 0, Cell::falling(Rgb::new(0, 0, 255)));
        board.deactivate_all();

        let cell = board.cell(19, 0);
        assert!(cell.occupied);
        assert!(!cell.active);
    }

    #[test]
    fn row_full_detection() {
        let mut board = Board::new();
        for col in 0..BOARD_WIDTH - 1 {
            board.set(19, col, settled());
        }
        assert!(!board.is_row_full(19));

        board.set(19, BOARD_WIDTH - 1, settled());
        assert!(board.is_row_full(19));
    }

    #[test]
    fn collapse_shifts_rows_down_and_empties_top() {
        let mut board = Board::new();
        board.set(0, 1, settled());
        board.set(17, 6, settled());

        board.collapse_above(18);

        assert_eq!(board.cell(0, 1), Cell::EMPTY);
        assert!(board.cell(1, 1).occupied);
        assert!(board.cell(18, 6).occupied);
        assert_eq!(board.cell(17, 6), Cell::EMPTY);
        for col in 0..BOARD_WIDTH {
            assert_eq!(board.cell(0, col), Cell::EMPTY);
        }
    }
}
