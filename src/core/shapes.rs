//! Shapes module - tetromino templates and matrix rotation
//!
//! Each of the seven kinds is an immutable NxN binary occupancy grid plus an
//! RGB color. Grid sizes are shape-dependent (I is 4x4, O is 2x2, the rest
//! 3x3); rotation is a 90-degree clockwise ring swap over the whole matrix,
//! so a piece's footprint inside its grid shifts rather than re-centering.

use crate::types::{PieceKind, Rgb};

/// An NxN binary occupancy matrix. Backed by a fixed 4x4 array; only the
/// leading `n` rows and columns are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeGrid {
    n: usize,
    cells: [[bool; 4]; 4],
}

impl ShapeGrid {
    /// Matrix side length (2, 3 or 4).
    pub fn size(&self) -> usize {
        self.n
    }

    /// Whether the matrix cell at (row, col) is part of the piece.
    pub fn filled(&self, row: usize, col: usize) -> bool {
        row < self.n && col < self.n && self.cells[row][col]
    }

    /// (row, col) offsets of every filled cell, top-to-bottom.
    pub fn cell_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.n)
            .flat_map(move |row| (0..self.n).map(move |col| (row, col)))
            .filter(|&(row, col)| self.cells[row][col])
    }

    /// 90-degree clockwise rotation via in-place four-way element swap,
    /// computed on a scratch copy so the original is untouched.
    pub fn rotated_cw(&self) -> ShapeGrid {
        let mut out = *self;
        let n = self.n;
        for x in 0..n / 2 {
            for y in x..n - x - 1 {
                let temp = out.cells[x][y];
                out.cells[x][y] = out.cells[n - 1 - y][x];
                out.cells[n - 1 - y][x] = out.cells[n - 1 - x][n - 1 - y];
                out.cells[n - 1 - x][n - 1 - y] = out.cells[y][n - 1 - x];
                out.cells[y][n - 1 - x] = temp;
            }
        }
        out
    }

    const fn from_rows(n: usize, rows: [[u8; 4]; 4]) -> Self {
        let mut cells = [[false; 4]; 4];
        let mut r = 0;
        while r < 4 {
            let mut c = 0;
            while c < 4 {
                cells[r][c] = rows[r][c] == 1;
                c += 1;
            }
            r += 1;
        }
        Self { n, cells }
    }
}

/// Spawn template for a piece kind
pub fn template(kind: PieceKind) -> ShapeGrid {
    match kind {
        PieceKind::I => ShapeGrid::from_rows(
            4,
            [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
        PieceKind::J => ShapeGrid::from_rows(
            3,
            [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
        PieceKind::L => ShapeGrid::from_rows(
            3,
            [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
        PieceKind::O => ShapeGrid::from_rows(
            2,
            [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
        PieceKind::S => ShapeGrid::from_rows(
            3,
            [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
        PieceKind::T => ShapeGrid::from_rows(
            3,
            [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
        PieceKind::Z => ShapeGrid::from_rows(
            3,
            [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        ),
    }
}

/// Fill color for a piece kind
pub fn color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(0, 255, 255),
        PieceKind::J => Rgb::new(0, 0, 255),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(255, 255, 0),
        PieceKind::S => Rgb::new(0, 255, 0),
        PieceKind::T => Rgb::new(128, 0, 128),
        PieceKind::Z => Rgb::new(255, 0, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(template(kind).cell_offsets().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn rotation_preserves_cell_count() {
        for kind in PieceKind::ALL {
            let rotated = template(kind).rotated_cw();
            assert_eq!(rotated.cell_offsets().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn o_piece_rotation_is_identity() {
        let o = template(PieceKind::O);
        assert_eq!(o.rotated_cw(), o);
    }

    #[test]
    fn i_piece_rotates_to_vertical() {
        let rotated = template(PieceKind::I).rotated_cw();
        // Horizontal row 1 becomes vertical column 2.
        let offsets: Vec<_> = rotated.cell_offsets().collect();
        assert_eq!(offsets, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let start = template(kind);
            let back = start.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(back, start, "{:?}", kind);
        }
    }

    #[test]
    fn rotation_leaves_source_untouched() {
        let t = template(PieceKind::T);
        let _ = t.rotated_cw();
        assert_eq!(t, template(PieceKind::T));
    }

    #[test]
    fn t_piece_rotates_clockwise() {
        let rotated = template(PieceKind::T).rotated_cw();
        // Pointing up becomes pointing right.
        let offsets: Vec<_> = rotated.cell_offsets().collect();
        assert_eq!(offsets, vec![(0, 1), (1, 1), (1, 2), (2, 1)]);
    }
}
