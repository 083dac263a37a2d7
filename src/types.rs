//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// Game step timing (in milliseconds)
///
/// The game advances a few times per second; holding the fast-fall key raises
/// the step rate for as long as the grace window keeps getting refreshed.
pub const STEP_MS: u32 = 333;
pub const FAST_STEP_MS: u32 = 50;
pub const FAST_FALL_GRACE_MS: u32 = 200;

/// Score deltas (fixed at compile time)
pub const SPAWN_SCORE: u32 = 10;
pub const LINE_CLEAR_SCORE: u32 = 100;

/// Column a spawn falls back to when the template would overflow the right edge
pub const FALLBACK_SPAWN_COL: i32 = 5;

/// 24-bit RGB color carried by every board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Background color of an empty board cell
pub const EMPTY_CELL_COLOR: Rgb = Rgb::new(30, 30, 30);

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All seven kinds, in draw-table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Lateral move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Game actions produced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    Rotate,
    FastFall,
}
