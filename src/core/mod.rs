//! Core module - pure game logic with no external dependencies
//!
//! This module contains the board, piece shapes, RNG and the game state
//! machine. It has zero dependencies on UI, input, or I/O.

pub mod board;
pub mod game;
pub mod rng;
pub mod shapes;

// Re-export commonly used types
pub use board::{Board, Cell};
pub use game::{ActivePiece, Game, NextPiece};
pub use rng::SimpleRng;
pub use shapes::ShapeGrid;
