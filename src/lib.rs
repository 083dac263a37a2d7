//! Blockfall: a terminal falling-block puzzle game.
//!
//! `core` is the pure state machine (board, pieces, gravity, line clears,
//! scoring); `term` projects it onto the terminal and `input` translates key
//! events into game actions. The binary wires them together in a fixed-step
//! loop.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
