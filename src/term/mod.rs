//! Terminal rendering layer: a colored-glyph framebuffer, a crossterm-backed
//! renderer, and the pure view that projects game state into frames.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{FrameBuffer, Glyph};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
