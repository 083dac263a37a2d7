//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Enters raw mode plus the alternate screen on `enter` and restores both on
//! `exit`. Frames are diffed against the previously flushed buffer so only
//! changed runs of glyphs are rewritten.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::term::fb::FrameBuffer;
use crate::types::Rgb;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize event).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Flush a frame, rewriting only glyph runs that changed since last time.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        let full = match &self.last {
            Some(prev) => prev.width() != fb.width() || prev.height() != fb.height(),
            None => true,
        };

        if full {
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let mut fg: Option<Rgb> = None;
        let mut bg: Option<Rgb> = None;
        for y in 0..fb.height() {
            let mut x = 0;
            while x < fb.width() {
                let glyph = fb.get(x, y).unwrap_or_default();
                let unchanged = !full
                    && self
                        .last
                        .as_ref()
                        .and_then(|prev| prev.get(x, y))
                        .map_or(false, |prev| prev == glyph);
                if unchanged {
                    x += 1;
                    continue;
                }

                self.stdout.queue(cursor::MoveTo(x, y))?;
                if fg != Some(glyph.fg) {
                    self.stdout.queue(SetForegroundColor(to_color(glyph.fg)))?;
                    fg = Some(glyph.fg);
                }
                if bg != Some(glyph.bg) {
                    self.stdout.queue(SetBackgroundColor(to_color(glyph.bg)))?;
                    bg = Some(glyph.bg);
                }
                self.stdout.queue(Print(glyph.ch))?;
                x += 1;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        self.last = Some(fb.clone());
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_converts_to_crossterm_color() {
        let rgb = Rgb::new(30, 30, 30);
        assert_eq!(to_color(rgb), Color::Rgb { r: 30, g: 30, b: 30 });
    }
}
