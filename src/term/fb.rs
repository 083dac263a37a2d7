//! Framebuffer for terminal rendering.
//!
//! Each glyph carries a character plus foreground/background RGB. The view
//! layer paints into this buffer and the renderer diffs it against the
//! previously flushed frame.

use crate::types::Rgb;

/// A single terminal glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
        }
    }
}

/// 2D framebuffer of colored glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            glyphs: vec![Glyph::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Glyph> {
        self.idx(x, y).map(|i| self.glyphs[i])
    }

    /// Writes outside the buffer are dropped.
    pub fn set(&mut self, x: u16, y: u16, glyph: Glyph) {
        if let Some(i) = self.idx(x, y) {
            self.glyphs[i] = glyph;
        }
    }

    pub fn clear(&mut self) {
        self.glyphs.fill(Glyph::default());
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, fg: Rgb) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(
                cx,
                y,
                Glyph {
                    ch,
                    fg,
                    bg: Rgb::new(0, 0, 0),
                },
            );
            cx += 1;
        }
    }

    /// Paint a solid block of `width` glyphs in the given background color.
    pub fn fill_block(&mut self, x: u16, y: u16, width: u16, bg: Rgb) {
        for dx in 0..width {
            self.set(
                x.saturating_add(dx),
                y,
                Glyph {
                    ch: ' ',
                    fg: bg,
                    bg,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut fb = FrameBuffer::new(4, 4);
        fb.set(10, 10, Glyph::default());
        assert_eq!(fb.get(10, 10), None);
    }

    #[test]
    fn fill_block_paints_background() {
        let mut fb = FrameBuffer::new(8, 2);
        let red = Rgb::new(255, 0, 0);
        fb.fill_block(2, 1, 3, red);

        assert_eq!(fb.get(2, 1).unwrap().bg, red);
        assert_eq!(fb.get(4, 1).unwrap().bg, red);
        assert_eq!(fb.get(5, 1).unwrap().bg, Rgb::new(0, 0, 0));
    }

    #[test]
    fn put_str_clips_at_the_right_edge() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(2, 0, "SCORE", Rgb::new(255, 255, 255));
        assert_eq!(fb.get(2, 0).unwrap().ch, 'S');
        assert_eq!(fb.get(3, 0).unwrap().ch, 'C');
    }
}
