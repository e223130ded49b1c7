//! Rendering primitives: cells, frames, the style layer, and search highlight
//! projection.
//!
//! A `Frame` is a grid of `Cell`s, one per character column of the visible
//! text rows. Columns are character offsets into the line (no wide-glyph
//! expansion), which is the same unit search matches are measured in, so a
//! match span maps onto cells without translation.
//!
//! Styling comes in two flavors:
//! - `CellFlags` bits (reverse video) for plain terminals.
//! - A semantic `StyleAttr` per cell, resolved to concrete attributes by the
//!   `writer`.

use bitflags::bitflags;
use core_text::LineSource;

pub mod highlight;
pub mod style;
pub mod writer;

pub use highlight::{RenderMode, project_row};
pub use style::StyleAttr;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CellFlags: u8 {
        const REVERSE = 0b0000_0001; // reverse-video (plain highlight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub flags: CellFlags,
    pub style: Option<StyleAttr>,
}

impl Cell {
    #[inline]
    pub fn new(ch: char) -> Self {
        Self {
            ch,
            flags: CellFlags::empty(),
            style: None,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        // Blank areas are single spaces.
        Cell::new(' ')
    }
}

#[derive(Debug, Clone)]
pub struct Frame {
    /// Columns per row; a row holds a whole line, so this is not a screen width.
    pub width: usize,
    pub height: u16,
    /// Buffer line shown on row 0 (1-based).
    pub first_line: usize,
    pub cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: usize, height: u16, first_line: usize) -> Self {
        Self {
            width,
            height,
            first_line: first_line.max(1),
            cells: vec![Cell::default(); width * height as usize],
        }
    }

    /// Fill a frame with the lines starting at `first_line`. Text past the
    /// right edge is clipped; rows past the end of the source stay blank.
    pub fn from_source<S: LineSource + ?Sized>(
        lines: &S,
        first_line: usize,
        width: usize,
        height: u16,
    ) -> Self {
        let mut frame = Self::new(width, height, first_line);
        for y in 0..height {
            let Some(text) = lines.line_text(frame.line_at(y)) else {
                break;
            };
            for (cell, ch) in frame.row_mut(y).iter_mut().zip(text.chars()) {
                *cell = Cell::new(ch);
            }
        }
        frame
    }

    /// Buffer line displayed on row `y`.
    pub fn line_at(&self, y: u16) -> usize {
        self.first_line + y as usize
    }

    pub fn row(&self, y: u16) -> &[Cell] {
        let start = (y as usize * self.width).min(self.cells.len());
        let end = (start + self.width).min(self.cells.len());
        &self.cells[start..end]
    }

    pub fn row_mut(&mut self, y: u16) -> &mut [Cell] {
        let start = (y as usize * self.width).min(self.cells.len());
        let end = (start + self.width).min(self.cells.len());
        &mut self.cells[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Buffer;

    fn row_text(f: &Frame, y: u16) -> String {
        let s: String = f.row(y).iter().map(|c| c.ch).collect();
        s.trim_end().to_string()
    }

    #[test]
    fn frame_from_source_clips_and_pads() {
        let buf = Buffer::from_str("t", "hello world\nab\n").unwrap();
        let f = Frame::from_source(&buf, 1, 5, 4);
        assert_eq!(row_text(&f, 0), "hello");
        assert_eq!(row_text(&f, 1), "ab");
        assert_eq!(row_text(&f, 2), "");
        assert_eq!(row_text(&f, 3), "");
        assert_eq!(f.line_at(1), 2);
    }

    #[test]
    fn frame_rows_respect_first_line() {
        let buf = Buffer::from_str("t", "a\nb\nc").unwrap();
        let f = Frame::from_source(&buf, 2, 3, 2);
        assert_eq!(row_text(&f, 0), "b");
        assert_eq!(row_text(&f, 1), "c");
    }

    #[test]
    fn rows_wider_than_a_terminal_keep_every_column() {
        let line = "x".repeat(70_000) + "END";
        let buf = Buffer::from_str("t", &line).unwrap();
        let f = Frame::from_source(&buf, 1, buf.line_char_len(1), 1);
        assert_eq!(f.row(0).len(), 70_003);
        assert!(row_text(&f, 0).ends_with("END"));
    }
}
