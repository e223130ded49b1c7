//! Rope-based text buffer abstraction.
//!
//! The search engine never touches the rope directly. It talks to buffers
//! through two narrow traits:
//!
//! * [`LineSource`] - read one line of text by 1-based line number. `None`
//!   signals "past the end of the buffer" and is how scanners discover the
//!   buffer length.
//! * [`LineSink`] - insert or delete a single character at a `(line, col)`
//!   position. Substitution is expressed as a sequence of these calls so a
//!   storage backend is free to batch them internally.
//!
//! Coordinates: lines are 1-based, columns are 0-based character (Unicode
//! scalar value) offsets into the line text with the line terminator removed.
//! Only `\n` (optionally preceded by `\r`) terminates a line; a lone `\r`,
//! form feed or Unicode line separator is ordinary line content.

use anyhow::Result;
use ropey::Rope;

/// Read access to the lines of a buffer.
pub trait LineSource {
    /// Text of `line` (1-based) without its terminator, or `None` past the end.
    fn line_text(&self, line: usize) -> Option<String>;
    /// Number of addressable lines.
    fn line_count(&self) -> usize;
}

/// Character-at-a-time mutation of a buffer.
pub trait LineSink {
    /// Insert `ch` so that it ends up at column `col` of `line`.
    fn insert_char(&mut self, line: usize, col: usize, ch: char);
    /// Delete the character at column `col` of `line`. No-op at or past line end.
    fn delete_char(&mut self, line: usize, col: usize);
}

/// A text buffer backed by a `ropey::Rope`.
#[derive(Clone)]
pub struct Buffer {
    rope: Rope,
    pub name: String,
}

/// A position inside a buffer expressed as (1-based line, 0-based char column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
    pub fn origin() -> Self {
        Self { line: 1, col: 0 }
    }
    pub fn clamp_to<F>(&mut self, line_count: usize, mut line_len_fn: F)
    where
        F: FnMut(usize) -> usize,
    {
        if line_count == 0 {
            *self = Self::origin();
            return;
        }
        self.line = self.line.clamp(1, line_count);
        let max_len = line_len_fn(self.line);
        if self.col > max_len {
            self.col = max_len;
        }
    }
}

impl Buffer {
    /// Construct a buffer from an in-memory string slice.
    pub fn from_str(name: impl Into<String>, content: &str) -> Result<Self> {
        Ok(Self {
            rope: Rope::from_str(content),
            name: name.into(),
        })
    }

    /// Total number of lines in the buffer (ropey counts a trailing empty line
    /// after a final newline).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Full buffer contents.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Character length of `line` excluding its terminator; 0 past the end.
    pub fn line_char_len(&self, line: usize) -> usize {
        self.line_text(line).map(|s| s.chars().count()).unwrap_or(0)
    }

    fn line_content_string(&self, idx: usize) -> String {
        let mut s = self.rope.line(idx).to_string();
        if s.ends_with('\n') {
            s.pop();
            if s.ends_with('\r') {
                s.pop();
            }
        }
        s
    }

    /// Absolute char index of `(line, col)` with `col` clamped to the line content.
    fn char_index(&self, line: usize, col: usize) -> Option<usize> {
        if line == 0 || line > self.rope.len_lines() {
            return None;
        }
        let idx = line - 1;
        let content_len = self.line_content_string(idx).chars().count();
        Some(self.rope.line_to_char(idx) + col.min(content_len))
    }
}

impl LineSource for Buffer {
    fn line_text(&self, line: usize) -> Option<String> {
        if line == 0 || line > self.rope.len_lines() {
            return None;
        }
        Some(self.line_content_string(line - 1))
    }

    fn line_count(&self) -> usize {
        Buffer::line_count(self)
    }
}

impl LineSink for Buffer {
    fn insert_char(&mut self, line: usize, col: usize, ch: char) {
        if let Some(at) = self.char_index(line, col) {
            let mut tmp = [0u8; 4];
            self.rope.insert(at, ch.encode_utf8(&mut tmp));
        }
    }

    fn delete_char(&mut self, line: usize, col: usize) {
        if col >= self.line_char_len(line) {
            return;
        }
        if let Some(at) = self.char_index(line, col) {
            self.rope.remove(at..at + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_buffer_and_read_line() {
        let b = Buffer::from_str("test", "hello\nworld").unwrap();
        assert_eq!(b.line_count(), 2);
        assert_eq!(b.line_text(1).unwrap(), "hello");
        assert_eq!(b.line_text(2).unwrap(), "world");
        assert_eq!(b.line_text(3), None);
        assert_eq!(b.line_text(0), None);
    }

    #[test]
    fn trailing_newline_yields_empty_last_line() {
        let b = Buffer::from_str("t", "abc\n").unwrap();
        assert_eq!(b.line_count(), 2);
        assert_eq!(b.line_text(2).unwrap(), "");
    }

    #[test]
    fn crlf_terminator_is_stripped() {
        let b = Buffer::from_str("t", "ab\r\ncd").unwrap();
        assert_eq!(b.line_text(1).unwrap(), "ab");
        assert_eq!(b.line_char_len(1), 2);
    }

    #[test]
    fn lone_cr_and_form_feed_are_line_content() {
        let b = Buffer::from_str("t", "a\x0Cb\nx\ry\u{2028}z").unwrap();
        assert_eq!(b.line_count(), 2);
        assert_eq!(b.line_text(1).unwrap(), "a\x0Cb");
        assert_eq!(b.line_text(2).unwrap(), "x\ry\u{2028}z");
        assert_eq!(b.line_char_len(2), 5);
    }

    #[test]
    fn deleting_form_feed_keeps_line_structure() {
        let mut b = Buffer::from_str("t", "a\x0Cb\nc").unwrap();
        b.delete_char(1, 1);
        assert_eq!(b.text(), "ab\nc");
        assert_eq!(b.line_count(), 2);
        b.delete_char(1, 2);
        assert_eq!(b.text(), "ab\nc");
    }

    #[test]
    fn insert_char_middle() {
        let mut b = Buffer::from_str("t", "abc\nxyz").unwrap();
        b.insert_char(2, 1, 'Q');
        assert_eq!(b.line_text(2).unwrap(), "xQyz");
        assert_eq!(b.line_text(1).unwrap(), "abc");
    }

    #[test]
    fn insert_char_past_end_appends() {
        let mut b = Buffer::from_str("t", "ab\ncd").unwrap();
        b.insert_char(1, 99, '!');
        assert_eq!(b.text(), "ab!\ncd");
    }

    #[test]
    fn delete_char_multibyte() {
        let mut b = Buffer::from_str("t", "aüb").unwrap();
        b.delete_char(1, 1);
        assert_eq!(b.line_text(1).unwrap(), "ab");
    }

    #[test]
    fn delete_char_at_end_keeps_newline() {
        let mut b = Buffer::from_str("t", "hi\nthere").unwrap();
        b.delete_char(1, 2);
        assert_eq!(b.text(), "hi\nthere");
    }

    #[test]
    fn reverse_insertion_at_fixed_point_preserves_order() {
        let mut b = Buffer::from_str("t", "ac").unwrap();
        for ch in "XYZ".chars().rev() {
            b.insert_char(1, 1, ch);
        }
        assert_eq!(b.line_text(1).unwrap(), "aXYZc");
    }

    #[test]
    fn position_clamp() {
        let mut p = Position::new(9, 40);
        p.clamp_to(3, |_| 5);
        assert_eq!(p, Position::new(3, 5));
        let mut z = Position::new(0, 2);
        z.clamp_to(2, |_| 1);
        assert_eq!(z, Position::new(1, 1));
    }
}
