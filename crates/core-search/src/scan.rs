//! Buffer scanner: runs the matcher line by line and fills a [`MatchFrame`].
//!
//! Each line is matched independently. Within a line the matcher runs on the
//! suffix starting at a moving offset; in single mode only the first hit per
//! line is kept. In global mode the offset moves one character past the end
//! of each hit and the matcher runs again on the new suffix until the offset
//! reaches the end of the line. The step past `end` keeps zero-width patterns
//! from stalling, and it means a hit that starts right where the previous one
//! ended is not reported. Anchors such as `^` apply to each suffix.

use crate::frame::{Match, MatchFrame};
use core_text::LineSource;
use regex::Regex;
use std::ops::RangeInclusive;

/// Every line of the buffer.
pub const ALL_LINES: RangeInclusive<usize> = 1..=usize::MAX;

/// Rescan the whole buffer. Returns the number of matches recorded.
pub fn scan<S: LineSource + ?Sized>(
    frame: &mut MatchFrame,
    matcher: &Regex,
    lines: &S,
    global: bool,
) -> usize {
    scan_range(frame, matcher, lines, global, ALL_LINES)
}

/// Rescan the inclusive 1-based `range` of lines. The frame is cleared first;
/// scanning stops early at the first line the source cannot produce.
pub fn scan_range<S: LineSource + ?Sized>(
    frame: &mut MatchFrame,
    matcher: &Regex,
    lines: &S,
    global: bool,
    range: RangeInclusive<usize>,
) -> usize {
    frame.clear();
    let first = (*range.start()).max(1);
    let last = *range.end();
    let mut scanned = 0usize;
    let mut line = first;
    while line <= last {
        let Some(text) = lines.line_text(line) else {
            break;
        };
        scan_line(frame, matcher, &text, line, global);
        scanned += 1;
        if line == usize::MAX {
            break;
        }
        line += 1;
    }
    let total = frame.len();
    tracing::debug!(target: "search.scan", first, scanned, matches = total, global, "scan_complete");
    total
}

fn scan_line(frame: &mut MatchFrame, matcher: &Regex, text: &str, line: usize, global: bool) {
    let cols = ColumnMap::new(text);
    let mut offset = 0usize;
    while offset < text.len() {
        let Some(m) = matcher.find(&text[offset..]) else {
            break;
        };
        let (start, end) = (offset + m.start(), offset + m.end());
        frame.push(Match::new(line, cols.col(start), cols.col(end)));
        if !global {
            break;
        }
        offset = next_boundary(text, end);
    }
}

/// Byte offset of the char boundary one character past `byte`.
fn next_boundary(text: &str, byte: usize) -> usize {
    text[byte..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| byte + c.len_utf8())
}

/// Byte offset to character column translation for one line.
struct ColumnMap {
    /// Byte offset of each char boundary; empty for pure ASCII lines.
    boundaries: Vec<usize>,
}

impl ColumnMap {
    fn new(text: &str) -> Self {
        let boundaries = if text.is_ascii() {
            Vec::new()
        } else {
            let mut b: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
            b.push(text.len());
            b
        };
        Self { boundaries }
    }

    fn col(&self, byte: usize) -> usize {
        if self.boundaries.is_empty() {
            return byte;
        }
        match self.boundaries.binary_search(&byte) {
            Ok(idx) | Err(idx) => idx,
        }
    }
}
