//! Per-view match index.
//!
//! A [`MatchFrame`] is the ordered list of matches one view currently shows.
//! Ordering invariant: ascending by `(line, start)`, strictly increasing
//! `start` within a line. The scanner produces matches in that order and the
//! navigator relies on it for its wraparound search.
//!
//! [`MatchRegistry`] owns one frame per live view. Frames are created lazily
//! on first reference and are only dropped through an explicit `remove`
//! (callers evict on view close).

use ahash::AHashMap;
use core_text::Position;
use std::hash::Hash;

/// A line plus an intra-line half-open column span `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Match {
    /// 1-based line number.
    pub line: usize,
    /// Inclusive start column (chars).
    pub start: usize,
    /// Exclusive end column (chars).
    pub end: usize,
}

impl Match {
    pub fn new(line: usize, start: usize, end: usize) -> Self {
        debug_assert!(line >= 1, "lines are 1-based");
        debug_assert!(end >= start, "match end precedes start");
        Self { line, start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Cursor position at the start of the match.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.start)
    }

    pub fn contains_col(&self, col: usize) -> bool {
        (self.start..self.end).contains(&col)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchFrame {
    matches: Vec<Match>,
}

impl MatchFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from arbitrary matches, establishing the ordering invariant.
    pub fn from_matches(mut matches: Vec<Match>) -> Self {
        matches.sort_unstable_by_key(|m| (m.line, m.start, m.end));
        matches.dedup_by_key(|m| (m.line, m.start));
        Self { matches }
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn clear(&mut self) {
        self.matches.clear();
    }

    pub fn first(&self) -> Option<&Match> {
        self.matches.first()
    }

    pub fn last(&self) -> Option<&Match> {
        self.matches.last()
    }

    /// Matches recorded for `line`, in column order.
    pub fn on_line(&self, line: usize) -> &[Match] {
        let lo = self.matches.partition_point(|m| m.line < line);
        let hi = self.matches.partition_point(|m| m.line <= line);
        &self.matches[lo..hi]
    }

    /// Move the matches out, leaving the frame empty.
    pub fn take_matches(&mut self) -> Vec<Match> {
        std::mem::take(&mut self.matches)
    }

    /// True when the ordering invariant holds.
    pub fn is_sorted(&self) -> bool {
        self.matches
            .windows(2)
            .all(|w| w[0].line < w[1].line || (w[0].line == w[1].line && w[0].start < w[1].start))
    }

    pub(crate) fn push(&mut self, m: Match) {
        debug_assert!(
            self.matches
                .last()
                .is_none_or(|p| p.line < m.line || (p.line == m.line && p.start < m.start)),
            "matches must be pushed in (line, start) order"
        );
        self.matches.push(m);
    }
}

/// Mapping from a view identity to that view's [`MatchFrame`].
#[derive(Debug)]
pub struct MatchRegistry<V> {
    frames: AHashMap<V, MatchFrame>,
}

impl<V> Default for MatchRegistry<V> {
    fn default() -> Self {
        Self {
            frames: AHashMap::new(),
        }
    }
}

impl<V: Copy + Eq + Hash + std::fmt::Debug> MatchRegistry<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame for `view`, created empty on first reference. Idempotent.
    pub fn get_or_create(&mut self, view: V) -> &mut MatchFrame {
        self.frames.entry(view).or_insert_with(|| {
            tracing::trace!(target: "search.frames", ?view, "frame_created");
            MatchFrame::new()
        })
    }

    pub fn get(&self, view: V) -> Option<&MatchFrame> {
        self.frames.get(&view)
    }

    pub fn get_mut(&mut self, view: V) -> Option<&mut MatchFrame> {
        self.frames.get_mut(&view)
    }

    /// Drop all matches of `view`, keeping its (empty) frame.
    pub fn clear(&mut self, view: V) {
        if let Some(frame) = self.frames.get_mut(&view) {
            frame.clear();
        }
    }

    /// Evict the frame of a closed view.
    pub fn remove(&mut self, view: V) -> Option<MatchFrame> {
        let removed = self.frames.remove(&view);
        if removed.is_some() {
            tracing::trace!(target: "search.frames", ?view, "frame_evicted");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
