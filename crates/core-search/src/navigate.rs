//! Nearest-match navigation with wraparound.

use crate::frame::MatchFrame;
use core_text::Position;

/// Notice shown when a forward search wraps past the last match.
pub const HIT_BOTTOM: &str = "search hit bottom, continuing at top";
/// Notice shown when a backward search wraps past the first match.
pub const HIT_TOP: &str = "search hit top, continuing at bottom";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Wraparound notice for this direction.
    pub fn wrap_notice(self) -> &'static str {
        match self {
            Direction::Forward => HIT_BOTTOM,
            Direction::Backward => HIT_TOP,
        }
    }
}

/// Result of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavHit {
    /// Start of the selected match.
    pub position: Position,
    /// Index of the selected match within the frame.
    pub index: usize,
    /// True when no match lay ahead and the search wrapped around.
    pub wrapped: bool,
}

/// Pick the match closest to `from` in `direction`.
///
/// Forward selects the first match strictly after the cursor column on the
/// cursor line, or on any later line. Backward selects the last match whose
/// start lies at least two columns before the cursor on the cursor line, or
/// on any earlier line; a match starting right before the cursor counts as
/// the one the cursor is already on. Returns `None` only for an empty frame.
pub fn nearest(frame: &MatchFrame, from: Position, direction: Direction) -> Option<NavHit> {
    let matches = frame.matches();
    let (index, wrapped) = match direction {
        Direction::Forward => matches
            .iter()
            .position(|m| (m.line == from.line && m.start > from.col) || m.line > from.line)
            .map(|i| (i, false))
            .or_else(|| (!matches.is_empty()).then_some((0, true)))?,
        Direction::Backward => matches
            .iter()
            .rposition(|m| (m.line == from.line && m.start + 1 < from.col) || m.line < from.line)
            .map(|i| (i, false))
            .or_else(|| matches.len().checked_sub(1).map(|i| (i, true)))?,
    };
    let position = matches[index].position();
    tracing::trace!(
        target: "search.navigate",
        ?direction,
        line = position.line,
        col = position.col,
        wrapped,
        "nearest"
    );
    Some(NavHit {
        position,
        index,
        wrapped,
    })
}
