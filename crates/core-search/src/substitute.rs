//! Substitution engine.
//!
//! Matches are recorded against the line text as it was at scan time. Every
//! replacement shifts the columns of the matches that follow it on the same
//! line, so the engine carries a per-line `drift` (columns added minus
//! columns removed so far) and targets each match at `start + drift`. Drift
//! resets whenever the walk moves to a new line.
//!
//! The buffer is mutated one character at a time through [`LineSink`]:
//! the matched span is deleted at a fixed column, then the replacement is
//! inserted back to front at that same column so it reads in order.

use crate::error::SearchError;
use crate::frame::{Match, MatchFrame};
use crate::pattern::Pattern;
use crate::scan::{scan_range, ALL_LINES};
use core_text::{LineSink, LineSource, Position};
use std::ops::RangeInclusive;

/// Which lines a substitution covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    CurrentLine(usize),
    AllLines,
    /// Inclusive range of 1-based lines.
    LineRange(usize, usize),
}

impl Scope {
    pub fn lines(&self) -> RangeInclusive<usize> {
        match *self {
            Scope::CurrentLine(line) => line..=line,
            Scope::AllLines => ALL_LINES,
            Scope::LineRange(start, end) => start..=end,
        }
    }
}

/// Parameters of one replace invocation. Built fresh for every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceProperties {
    pub scope: Scope,
    pub is_global: bool,
    pub is_confirm: bool,
    pub is_ignore_case: bool,
    pub replacement: String,
    /// Pattern text supplied by the expression, if any.
    pub pattern_override: Option<String>,
}

impl ReplaceProperties {
    /// Global, case-sensitive replacement over every line with the stored pattern.
    pub fn all_lines(replacement: impl Into<String>) -> Self {
        Self {
            scope: Scope::AllLines,
            is_global: true,
            is_confirm: false,
            is_ignore_case: false,
            replacement: replacement.into(),
            pattern_override: None,
        }
    }
}

/// Cursor over a list of scanned matches that rewrites them one at a time.
#[derive(Debug, Clone)]
pub struct Substitution {
    matches: Vec<Match>,
    next: usize,
    replacement: Vec<char>,
    drift: isize,
    drift_line: usize,
    applied: usize,
}

impl Substitution {
    pub fn new(matches: Vec<Match>, replacement: &str) -> Self {
        Self {
            matches,
            next: 0,
            replacement: replacement.chars().collect(),
            drift: 0,
            drift_line: 0,
            applied: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.next >= self.matches.len()
    }

    /// Number of matches not yet accepted or skipped.
    pub fn remaining(&self) -> usize {
        self.matches.len().saturating_sub(self.next)
    }

    /// Number of replacements performed so far.
    pub fn applied(&self) -> usize {
        self.applied
    }

    pub fn replacement(&self) -> String {
        self.replacement.iter().collect()
    }

    /// Current match as originally scanned.
    pub fn current(&self) -> Option<&Match> {
        self.matches.get(self.next)
    }

    /// Where the current match sits in the buffer now, after earlier
    /// replacements on its line.
    pub fn current_position(&self) -> Option<Position> {
        self.current()
            .map(|m| Position::new(m.line, self.column_for(m)))
    }

    /// Replace the current match and advance. Returns false when exhausted.
    pub fn accept<S: LineSink + ?Sized>(&mut self, sink: &mut S) -> bool {
        let Some(m) = self.matches.get(self.next).copied() else {
            return false;
        };
        self.enter_line(m.line);
        let col = self.column_for(&m);
        for _ in 0..m.len() {
            sink.delete_char(m.line, col);
        }
        for &ch in self.replacement.iter().rev() {
            sink.insert_char(m.line, col, ch);
        }
        self.drift += self.replacement.len() as isize - m.len() as isize;
        self.applied += 1;
        self.next += 1;
        true
    }

    /// Leave the current match untouched and advance.
    pub fn skip(&mut self) -> bool {
        let Some(m) = self.matches.get(self.next).copied() else {
            return false;
        };
        self.enter_line(m.line);
        self.next += 1;
        true
    }

    /// Replace every remaining match. Returns how many were replaced by this call.
    pub fn accept_all<S: LineSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let before = self.applied;
        while self.accept(sink) {}
        self.applied - before
    }

    fn enter_line(&mut self, line: usize) {
        if line != self.drift_line {
            self.drift_line = line;
            self.drift = 0;
        }
    }

    fn column_for(&self, m: &Match) -> usize {
        let drift = if m.line == self.drift_line {
            self.drift
        } else {
            0
        };
        m.start.saturating_add_signed(drift)
    }
}

/// Compile the pattern with the requested case mode, scan the requested scope
/// and hand back a stepper over the matches. The frame is left empty.
pub fn prepare<S: LineSource + ?Sized>(
    pattern: &mut Pattern,
    frame: &mut MatchFrame,
    lines: &S,
    props: &ReplaceProperties,
) -> Result<Substitution, SearchError> {
    if !pattern.exists() {
        return Err(SearchError::NoPattern);
    }
    let matcher = pattern.compile_matcher(props.is_ignore_case)?;
    scan_range(frame, matcher, lines, props.is_global, props.scope.lines());
    Ok(Substitution::new(frame.take_matches(), &props.replacement))
}

/// Replace every match in scope. Returns the number of substitutions; zero
/// means nothing matched and the buffer is untouched.
pub fn apply<B: LineSource + LineSink + ?Sized>(
    pattern: &mut Pattern,
    frame: &mut MatchFrame,
    buffer: &mut B,
    props: &ReplaceProperties,
) -> Result<usize, SearchError> {
    let mut sub = prepare(pattern, frame, &*buffer, props)?;
    let count = sub.accept_all(buffer);
    frame.clear();
    tracing::debug!(
        target: "search.substitute",
        count,
        scope = ?props.scope,
        global = props.is_global,
        replacement_len = props.replacement.len(),
        "substitute_complete"
    );
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Buffer;

    fn pattern(text: &str) -> Pattern {
        let mut p = Pattern::new();
        p.set(text);
        p
    }

    fn run(content: &str, find: &str, props: ReplaceProperties) -> (usize, String) {
        let mut buf = Buffer::from_str("t", content).unwrap();
        let mut p = pattern(find);
        let mut frame = MatchFrame::new();
        let n = apply(&mut p, &mut frame, &mut buf, &props).unwrap();
        assert!(frame.is_empty());
        (n, buf.text())
    }

    #[test]
    fn growing_replacement_tracks_drift() {
        let (n, text) = run("aXbXc", "X", ReplaceProperties::all_lines("YY"));
        assert_eq!(n, 2);
        assert_eq!(text, "aYYbYYc");
    }

    #[test]
    fn empty_replacement_deletes() {
        let (n, text) = run("aXbXc", "X", ReplaceProperties::all_lines(""));
        assert_eq!(n, 2);
        assert_eq!(text, "abc");
    }

    #[test]
    fn shrinking_replacement_tracks_drift() {
        let (_, text) = run("fooXfooXfoo", "foo", ReplaceProperties::all_lines("z"));
        assert_eq!(text, "zXzXz");
    }

    #[test]
    fn drift_resets_per_line() {
        let (n, text) = run("XaX\nbX", "X", ReplaceProperties::all_lines("123"));
        assert_eq!(n, 3);
        assert_eq!(text, "123a123\nb123");
    }

    #[test]
    fn single_mode_replaces_first_per_line() {
        let mut props = ReplaceProperties::all_lines("_");
        props.is_global = false;
        let (n, text) = run("XX\nXX", "X", props);
        assert_eq!(n, 2);
        assert_eq!(text, "_X\n_X");
    }

    #[test]
    fn scope_limits_lines() {
        let mut props = ReplaceProperties::all_lines("y");
        props.scope = Scope::LineRange(2, 3);
        let (n, text) = run("x\nx\nx\nx", "x", props.clone());
        assert_eq!(n, 2);
        assert_eq!(text, "x\ny\ny\nx");
        props.scope = Scope::CurrentLine(4);
        let (_, text) = run("x\nx\nx\nx", "x", props);
        assert_eq!(text, "x\nx\nx\ny");
    }

    #[test]
    fn ignore_case_flag() {
        let mut props = ReplaceProperties::all_lines("b");
        props.is_ignore_case = true;
        let (n, text) = run("a A a", "a", props);
        assert_eq!(n, 3);
        assert_eq!(text, "b b b");
    }

    #[test]
    fn zero_matches_leaves_buffer_untouched() {
        let (n, text) = run("hello", "zzz", ReplaceProperties::all_lines("q"));
        assert_eq!(n, 0);
        assert_eq!(text, "hello");
    }

    #[test]
    fn missing_pattern_is_an_error() {
        let mut buf = Buffer::from_str("t", "abc").unwrap();
        let mut frame = MatchFrame::new();
        let err = apply(
            &mut Pattern::new(),
            &mut frame,
            &mut buf,
            &ReplaceProperties::all_lines("x"),
        )
        .unwrap_err();
        assert_eq!(err, SearchError::NoPattern);
    }

    #[test]
    fn skipping_keeps_drift_consistent() {
        let mut buf = Buffer::from_str("t", "aXbXcX").unwrap();
        let mut p = pattern("X");
        let mut frame = MatchFrame::new();
        let mut sub = prepare(&mut p, &mut frame, &buf, &ReplaceProperties::all_lines("YY")).unwrap();
        assert_eq!(sub.remaining(), 3);
        assert!(sub.accept(&mut buf));
        assert_eq!(sub.current_position(), Some(Position::new(1, 4)));
        assert!(sub.skip());
        assert!(sub.accept(&mut buf));
        assert!(sub.is_done());
        assert!(!sub.accept(&mut buf));
        assert_eq!(sub.applied(), 2);
        assert_eq!(buf.text(), "aYYbXcYY");
    }

    #[test]
    fn adjacent_hit_after_a_match_is_not_replaced() {
        let (n, text) = run("XXX", "X", ReplaceProperties::all_lines("_"));
        assert_eq!(n, 2);
        assert_eq!(text, "_X_");
    }

    #[test]
    fn form_feed_and_lone_cr_stay_inside_the_line() {
        let (n, text) = run("a\x0Cb\nc", ".", ReplaceProperties::all_lines(""));
        assert_eq!(n, 3);
        assert_eq!(text, "\x0C\n");
        let (n, text) = run("x\ry\nz", "[^\r]", ReplaceProperties::all_lines(""));
        assert_eq!(n, 3);
        assert_eq!(text, "\r\n");
    }

    #[test]
    fn multibyte_replacement() {
        let (_, text) = run("aXb", "X", ReplaceProperties::all_lines("äö"));
        assert_eq!(text, "aäöb");
    }
}
