//! The live search pattern: typed text plus its compiled matcher.
//!
//! Invariant: `compiled`, when present, was built from the current `text`.
//! `set` drops the matcher in the same call that replaces the text, and
//! `compile` installs a matcher only on success, so readers never observe a
//! matcher for stale text.

use crate::error::CompileError;
use regex::{Regex, RegexBuilder};

/// Compiled size limit applied when the caller does not configure one.
pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

#[derive(Debug)]
struct Compiled {
    regex: Regex,
    ignore_case: bool,
}

#[derive(Debug)]
pub struct Pattern {
    text: String,
    compiled: Option<Compiled>,
    size_limit: usize,
}

impl Default for Pattern {
    fn default() -> Self {
        Self::new()
    }
}

impl Pattern {
    pub fn new() -> Self {
        Self::with_size_limit(DEFAULT_SIZE_LIMIT)
    }

    pub fn with_size_limit(size_limit: usize) -> Self {
        Self {
            text: String::new(),
            compiled: None,
            size_limit,
        }
    }

    /// Replace the pattern text. Any compiled matcher is discarded.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.compiled = None;
    }

    pub fn clear(&mut self) {
        self.set(String::new());
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// True only when there is non-empty pattern text.
    pub fn exists(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled.is_some()
    }

    /// Case mode of the installed matcher, if any.
    pub fn ignore_case(&self) -> Option<bool> {
        self.compiled.as_ref().map(|c| c.ignore_case)
    }

    pub fn matcher(&self) -> Option<&Regex> {
        self.compiled.as_ref().map(|c| &c.regex)
    }

    /// Compile the current text, replacing any previously compiled matcher.
    pub fn compile(&mut self, ignore_case: bool) -> Result<(), CompileError> {
        self.compile_matcher(ignore_case).map(|_| ())
    }

    /// Compile and hand back the freshly installed matcher.
    pub fn compile_matcher(&mut self, ignore_case: bool) -> Result<&Regex, CompileError> {
        self.compiled = None;
        if self.text.is_empty() {
            return Err(CompileError::EmptyPattern);
        }
        if has_collating_element(&self.text) {
            return Err(CompileError::InvalidCollation);
        }
        let regex = RegexBuilder::new(&self.text)
            .case_insensitive(ignore_case)
            .size_limit(self.size_limit)
            .build()
            .map_err(|e| {
                let err = CompileError::from_regex(&e);
                tracing::debug!(target: "search.pattern", len = self.text.len(), ?err, "compile_failed");
                err
            })?;
        tracing::trace!(target: "search.pattern", len = self.text.len(), ignore_case, "compiled");
        let compiled = self.compiled.insert(Compiled { regex, ignore_case });
        Ok(&compiled.regex)
    }
}

/// POSIX collating elements (`[.x.]`, `[=x=]`) inside a bracket expression.
/// The regex backend has no notion of collation, so these are rejected
/// instead of silently being read as literal characters.
fn has_collating_element(text: &str) -> bool {
    let mut depth = 0usize;
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '[' => {
                if depth > 0 && matches!(chars.peek(), Some('.') | Some('=')) {
                    return true;
                }
                depth += 1;
            }
            ']' if depth > 0 => depth -= 1,
            _ => {}
        }
    }
    false
}
