//! Error taxonomy for pattern compilation and engine entry points.
//!
//! Messages are user facing; callers surface `to_string()` directly in the
//! status line.

use thiserror::Error;

/// Pattern syntax problems detected while compiling a [`crate::Pattern`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("expected regular expression but got nothing")]
    EmptyPattern,
    #[error("Unbalanced square brackets!")]
    UnbalancedBrackets,
    #[error("Unbalanced parentheses!")]
    UnbalancedParentheses,
    #[error("Unbalanced curly bracket or brace!")]
    UnbalancedBraces,
    #[error("Invalid curly bracket or brace usage!")]
    InvalidBraceContent,
    #[error("Repetition character, e.g. `?' or `*', appeared in bad position!")]
    BadRepetition,
    #[error("Invalid escape sequence!")]
    InvalidEscape,
    #[error("Invalid number in the `\\digit' construct!")]
    InvalidBackreference,
    #[error("Invalid class character name!")]
    InvalidClassName,
    #[error("Invalid collation!")]
    InvalidCollation,
    #[error("Endpoint of range expression invalid!")]
    InvalidRange,
    #[error("Out of memory!!!")]
    OutOfMemory,
    #[error("Syntax error in pattern: {0}")]
    Syntax(String),
}

impl CompileError {
    /// Classify an error reported by the regex crate.
    pub(crate) fn from_regex(err: &regex::Error) -> Self {
        match err {
            regex::Error::CompiledTooBig(_) => CompileError::OutOfMemory,
            regex::Error::Syntax(msg) => Self::from_syntax_message(msg),
            other => CompileError::Syntax(other.to_string()),
        }
    }

    fn from_syntax_message(msg: &str) -> Self {
        let detail = msg
            .lines()
            .rev()
            .find_map(|l| l.trim().strip_prefix("error: "))
            .unwrap_or(msg.trim())
            .to_ascii_lowercase();
        let has = |needle: &str| detail.contains(needle);
        if has("unclosed character class") {
            CompileError::UnbalancedBrackets
        } else if has("unclosed group") || has("unopened group") {
            CompileError::UnbalancedParentheses
        } else if has("unclosed counted repetition") {
            CompileError::UnbalancedBraces
        } else if has("repetition count") || has("repetition quantifier") || has("decimal") {
            CompileError::InvalidBraceContent
        } else if has("repetition operator missing expression") {
            CompileError::BadRepetition
        } else if has("backreference") {
            CompileError::InvalidBackreference
        } else if has("class range") || has("range boundary") {
            CompileError::InvalidRange
        } else if has("escape") || has("hexadecimal") {
            CompileError::InvalidEscape
        } else if has("unicode property") || has("ascii class") {
            CompileError::InvalidClassName
        } else if has("exceeds size limit") || has("too big") {
            CompileError::OutOfMemory
        } else {
            CompileError::Syntax(detail)
        }
    }
}

/// Errors surfaced by engine entry points that compile on behalf of the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error("no previous regular expression")]
    NoPattern,
}
