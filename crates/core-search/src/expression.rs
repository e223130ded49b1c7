//! Parser for compact substitution expressions: `[scope]s/find/replace/[flags]`.
//!
//! Scope forms:
//!
//! | form      | scope                                   |
//! |-----------|-----------------------------------------|
//! | (empty)   | the cursor line                         |
//! | `%`       | every line                              |
//! | `N,M`     | lines `N` through `M`                   |
//! | `,M`      | cursor line through `M`                 |
//!
//! Inside `find` and `replace`, `\/` stands for a literal slash. Every other
//! backslash sequence is kept as written and left to the regex engine.
//! Flags: `g` global, `c` confirm, `i` ignore case; other letters are ignored.

use crate::substitute::{ReplaceProperties, Scope};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed substitution expression")]
    Malformed,
    #[error("cannot provide both '%' and an ending line number")]
    PercentWithEnd,
    #[error("starting line number given but no ending")]
    MissingEnd,
}

#[derive(Debug, PartialEq, Eq)]
enum Start {
    Empty,
    Percent,
    Line(usize),
}

#[derive(Debug, PartialEq, Eq)]
enum End {
    Empty,
    Percent,
    Line(usize),
}

/// Parse `expression` into replace properties. `cursor_line` resolves the
/// implicit current-line scope. Nothing outside the returned value changes;
/// installing `pattern_override` is left to the caller.
pub fn parse(expression: &str, cursor_line: usize) -> Result<ReplaceProperties, ParseError> {
    let mut rest = expression;

    let start = if let Some(r) = rest.strip_prefix('%') {
        rest = r;
        Start::Percent
    } else {
        match take_number(&mut rest)? {
            Some(n) => Start::Line(n),
            None => Start::Empty,
        }
    };

    let end = match rest.strip_prefix(',') {
        Some(r) => {
            rest = r;
            if let Some(r) = rest.strip_prefix('%') {
                rest = r;
                End::Percent
            } else {
                End::Line(take_number(&mut rest)?.ok_or(ParseError::Malformed)?)
            }
        }
        None => End::Empty,
    };

    rest = rest.strip_prefix("s/").ok_or(ParseError::Malformed)?;
    let (find, r) = take_field(rest).ok_or(ParseError::Malformed)?;
    let (replacement, r) = take_field(r).ok_or(ParseError::Malformed)?;
    if !r.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ParseError::Malformed);
    }

    let scope = match (start, end) {
        (Start::Empty, End::Empty) => Scope::CurrentLine(cursor_line),
        (Start::Empty, End::Line(e)) => ordered(cursor_line, e),
        (Start::Percent, End::Empty) => Scope::AllLines,
        (Start::Percent, _) | (_, End::Percent) => return Err(ParseError::PercentWithEnd),
        (Start::Line(_), End::Empty) => return Err(ParseError::MissingEnd),
        (Start::Line(s), End::Line(e)) => ordered(s, e),
    };

    let props = ReplaceProperties {
        scope,
        is_global: r.contains('g'),
        is_confirm: r.contains('c'),
        is_ignore_case: r.contains('i'),
        replacement,
        pattern_override: (!find.is_empty()).then_some(find),
    };
    tracing::trace!(
        target: "search.substitute",
        scope = ?props.scope,
        flags = r,
        has_find = props.pattern_override.is_some(),
        "expression_parsed"
    );
    Ok(props)
}

fn ordered(a: usize, b: usize) -> Scope {
    Scope::LineRange(a.min(b), a.max(b))
}

/// Consume leading decimal digits. Line numbers are 1-based, so zero and
/// values that do not fit are rejected.
fn take_number(rest: &mut &str) -> Result<Option<usize>, ParseError> {
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Ok(None);
    }
    let (num, r) = rest.split_at(digits);
    *rest = r;
    match num.parse::<usize>() {
        Ok(0) | Err(_) => Err(ParseError::Malformed),
        Ok(n) => Ok(Some(n)),
    }
}

/// Read up to the next unescaped `/`, returning the unescaped field and the
/// text after the delimiter.
fn take_field(input: &str) -> Option<(String, &str)> {
    let mut out = String::new();
    let mut chars = input.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '/' => return Some((out, &input[i + 1..])),
            '\\' => match chars.next() {
                Some((_, '/')) => out.push('/'),
                Some((_, other)) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            },
            _ => out.push(c),
        }
    }
    None
}
