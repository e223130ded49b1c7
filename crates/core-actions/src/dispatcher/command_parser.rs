//! Structured command line parsing.
//!
//! Converts a raw command string (an optional leading ':' followed by a
//! command name and arguments) into a `ParsedCommand`. The command set is the
//! static `COMMANDS` table; lookup and arity validation both go through it so
//! adding a command is a one-line change plus its handler.
//!
//! Arguments are whitespace separated. Double quotes group an argument that
//! contains spaces; inside quotes `\"` and `\\` are escapes and every other
//! backslash is kept as written so regex escapes survive untouched.
//!
//! No side effects here; pure classification.

use crate::error::CommandError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    FindInBuffer,
    FindNextInBuffer,
    FindPrevInBuffer,
    FindAndReplace,
    ReplaceCurrentSearch,
}

/// Accepted argument counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    None,
    One,
    Optional,
}

impl Arity {
    pub fn accepts(self, n: usize) -> bool {
        match self {
            Arity::None => n == 0,
            Arity::One => n == 1,
            Arity::Optional => n <= 1,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Arity::None => "no arguments",
            Arity::One => "exactly one argument",
            Arity::Optional => "at most one argument",
        })
    }
}

#[derive(Debug)]
pub struct CommandSpec {
    pub name: &'static str,
    pub kind: CommandKind,
    pub arity: Arity,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "find-in-buffer",
        kind: CommandKind::FindInBuffer,
        arity: Arity::Optional,
    },
    CommandSpec {
        name: "find-next-in-buffer",
        kind: CommandKind::FindNextInBuffer,
        arity: Arity::None,
    },
    CommandSpec {
        name: "find-prev-in-buffer",
        kind: CommandKind::FindPrevInBuffer,
        arity: Arity::None,
    },
    CommandSpec {
        name: "find-and-replace",
        kind: CommandKind::FindAndReplace,
        arity: Arity::One,
    },
    CommandSpec {
        name: "replace-current-search",
        kind: CommandKind::ReplaceCurrentSearch,
        arity: Arity::Optional,
    },
];

/// Table entry for `name`, if it is a known command.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

impl CommandKind {
    pub fn spec(self) -> &'static CommandSpec {
        // Table rows follow declaration order.
        &COMMANDS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub kind: CommandKind,
    pub args: Vec<String>,
}

impl ParsedCommand {
    /// The single argument of an `Optional`/`One` command, if given.
    pub fn arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

pub struct CommandParser;

impl CommandParser {
    pub fn parse(raw: &str) -> Result<ParsedCommand, CommandError> {
        let s = raw.trim();
        let body = s.strip_prefix(':').unwrap_or(s);
        let mut tokens = tokenize(body)?.into_iter();
        let Some(name) = tokens.next() else {
            return Err(CommandError::Empty);
        };
        let spec = lookup(&name).ok_or(CommandError::UnknownCommand(name))?;
        let args: Vec<String> = tokens.collect();
        if !spec.arity.accepts(args.len()) {
            return Err(CommandError::WrongArity {
                command: spec.name,
                expected: spec.arity,
            });
        }
        Ok(ParsedCommand {
            kind: spec.kind,
            args,
        })
    }
}

/// Split a command body into arguments.
pub fn tokenize(body: &str) -> Result<Vec<String>, CommandError> {
    let mut out = Vec::new();
    let mut cur = String::new();
    // A token can be empty ("") and still count, so presence is tracked apart
    // from `cur`.
    let mut in_token = false;
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                in_token = true;
                loop {
                    match chars.next() {
                        None => return Err(CommandError::UnterminatedQuote),
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\')) => cur.push(c),
                            Some(c) => {
                                cur.push('\\');
                                cur.push(c);
                            }
                            None => return Err(CommandError::UnterminatedQuote),
                        },
                        Some(c) => cur.push(c),
                    }
                }
            }
            c if c.is_whitespace() => {
                if in_token {
                    out.push(std::mem::take(&mut cur));
                    in_token = false;
                }
            }
            c => {
                in_token = true;
                cur.push(c);
            }
        }
    }
    if in_token {
        out.push(cur);
    }
    Ok(out)
}
