//! Command-boundary errors.
//!
//! Every variant is reported to the user through `EditorState::report` by the
//! dispatcher; none of them escape a command invocation.

use crate::dispatcher::command_parser::Arity;
use core_search::{CompileError, ParseError, SearchError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("no command given")]
    Empty,
    #[error("not an editor command: {0}")]
    UnknownCommand(String),
    #[error("{command}: expected {expected}")]
    WrongArity {
        command: &'static str,
        expected: Arity,
    },
    #[error("unterminated quoted argument")]
    UnterminatedQuote,
    #[error("a search prompt is already open")]
    PromptActive,
    #[error("no active buffer")]
    NoActiveBuffer,
    #[error("no previous regular expression")]
    NoPattern,
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl From<SearchError> for CommandError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Compile(e) => CommandError::Compile(e),
            SearchError::NoPattern => CommandError::NoPattern,
        }
    }
}
