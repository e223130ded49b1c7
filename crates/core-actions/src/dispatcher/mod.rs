//! Command dispatcher.
//!
//! * `command_parser` - raw string to `ParsedCommand` via the command table
//! * `find`           - one-shot / interactive search and next/prev stepping
//! * `replace`        - expression substitution and replace-current-search
//!
//! `execute_command` is the error boundary: whatever a handler returns as
//! `Err` is logged and reported on the status line here, and goes no further.

use crate::error::CommandError;
use crate::session::SearchSession;
use command_parser::{CommandKind, CommandParser, ParsedCommand};
use core_model::EditorModel;
use core_search::Direction;
use core_state::Severity;

pub mod command_parser;
mod find;
pub(crate) mod replace;

/// Result of dispatching a single command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    /// Buffer text changed; cached line renders are stale.
    pub buffer_changed: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            buffer_changed: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            buffer_changed: false,
        }
    }
    pub fn edited() -> Self {
        Self {
            dirty: true,
            buffer_changed: true,
        }
    }
}

/// Parse and run one command line.
pub fn execute_command(
    raw: &str,
    session: &mut SearchSession,
    model: &mut EditorModel,
) -> DispatchResult {
    let result = CommandParser::parse(raw).and_then(|cmd| run(&cmd, session, model));
    match result {
        Ok(r) => r,
        Err(err) => {
            tracing::warn!(target: "actions.command", %err, "command_failed");
            model.state_mut().report(Severity::Error, err.to_string());
            DispatchResult::dirty()
        }
    }
}

/// Run an already parsed command.
pub fn run(
    cmd: &ParsedCommand,
    session: &mut SearchSession,
    model: &mut EditorModel,
) -> Result<DispatchResult, CommandError> {
    if session.is_interactive() {
        return Err(CommandError::PromptActive);
    }
    tracing::debug!(
        target: "actions.command",
        command = cmd.kind.name(),
        args = cmd.args.len(),
        "execute"
    );
    match cmd.kind {
        CommandKind::FindInBuffer => find::find_in_buffer(cmd.arg(), session, model),
        CommandKind::FindNextInBuffer => find::find_adjacent(Direction::Forward, session, model),
        CommandKind::FindPrevInBuffer => find::find_adjacent(Direction::Backward, session, model),
        CommandKind::FindAndReplace => {
            let expression = cmd.arg().unwrap_or_default();
            replace::find_and_replace(expression, session, model)
        }
        CommandKind::ReplaceCurrentSearch => {
            replace::replace_current_search(cmd.arg(), session, model)
        }
    }
}
