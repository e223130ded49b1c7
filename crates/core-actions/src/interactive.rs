//! Interactive search controller.
//!
//! A state machine stepped one `InputEvent` at a time:
//!
//! ```text
//! Idle --find-in-buffer--> Building --Enter--> Committed --> Idle
//!                              \-----Esc----> Cancelled --> Idle
//! ```
//!
//! Two sibling sessions share the machinery: replacement-text entry
//! (`replace-current-search` with no argument) and match-by-match confirmation
//! (`find-and-replace` with the `c` flag).
//!
//! While a pattern is being typed, compile failures and empty results are
//! expected transient states and are never reported. They are reported once
//! when the user commits.

use crate::dispatcher::replace;
use crate::error::CommandError;
use crate::session::{PATTERN_NOT_FOUND, SearchSession, set_cursor, view_buffer};
use core_events::{InputEvent, KeyCode, KeyEvent};
use core_model::{EditorModel, ViewId};
use core_search::{Direction, Substitution};
use core_state::{Mode, Severity};
use core_text::Position;

/// Public view of the controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    /// Typing a search pattern with live feedback.
    Building,
    /// Typing replacement text for the current pattern.
    EnteringReplacement,
    /// Stepping through matches of a confirmed substitution.
    Confirming,
}

/// What a single event did to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No session was open; the event was not consumed.
    Inactive,
    /// The session consumed the event and stays open.
    Pending,
    /// The session ended keeping its results.
    Committed,
    /// The session ended and its effects were rolled back.
    Cancelled,
}

#[derive(Debug, Default)]
pub(crate) enum Prompt {
    #[default]
    Idle,
    Search {
        view: ViewId,
        saved_cursor: Position,
    },
    Replace {
        view: ViewId,
    },
    Confirm {
        view: ViewId,
        substitution: Substitution,
    },
}

impl Prompt {
    pub(crate) fn state(&self) -> ControllerState {
        match self {
            Prompt::Idle => ControllerState::Idle,
            Prompt::Search { .. } => ControllerState::Building,
            Prompt::Replace { .. } => ControllerState::EnteringReplacement,
            Prompt::Confirm { .. } => ControllerState::Confirming,
        }
    }
}

/// Open an incremental search on the active view.
pub(crate) fn start_search(session: &mut SearchSession, model: &mut EditorModel) {
    let view = model.active_view();
    let (id, saved_cursor) = (view.id, view.cursor);
    session.pattern.clear();
    session.registry.clear(id);
    let state = model.state_mut();
    state.mode = Mode::SearchPrompt;
    state.command_line.reset(&session.settings.prompt);
    session.prompt = Prompt::Search {
        view: id,
        saved_cursor,
    };
    tracing::debug!(
        target: "actions.interactive",
        view = id.0,
        line = saved_cursor.line,
        col = saved_cursor.col,
        "search_started"
    );
}

/// Open replacement-text entry for the current pattern.
pub(crate) fn start_replacement(
    session: &mut SearchSession,
    model: &mut EditorModel,
) -> Result<(), CommandError> {
    if !session.pattern.exists() {
        return Err(CommandError::NoPattern);
    }
    let id = model.active_view().id;
    let state = model.state_mut();
    state.mode = Mode::ReplacePrompt;
    state.command_line.reset(&session.settings.replace_prompt);
    session.prompt = Prompt::Replace { view: id };
    tracing::debug!(target: "actions.interactive", view = id.0, "replacement_started");
    Ok(())
}

/// Begin stepping through `substitution`, which must hold at least one match.
pub(crate) fn start_confirm(
    session: &mut SearchSession,
    model: &mut EditorModel,
    view: ViewId,
    substitution: Substitution,
) {
    let state = model.state_mut();
    state.mode = Mode::ConfirmReplace;
    state
        .command_line
        .reset(&confirm_prompt(&substitution.replacement()));
    if let Some(pos) = substitution.current_position() {
        set_cursor(model, view, pos);
    }
    tracing::debug!(
        target: "actions.interactive",
        view = view.0,
        pending = substitution.remaining(),
        "confirm_started"
    );
    session.prompt = Prompt::Confirm { view, substitution };
}

fn confirm_prompt(replacement: &str) -> String {
    format!("replace with {replacement} (y/n/a/q)?")
}

/// Feed one event to the open session, if any.
pub fn handle_event(
    session: &mut SearchSession,
    model: &mut EditorModel,
    event: InputEvent,
) -> Transition {
    let key = match event {
        InputEvent::Key(k) => k,
        InputEvent::CtrlC => KeyEvent::ctrl('c'),
    };
    let prompt = std::mem::take(&mut session.prompt);
    if let Prompt::Search { view, .. } | Prompt::Replace { view } | Prompt::Confirm { view, .. } =
        &prompt
        && model.view(*view).is_none()
    {
        tracing::debug!(target: "actions.interactive", view = view.0, "target_view_gone");
        close_prompt(model);
        return Transition::Cancelled;
    }
    match prompt {
        Prompt::Idle => Transition::Inactive,
        Prompt::Search { view, saved_cursor } => {
            search_key(session, model, view, saved_cursor, key)
        }
        Prompt::Replace { view } => replace_key(session, model, view, key),
        Prompt::Confirm { view, substitution } => {
            confirm_key(session, model, view, substitution, key)
        }
    }
}

fn close_prompt(model: &mut EditorModel) {
    let state = model.state_mut();
    state.mode = Mode::Normal;
    state.command_line.clear();
}

fn search_key(
    session: &mut SearchSession,
    model: &mut EditorModel,
    view: ViewId,
    saved_cursor: Position,
    key: KeyEvent,
) -> Transition {
    // Enter on an empty prompt has nothing to search for; leave quietly.
    let empty_commit = key.code == KeyCode::Enter && !session.pattern.exists();
    if key.is_interrupt() || empty_commit {
        session.pattern.clear();
        session.registry.clear(view);
        set_cursor(model, view, saved_cursor);
        close_prompt(model);
        tracing::debug!(target: "actions.interactive", view = view.0, empty_commit, "search_cancelled");
        return Transition::Cancelled;
    }
    if key.code == KeyCode::Enter {
        commit_search(session, model, view);
        return Transition::Committed;
    }
    session.prompt = Prompt::Search { view, saved_cursor };
    if !model.state_mut().command_line.take_key(&key) {
        return Transition::Pending;
    }
    session.pattern.set(model.state().command_line.buffer());
    let count = session.rescan(model, view).unwrap_or(0);
    let hit = session.goto_nearest(model, view, saved_cursor, Direction::Forward);
    if hit.is_none() {
        set_cursor(model, view, saved_cursor);
    }
    tracing::trace!(
        target: "actions.interactive",
        len = session.pattern.text().len(),
        count,
        "live_update"
    );
    Transition::Pending
}

fn commit_search(session: &mut SearchSession, model: &mut EditorModel, view: ViewId) {
    model.state_mut().command_line.commit_history();
    close_prompt(model);
    let outcome = if !session.pattern.is_compiled() {
        session.pattern.compile(false).err().map(|e| (Severity::Error, e.to_string()))
    } else if session.frame(view).is_none_or(|f| f.is_empty()) {
        Some((Severity::Info, PATTERN_NOT_FOUND.to_string()))
    } else {
        None
    };
    let count = session.frame(view).map_or(0, |f| f.len());
    tracing::debug!(target: "actions.interactive", view = view.0, count, "search_committed");
    if let Some((severity, msg)) = outcome {
        model.state_mut().report(severity, msg);
    }
}

fn replace_key(
    session: &mut SearchSession,
    model: &mut EditorModel,
    view: ViewId,
    key: KeyEvent,
) -> Transition {
    if key.is_interrupt() {
        close_prompt(model);
        tracing::debug!(target: "actions.interactive", view = view.0, "replacement_cancelled");
        return Transition::Cancelled;
    }
    if key.code != KeyCode::Enter {
        model.state_mut().command_line.take_key(&key);
        session.prompt = Prompt::Replace { view };
        return Transition::Pending;
    }
    let text = model.state().command_line.buffer().to_string();
    model.state_mut().command_line.commit_history();
    close_prompt(model);
    if let Err(err) = replace::replace_all(session, model, view, &text) {
        tracing::warn!(target: "actions.interactive", %err, "replacement_failed");
        model.state_mut().report(Severity::Error, err.to_string());
    }
    Transition::Committed
}

fn confirm_key(
    session: &mut SearchSession,
    model: &mut EditorModel,
    view: ViewId,
    mut substitution: Substitution,
    key: KeyEvent,
) -> Transition {
    let stop = key.is_interrupt() || key.printable() == Some('q');
    if !stop {
        let Some(idx) = model.view(view).map(|v| v.buffer_index) else {
            return Transition::Cancelled;
        };
        let Some(buffer) = model.state_mut().buffers.get_mut(idx) else {
            return Transition::Cancelled;
        };
        match key.printable() {
            Some('y') => {
                substitution.accept(buffer);
            }
            Some('n') => {
                substitution.skip();
            }
            Some('a') => {
                substitution.accept_all(buffer);
            }
            _ => {}
        }
        if substitution.applied() > 0 {
            model.state_mut().dirty = true;
        }
        if let Some(pos) = substitution.current_position() {
            set_cursor(model, view, pos);
            session.prompt = Prompt::Confirm { view, substitution };
            return Transition::Pending;
        }
    }
    let applied = substitution.applied();
    session.registry.clear(view);
    close_prompt(model);
    if let Some(buffer) = view_buffer(model, view)
        && let Some(v) = model.view(view)
    {
        let mut cursor = v.cursor;
        cursor.clamp_to(buffer.line_count(), |l| buffer.line_char_len(l));
        set_cursor(model, view, cursor);
    }
    tracing::debug!(
        target: "actions.interactive",
        view = view.0,
        applied,
        skipped_rest = substitution.remaining(),
        "confirm_finished"
    );
    model
        .state_mut()
        .report(Severity::Info, replace::substitution_message(applied));
    Transition::Committed
}
