//! `find-and-replace` and `replace-current-search`.

use super::DispatchResult;
use crate::error::CommandError;
use crate::interactive;
use crate::session::{PATTERN_NOT_FOUND, SearchSession};
use core_model::{EditorModel, ViewId};
use core_search::{ReplaceProperties, apply, parse, prepare};
use core_state::Severity;

pub(crate) fn find_and_replace(
    expression: &str,
    session: &mut SearchSession,
    model: &mut EditorModel,
) -> Result<DispatchResult, CommandError> {
    let cursor_line = model.active_view().cursor.line;
    let props = parse(expression, cursor_line)?;
    if let Some(text) = &props.pattern_override {
        session.pattern.set(text.as_str());
    }
    let view = model.active_view().id;
    substitute(session, model, view, &props)
}

pub(crate) fn replace_current_search(
    replacement: Option<&str>,
    session: &mut SearchSession,
    model: &mut EditorModel,
) -> Result<DispatchResult, CommandError> {
    let view = model.active_view().id;
    match replacement {
        None => {
            interactive::start_replacement(session, model)?;
            Ok(DispatchResult::dirty())
        }
        Some(text) => replace_all(session, model, view, text),
    }
}

/// Replace every match of the current pattern in `view`'s buffer.
pub(crate) fn replace_all(
    session: &mut SearchSession,
    model: &mut EditorModel,
    view: ViewId,
    replacement: &str,
) -> Result<DispatchResult, CommandError> {
    substitute(session, model, view, &ReplaceProperties::all_lines(replacement))
}

fn substitute(
    session: &mut SearchSession,
    model: &mut EditorModel,
    view: ViewId,
    props: &ReplaceProperties,
) -> Result<DispatchResult, CommandError> {
    let idx = model
        .view(view)
        .map(|v| v.buffer_index)
        .ok_or(CommandError::NoActiveBuffer)?;
    if props.is_confirm {
        let buffer = model.state().buffers.get(idx).ok_or(CommandError::NoActiveBuffer)?;
        let frame = session.registry.get_or_create(view);
        let substitution = prepare(&mut session.pattern, frame, buffer, props)?;
        if substitution.is_done() {
            model.state_mut().report(Severity::Info, PATTERN_NOT_FOUND);
            return Ok(DispatchResult::dirty());
        }
        interactive::start_confirm(session, model, view, substitution);
        return Ok(DispatchResult::dirty());
    }
    let buffer = model
        .state_mut()
        .buffers
        .get_mut(idx)
        .ok_or(CommandError::NoActiveBuffer)?;
    let frame = session.registry.get_or_create(view);
    let count = apply(&mut session.pattern, frame, buffer, props)?;
    if count == 0 {
        model.state_mut().report(Severity::Info, PATTERN_NOT_FOUND);
        return Ok(DispatchResult::dirty());
    }
    let state = model.state_mut();
    state.dirty = true;
    state.report(Severity::Info, substitution_message(count));
    model.clamp_cursor();
    Ok(DispatchResult::edited())
}

pub(crate) fn substitution_message(count: usize) -> String {
    match count {
        1 => "1 substitution".to_string(),
        n => format!("{n} substitutions"),
    }
}
