//! `find-in-buffer`, `find-next-in-buffer`, `find-prev-in-buffer`.

use super::DispatchResult;
use crate::error::CommandError;
use crate::interactive;
use crate::session::{PATTERN_NOT_FOUND, SearchSession};
use core_model::{EditorModel, ViewId};
use core_search::Direction;
use core_state::Severity;

pub(crate) fn find_in_buffer(
    pattern: Option<&str>,
    session: &mut SearchSession,
    model: &mut EditorModel,
) -> Result<DispatchResult, CommandError> {
    let Some(text) = pattern else {
        interactive::start_search(session, model);
        return Ok(DispatchResult::dirty());
    };
    session.pattern.set(text);
    let view = model.active_view().id;
    session.rescan(model, view)?;
    Ok(jump(session, model, view, Direction::Forward))
}

/// Step to the next or previous match of the stored pattern. The view is
/// rescanned first when it holds no matches (a substitution or another view
/// may have consumed them).
pub(crate) fn find_adjacent(
    direction: Direction,
    session: &mut SearchSession,
    model: &mut EditorModel,
) -> Result<DispatchResult, CommandError> {
    if !session.pattern.exists() {
        return Err(CommandError::NoPattern);
    }
    let view = model.active_view().id;
    if session.frame(view).is_none_or(|f| f.is_empty()) {
        session.rescan(model, view)?;
    }
    Ok(jump(session, model, view, direction))
}

fn jump(
    session: &SearchSession,
    model: &mut EditorModel,
    view: ViewId,
    direction: Direction,
) -> DispatchResult {
    let from = model.active_view().cursor;
    match session.goto_nearest(model, view, from, direction) {
        None => {
            model.state_mut().report(Severity::Info, PATTERN_NOT_FOUND);
        }
        Some(hit) if hit.wrapped && session.settings.wrap_notice => {
            model
                .state_mut()
                .report(Severity::Warning, direction.wrap_notice());
        }
        Some(_) => {}
    }
    DispatchResult::dirty()
}
