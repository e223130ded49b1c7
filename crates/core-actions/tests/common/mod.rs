#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{DispatchResult, SearchSession, Transition, execute_command, handle_event};
use core_events::{InputEvent, KeyCode, KeyEvent};
use core_model::{EditorModel, View, ViewId};
use core_state::{EditorState, Severity};
use core_text::{Buffer, Position};

/// Editor with one buffer holding `text` and a single view.
pub struct Harness {
    pub session: SearchSession,
    pub model: EditorModel,
}

impl Harness {
    pub fn new(text: &str) -> Self {
        let state = EditorState::new(Buffer::from_str("t", text).unwrap());
        Self {
            session: SearchSession::default(),
            model: EditorModel::new(state),
        }
    }

    /// Same as `new`, with the cursor placed at `(line, col)`.
    pub fn at(text: &str, line: usize, col: usize) -> Self {
        let state = EditorState::new(Buffer::from_str("t", text).unwrap());
        let view = View::new(ViewId(0), 0, Position::new(line, col));
        Self {
            session: SearchSession::default(),
            model: EditorModel::with_view(view, state),
        }
    }

    pub fn run(&mut self, cmd: &str) -> DispatchResult {
        execute_command(cmd, &mut self.session, &mut self.model)
    }

    pub fn key(&mut self, code: KeyCode) -> Transition {
        self.event(KeyEvent::plain(code).into())
    }

    pub fn event(&mut self, event: InputEvent) -> Transition {
        handle_event(&mut self.session, &mut self.model, event)
    }

    /// Type each char of `text` into the open prompt.
    pub fn type_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.event(KeyEvent::char(ch).into());
        }
    }

    pub fn cursor(&self) -> Position {
        self.model.active_view().cursor
    }

    pub fn text(&self) -> String {
        self.model.active_view_buffer().unwrap().text()
    }

    pub fn active_id(&self) -> ViewId {
        self.model.active_view().id
    }

    pub fn match_count(&self) -> usize {
        self.session.frame(self.active_id()).map_or(0, |f| f.len())
    }

    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.model
            .state()
            .messages()
            .map(|e| (e.severity, e.text.clone()))
            .collect()
    }

    pub fn status(&self) -> Option<&str> {
        self.model.state().status_text()
    }
}
