//! High-level editor model: views onto shared buffers.
//!
//! A `View` owns a cursor onto one buffer held by `EditorState`. Several
//! views may show the same buffer with independent cursors; search results
//! are tracked per view, keyed by [`ViewId`].
//!
//! Core invariants (must hold after every public call):
//! * `views` is never empty; closing the last view is refused.
//! * The active index always names a live view.
//! * `views[i].buffer_index` names an existing buffer inside `EditorState`.
//! * View ids are never reused within one model, so stale ids held by other
//!   components resolve to nothing instead of to a different view.
//!
//! Lines are 1-based throughout, matching `core_text::Position`.

use core_state::EditorState;
use core_text::{Buffer, Position};

/// Stable identifier for a `View`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub usize);

#[derive(Debug, Clone)]
pub struct View {
    pub id: ViewId,
    pub buffer_index: usize,
    pub cursor: Position,
}

impl View {
    pub fn new(id: ViewId, buffer_index: usize, cursor: Position) -> Self {
        Self {
            id,
            buffer_index,
            cursor,
        }
    }
}

/// Notified when a view goes away so per-view data can be dropped.
pub trait ViewObserver {
    fn view_closed(&mut self, id: ViewId);
}

/// Owner of the view collection and focus.
#[derive(Debug)]
pub struct ViewManager {
    views: Vec<View>,
    active: usize,
    next_id: usize,
}

impl ViewManager {
    pub fn new_single(initial: View) -> Self {
        let next_id = initial.id.0 + 1;
        Self {
            views: vec![initial],
            active: 0,
            next_id,
        }
    }

    pub fn active_view(&self) -> &View {
        debug_assert!(self.active < self.views.len(), "active index in range");
        &self.views[self.active]
    }

    pub fn active_view_mut(&mut self) -> &mut View {
        debug_assert!(self.active < self.views.len(), "active index in range");
        &mut self.views[self.active]
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn get(&self, id: ViewId) -> Option<&View> {
        self.views.iter().find(|v| v.id == id)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.views.iter_mut().find(|v| v.id == id)
    }

    /// Add a view onto `buffer_index` with the cursor at the origin. The new
    /// view does not take focus.
    pub fn open(&mut self, buffer_index: usize) -> ViewId {
        let id = ViewId(self.next_id);
        self.next_id += 1;
        self.views
            .push(View::new(id, buffer_index, Position::origin()));
        id
    }

    /// Remove a view. The last remaining view cannot be closed.
    pub fn close(&mut self, id: ViewId) -> Option<View> {
        if self.views.len() == 1 {
            return None;
        }
        let idx = self.views.iter().position(|v| v.id == id)?;
        let view = self.views.remove(idx);
        if self.active > idx || self.active == self.views.len() {
            self.active = self.active.saturating_sub(1);
        }
        Some(view)
    }

    /// Move focus to `id`. Returns false for unknown ids.
    pub fn focus(&mut self, id: ViewId) -> bool {
        match self.views.iter().position(|v| v.id == id) {
            Some(idx) => {
                self.active = idx;
                true
            }
            None => false,
        }
    }
}

pub struct EditorModel {
    state: EditorState,
    view_mgr: ViewManager,
}

impl EditorModel {
    pub fn new(state: EditorState) -> Self {
        let v = View::new(ViewId(0), state.active, Position::origin());
        Self::with_view(v, state)
    }

    /// Constructor allowing an already prepared view (cursor) to be injected.
    pub fn with_view(view: View, state: EditorState) -> Self {
        Self {
            state,
            view_mgr: ViewManager::new_single(view),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn active_view(&self) -> &View {
        self.view_mgr.active_view()
    }

    pub fn active_view_mut(&mut self) -> &mut View {
        self.view_mgr.active_view_mut()
    }

    pub fn views(&self) -> &[View] {
        self.view_mgr.views()
    }

    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.view_mgr.get(id)
    }

    pub fn view_mut(&mut self, id: ViewId) -> Option<&mut View> {
        self.view_mgr.get_mut(id)
    }

    /// Open another view onto `buffer_index`.
    pub fn open_view(&mut self, buffer_index: usize) -> ViewId {
        let id = self.view_mgr.open(buffer_index);
        tracing::debug!(target: "model.views", view = id.0, buffer_index, "view_opened");
        id
    }

    /// Close a view and tell `observer` so it can drop per-view data.
    pub fn close_view(&mut self, id: ViewId, observer: &mut dyn ViewObserver) -> Option<View> {
        let view = self.view_mgr.close(id)?;
        observer.view_closed(id);
        self.state.active = self.view_mgr.active_view().buffer_index;
        tracing::debug!(target: "model.views", view = id.0, "view_closed");
        Some(view)
    }

    /// Focus a view; the active buffer follows the focused view.
    pub fn focus_view(&mut self, id: ViewId) -> bool {
        if !self.view_mgr.focus(id) {
            return false;
        }
        self.state.active = self.view_mgr.active_view().buffer_index;
        true
    }

    /// Buffer shown by the active view.
    pub fn active_view_buffer(&self) -> Option<&Buffer> {
        self.state.buffers.get(self.active_view().buffer_index)
    }

    /// Clamp the active cursor into its buffer after an edit shortened it.
    pub fn clamp_cursor(&mut self) {
        let (state, view) = self.split_state_and_active_view();
        if let Some(buf) = state.buffers.get(view.buffer_index) {
            view.cursor
                .clamp_to(buf.line_count(), |l| buf.line_char_len(l));
        }
    }

    /// Mutable references to the `EditorState` and the active `View` at once.
    /// `state` and `view_mgr` are disjoint fields, so plain field borrows suffice.
    pub fn split_state_and_active_view(&mut self) -> (&mut EditorState, &mut View) {
        (&mut self.state, self.view_mgr.active_view_mut())
    }
}
