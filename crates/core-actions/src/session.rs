//! Search session: the one live pattern, the per-view match registry, and the
//! interactive prompt state, owned together and passed by reference into every
//! command and key event.

use crate::interactive::{ControllerState, Prompt};
use core_config::{Config, SearchConfig};
use core_model::{EditorModel, ViewId, ViewObserver};
use core_search::{
    DEFAULT_SIZE_LIMIT, Direction, MatchFrame, MatchRegistry, NavHit, Pattern, nearest, scan,
};
use core_text::{Buffer, Position};

use crate::error::CommandError;

/// Reported when a search or substitution finds nothing.
pub const PATTERN_NOT_FOUND: &str = "pattern not found";

/// Search behavior taken from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub prompt: String,
    pub replace_prompt: String,
    pub wrap_notice: bool,
    pub size_limit: usize,
}

impl SearchSettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self::from_search(&cfg.file.search, cfg.search_size_limit())
    }

    fn from_search(search: &SearchConfig, size_limit: usize) -> Self {
        Self {
            prompt: search.prompt.clone(),
            replace_prompt: search.replace_prompt.clone(),
            wrap_notice: search.wrap_notice,
            size_limit,
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::from_search(&SearchConfig::default(), DEFAULT_SIZE_LIMIT)
    }
}

#[derive(Debug)]
pub struct SearchSession {
    pub(crate) pattern: Pattern,
    pub(crate) registry: MatchRegistry<ViewId>,
    pub(crate) settings: SearchSettings,
    pub(crate) prompt: Prompt,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(SearchSettings::default())
    }
}

impl SearchSession {
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            pattern: Pattern::with_size_limit(settings.size_limit),
            registry: MatchRegistry::new(),
            settings,
            prompt: Prompt::Idle,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(SearchSettings::from_config(cfg))
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Matches currently held for `view`, for highlighting.
    pub fn frame(&self, view: ViewId) -> Option<&MatchFrame> {
        self.registry.get(view)
    }

    pub fn registry(&self) -> &MatchRegistry<ViewId> {
        &self.registry
    }

    pub fn controller_state(&self) -> ControllerState {
        self.prompt.state()
    }

    /// True while a prompt or confirm session owns the keyboard.
    pub fn is_interactive(&self) -> bool {
        !matches!(self.prompt, Prompt::Idle)
    }

    /// Compile the pattern case-sensitively and rescan `view` in global mode.
    /// The view's old matches are dropped even when compiling fails.
    pub(crate) fn rescan(&mut self, model: &EditorModel, view: ViewId) -> Result<usize, CommandError> {
        let buffer = view_buffer(model, view).ok_or(CommandError::NoActiveBuffer)?;
        let frame = self.registry.get_or_create(view);
        frame.clear();
        let matcher = self.pattern.compile_matcher(false)?;
        Ok(scan(frame, matcher, buffer, true))
    }

    /// Move `view`'s cursor to the match nearest `from`. Leaves the cursor
    /// alone and returns `None` when the view holds no matches.
    pub(crate) fn goto_nearest(
        &self,
        model: &mut EditorModel,
        view: ViewId,
        from: Position,
        direction: Direction,
    ) -> Option<NavHit> {
        let hit = nearest(self.registry.get(view)?, from, direction)?;
        set_cursor(model, view, hit.position);
        Some(hit)
    }
}

impl ViewObserver for SearchSession {
    fn view_closed(&mut self, id: ViewId) {
        self.registry.remove(id);
    }
}

/// Buffer shown by `view`.
pub(crate) fn view_buffer(model: &EditorModel, view: ViewId) -> Option<&Buffer> {
    let idx = model.view(view)?.buffer_index;
    model.state().buffers.get(idx)
}

/// Place `view`'s cursor, clamped into the buffer when it is the focused view.
pub(crate) fn set_cursor(model: &mut EditorModel, view: ViewId, pos: Position) {
    let Some(v) = model.view_mut(view) else {
        return;
    };
    v.cursor = pos;
    if model.active_view().id == view {
        model.clamp_cursor();
    }
}
