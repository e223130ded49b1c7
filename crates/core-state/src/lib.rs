//! Editor state: buffer collection, mode, prompt widget, and status reporting.
//!
//! View geometry and cursors live in `core-model`; this crate stays
//! buffer-centric. Everything user facing that a command wants to say goes
//! through [`EditorState::report`], which sets the status line and appends
//! to the message log in one step. The status line keeps the latest report
//! until the next one replaces it.

use core_text::Buffer;
use std::collections::VecDeque;
use std::path::PathBuf;

pub mod command_line;
pub use command_line::{CommandLineState, HISTORY_MAX};

/// Entries retained in the message log before the oldest are dropped.
pub const MESSAGE_LOG_MAX: usize = 256;

/// Current editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal command/navigation mode.
    Normal,
    /// Typing an incremental search pattern.
    SearchPrompt,
    /// Typing replacement text for the current search.
    ReplacePrompt,
    /// Stepping through matches of a confirmed substitution.
    ConfirmReplace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub severity: Severity,
    pub text: String,
}

/// Top-level editor state container.
pub struct EditorState {
    pub buffers: Vec<Buffer>,
    pub active: usize,
    pub mode: Mode,
    pub file_name: Option<PathBuf>,
    pub dirty: bool,
    pub command_line: CommandLineState,
    /// Most recent report, shown on the status line.
    pub status: Option<LogEntry>,
    messages: VecDeque<LogEntry>,
}

impl EditorState {
    /// Create a new state with a single active buffer.
    pub fn new(buffer: Buffer) -> Self {
        let mut st = Self::empty();
        st.buffers.push(buffer);
        st
    }

    /// State with no buffers loaded.
    pub fn empty() -> Self {
        Self {
            buffers: Vec::new(),
            active: 0,
            mode: Mode::Normal,
            file_name: None,
            dirty: false,
            command_line: CommandLineState::default(),
            status: None,
            messages: VecDeque::new(),
        }
    }

    /// Add a buffer and make it active. Returns its index.
    pub fn open_buffer(&mut self, buffer: Buffer) -> usize {
        self.buffers.push(buffer);
        self.active = self.buffers.len() - 1;
        self.active
    }

    pub fn active_buffer(&self) -> Option<&Buffer> {
        self.buffers.get(self.active)
    }

    /// Mutable accessor for the active buffer. Text mutations flow through
    /// here so dirty tracking stays in one place.
    pub fn active_buffer_mut(&mut self) -> Option<&mut Buffer> {
        self.buffers.get_mut(self.active)
    }

    /// Show `msg` on the status line and append it to the message log.
    pub fn report<S: Into<String>>(&mut self, severity: Severity, msg: S) {
        let text = msg.into();
        tracing::trace!(target: "state.status", ?severity, len = text.len(), "report");
        if self.messages.len() == MESSAGE_LOG_MAX {
            self.messages.pop_front();
        }
        let entry = LogEntry { severity, text };
        self.messages.push_back(entry.clone());
        self.status = Some(entry);
    }

    /// Current status text, if any.
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|m| m.text.as_str())
    }

    pub fn messages(&self) -> impl Iterator<Item = &LogEntry> {
        self.messages.iter()
    }

    /// Remove and return every logged message, oldest first.
    pub fn drain_messages(&mut self) -> Vec<LogEntry> {
        self.messages.drain(..).collect()
    }
}
