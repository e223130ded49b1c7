//! Single-line prompt widget used for pattern and replacement entry.
//!
//! The widget owns the prompt, the text typed so far, a character cursor and
//! a bounded history of committed entries. Callers `reset` it when a prompt
//! opens, feed keys through `take_key`, and read the text back with `buffer`.

use core_events::{KeyCode, KeyEvent};

/// Committed entries kept for Up/Down recall.
pub const HISTORY_MAX: usize = 100;

#[derive(Debug, Default, Clone)]
pub struct CommandLineState {
    prompt: String,
    buf: String,
    /// Cursor in chars, `0..=buf.chars().count()`.
    cursor: usize,
    active: bool,
    history: Vec<String>,
    /// Index into `history` while recalling; `None` while editing fresh text.
    recall: Option<usize>,
    /// Text being edited before recall started, restored when Down walks past the newest entry.
    draft: String,
}

impl CommandLineState {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn buffer(&self) -> &str {
        &self.buf
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Open a fresh prompt: empties the text and shows `prompt`.
    pub fn reset(&mut self, prompt: &str) {
        self.prompt.clear();
        self.prompt.push_str(prompt);
        self.buf.clear();
        self.cursor = 0;
        self.recall = None;
        self.draft.clear();
        self.active = true;
    }

    /// Close the prompt. History survives.
    pub fn clear(&mut self) {
        self.prompt.clear();
        self.buf.clear();
        self.cursor = 0;
        self.recall = None;
        self.active = false;
    }

    /// Apply one editing key. Returns true when the text changed.
    ///
    /// Enter, Esc and other control keys are not consumed here; the owner of
    /// the prompt decides what they mean.
    pub fn take_key(&mut self, key: &KeyEvent) -> bool {
        if let Some(ch) = key.printable() {
            self.insert(ch);
            return true;
        }
        match key.code {
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.remove_at(self.cursor);
                true
            }
            KeyCode::Delete if self.cursor < self.char_len() => {
                self.remove_at(self.cursor);
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                false
            }
            KeyCode::Home => {
                self.cursor = 0;
                false
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                false
            }
            KeyCode::Up => self.recall_older(),
            KeyCode::Down => self.recall_newer(),
            _ => false,
        }
    }

    /// Remember the current text for recall. Empty text and immediate
    /// repeats are not stored.
    pub fn commit_history(&mut self) {
        if self.buf.is_empty() || self.history.last().is_some_and(|h| *h == self.buf) {
            return;
        }
        if self.history.len() == HISTORY_MAX {
            self.history.remove(0);
        }
        self.history.push(self.buf.clone());
        self.recall = None;
    }

    /// Prompt followed by the text, as shown on the status row.
    pub fn render(&self) -> String {
        format!("{}{}", self.prompt, self.buf)
    }

    fn char_len(&self) -> usize {
        self.buf.chars().count()
    }

    fn byte_at(&self, col: usize) -> usize {
        self.buf
            .char_indices()
            .nth(col)
            .map_or(self.buf.len(), |(i, _)| i)
    }

    fn insert(&mut self, ch: char) {
        let at = self.byte_at(self.cursor);
        self.buf.insert(at, ch);
        self.cursor += 1;
    }

    fn remove_at(&mut self, col: usize) {
        let at = self.byte_at(col);
        if at < self.buf.len() {
            self.buf.remove(at);
        }
    }

    fn set_text(&mut self, text: String) {
        self.buf = text;
        self.cursor = self.char_len();
    }

    fn recall_older(&mut self) -> bool {
        let next = match self.recall {
            None if self.history.is_empty() => return false,
            None => {
                self.draft = self.buf.clone();
                self.history.len() - 1
            }
            Some(0) => return false,
            Some(i) => i - 1,
        };
        self.recall = Some(next);
        self.set_text(self.history[next].clone());
        true
    }

    fn recall_newer(&mut self) -> bool {
        let Some(i) = self.recall else {
            return false;
        };
        if i + 1 < self.history.len() {
            self.recall = Some(i + 1);
            self.set_text(self.history[i + 1].clone());
        } else {
            self.recall = None;
            let draft = std::mem::take(&mut self.draft);
            self.set_text(draft);
        }
        true
    }
}
