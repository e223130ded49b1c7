//! File IO helpers for loading a buffer and writing it back.
//!
//! Synchronous and minimal. Buffer text is written exactly as stored, so the
//! line endings of the original file survive an edit (substitution only ever
//! touches line content, never terminators).

use core_state::EditorState;
use core_text::Buffer;
use std::path::{Path, PathBuf};

/// Result of attempting to open a file.
#[derive(Debug)]
pub enum OpenFileResult {
    Success(OpenSuccess),
    Error, // already logged
}

pub struct OpenSuccess {
    pub buffer: Buffer,
    pub file_name: PathBuf,
}

impl std::fmt::Debug for OpenSuccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenSuccess")
            .field("file_name", &self.file_name)
            .field("lines", &self.buffer.line_count())
            .finish()
    }
}

/// Read `path` into a new buffer named after the file.
pub fn open_file(path: &Path) -> OpenFileResult {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(target: "io", path = %path.display(), ?e, "file_open_error");
            return OpenFileResult::Error;
        }
    };
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("file");
    match Buffer::from_str(name, &content) {
        Ok(buffer) => {
            tracing::debug!(target: "io", path = %path.display(), bytes = content.len(), "file_opened");
            OpenFileResult::Success(OpenSuccess {
                buffer,
                file_name: path.to_path_buf(),
            })
        }
        Err(e) => {
            tracing::error!(target: "io", ?e, "buffer_create_failed");
            OpenFileResult::Error
        }
    }
}

/// Result of a write attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum WriteFileResult {
    Success,
    NoFilename,
    NoBuffer,
    Error,
}

/// Write the active buffer to `target`, or to the state's file name.
pub fn write_file(state: &mut EditorState, target: Option<&Path>) -> WriteFileResult {
    let path = if let Some(p) = target {
        p.to_path_buf()
    } else if let Some(existing) = state.file_name.clone() {
        existing
    } else {
        return WriteFileResult::NoFilename;
    };
    let Some(buffer) = state.active_buffer() else {
        return WriteFileResult::NoBuffer;
    };
    match std::fs::write(&path, buffer.text()) {
        Ok(()) => {
            state.dirty = false; // mark clean after successful write
            WriteFileResult::Success
        }
        Err(e) => {
            tracing::error!(target: "io", path = %path.display(), ?e, "file_write_error");
            WriteFileResult::Error
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::LineSource;

    #[test]
    fn open_file_keeps_line_endings() {
        use std::io::Write;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        {
            let mut f = std::fs::File::create(&path).unwrap();
            write!(f, "line1\r\nline2\nline3\r\n").unwrap();
        }
        match open_file(&path) {
            OpenFileResult::Success(s) => {
                assert_eq!(s.buffer.line_text(1).as_deref(), Some("line1"));
                assert_eq!(s.buffer.text(), "line1\r\nline2\nline3\r\n");
                assert_eq!(s.buffer.name, "sample.txt");
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn open_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            open_file(&dir.path().join("absent.txt")),
            OpenFileResult::Error
        ));
    }

    #[test]
    fn write_file_round_trips_and_clears_dirty() {
        let buffer = Buffer::from_str("t", "a\r\nb\n").unwrap();
        let mut state = EditorState::new(buffer);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        state.file_name = Some(path.clone());
        state.dirty = true;
        assert_eq!(write_file(&mut state, None), WriteFileResult::Success);
        assert!(!state.dirty, "dirty cleared after write");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\r\nb\n");
    }

    #[test]
    fn write_file_no_filename() {
        let buffer = Buffer::from_str("t", "x").unwrap();
        let mut state = EditorState::new(buffer);
        state.dirty = true;
        assert_eq!(write_file(&mut state, None), WriteFileResult::NoFilename);
        assert!(state.dirty, "dirty unchanged when no filename");
    }
}
