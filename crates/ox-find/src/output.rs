//! Buffer output: plain text, or one highlighted row per line through the
//! render writer.

use anyhow::Result;
use core_actions::SearchSession;
use core_model::EditorModel;
use core_render::writer::Writer;
use core_render::{Frame, RenderMode, project_row};
use core_text::{Buffer, LineSource};
use std::io::Write;

pub(crate) fn write_plain<W: Write>(out: &mut W, model: &EditorModel) -> Result<()> {
    if let Some(buffer) = model.active_view_buffer() {
        out.write_all(buffer.text().as_bytes())?;
    }
    Ok(())
}

/// Lines to print. A final terminator does not start another line.
fn printed_lines(buffer: &Buffer) -> usize {
    let count = buffer.line_count();
    match buffer.line_text(count) {
        Some(last) if last.is_empty() && count > 1 => count - 1,
        _ => count,
    }
}

pub(crate) fn write_highlighted<W: Write>(
    out: &mut W,
    model: &EditorModel,
    session: &SearchSession,
    styled: bool,
) -> Result<()> {
    let Some(buffer) = model.active_view_buffer() else {
        return Ok(());
    };
    let view = model.active_view();
    let mode = RenderMode::from_styled(styled);
    let frame = session.frame(view.id);
    let mut writer = Writer::new();
    for line in 1..=printed_lines(buffer) {
        let mut row = Frame::from_source(buffer, line, buffer.line_char_len(line), 1);
        if let Some(matches) = frame {
            project_row(matches, line, Some(view.cursor), row.row_mut(0), mode);
        }
        writer.push_row(row.row(0));
        writer.new_line();
    }
    writer.flush_to(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_actions::execute_command;
    use core_state::EditorState;

    fn setup(text: &str) -> (EditorModel, SearchSession) {
        let model = EditorModel::new(EditorState::new(Buffer::from_str("t", text).unwrap()));
        (model, SearchSession::default())
    }

    fn render(model: &EditorModel, session: &SearchSession, styled: bool) -> String {
        let mut out = Vec::new();
        write_highlighted(&mut out, model, session, styled).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_output_is_buffer_text() {
        let (model, _) = setup("a\r\nb\n");
        let mut out = Vec::new();
        write_plain(&mut out, &model).unwrap();
        assert_eq!(out, b"a\r\nb\n");
    }

    #[test]
    fn no_matches_prints_lines_verbatim() {
        let (model, session) = setup("one\ntwo\n");
        assert_eq!(render(&model, &session, true), "one\ntwo\n");
    }

    #[test]
    fn matches_are_wrapped_in_escapes() {
        let (mut model, mut session) = setup("a fox\nno\n");
        execute_command("find-in-buffer fox", &mut session, &mut model);
        let s = render(&model, &session, false);
        assert!(s.starts_with("a \x1b[7m"));
        assert!(s.ends_with("no\n"));
    }

    #[test]
    fn very_long_lines_are_printed_whole() {
        let line = "a".repeat(70_000) + " fox";
        let (mut model, mut session) = setup(&line);
        execute_command("find-in-buffer fox", &mut session, &mut model);
        let s = render(&model, &session, false);
        assert!(s.starts_with(&"a".repeat(70_000)));
        assert!(s.contains("\x1b[7mfox"), "match past column 65535 is highlighted");
        assert!(s.ends_with('\n'));
    }

    #[test]
    fn printed_lines_ignores_final_terminator() {
        assert_eq!(printed_lines(&Buffer::from_str("t", "a\nb\n").unwrap()), 2);
        assert_eq!(printed_lines(&Buffer::from_str("t", "a\nb").unwrap()), 2);
        assert_eq!(printed_lines(&Buffer::from_str("t", "").unwrap()), 1);
    }
}
