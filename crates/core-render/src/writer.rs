//! Terminal writer: turns frame rows into a command list and emits it through
//! crossterm onto any `Write` sink.
//!
//! Design invariants:
//! * Commands preserve ordering; nothing is written until `flush_to`.
//! * A row that carries no styling emits its text only, with no escape codes.
//! * Every styled run is closed with a reset before the row ends, so rows can
//!   be concatenated without attribute bleed.

use crate::style::StyleAttr;
use crate::{Cell, CellFlags};
use anyhow::Result;
use crossterm::{
    queue,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use std::io::Write;

/// Visual treatment of a run of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Look {
    pub style: Option<StyleAttr>,
    pub reverse: bool,
}

impl Look {
    fn of(cell: &Cell) -> Self {
        Self {
            style: cell.style,
            reverse: cell.flags.contains(CellFlags::REVERSE),
        }
    }

    fn is_plain(&self) -> bool {
        *self == Look::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetLook(Look),
    Reset,
    Print(String),
    NewLine,
}

#[derive(Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn new_line(&mut self) {
        self.cmds.push(Command::NewLine);
    }

    /// Queue one row of cells, grouping adjacent cells with the same look.
    /// Trailing unstyled blanks are dropped.
    pub fn push_row(&mut self, cells: &[Cell]) {
        let visible = cells
            .iter()
            .rposition(|c| c.ch != ' ' || !Look::of(c).is_plain())
            .map_or(0, |i| i + 1);
        let mut current = Look::default();
        let mut run = String::new();
        for cell in &cells[..visible] {
            let look = Look::of(cell);
            if look != current {
                self.print(std::mem::take(&mut run));
                if !current.is_plain() {
                    self.cmds.push(Command::Reset);
                }
                if !look.is_plain() {
                    self.cmds.push(Command::SetLook(look));
                }
                current = look;
            }
            run.push(cell.ch);
        }
        self.print(run);
        if !current.is_plain() {
            self.cmds.push(Command::Reset);
        }
    }

    pub fn flush_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::SetLook(look) => apply_look(out, look)?,
                Command::Reset => queue!(out, SetAttribute(Attribute::Reset))?,
                Command::Print(s) => queue!(out, Print(s))?,
                Command::NewLine => queue!(out, Print("\n"))?,
            }
        }
        out.flush()?;
        Ok(())
    }
}

fn apply_look<W: Write>(out: &mut W, look: Look) -> Result<()> {
    match look.style {
        Some(StyleAttr::SearchMatch) => queue!(
            out,
            SetForegroundColor(Color::Black),
            SetBackgroundColor(Color::Yellow)
        )?,
        Some(StyleAttr::SearchMatchCursor) => queue!(
            out,
            SetForegroundColor(Color::Black),
            SetBackgroundColor(Color::Cyan)
        )?,
        None => {}
    }
    if look.reverse {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}
