//! Terminal writer.
//!
//! A short-lived command buffer per frame: the engine records primitive
//! operations and `flush` queues them to stdout in order with one final
//! flush, so a frame never appears half-drawn.
//!
//! Invariants:
//! * Commands preserve ordering; no flushing mid-frame.
//! * All positions are absolute with a (0,0) origin; caller ensures bounds.
//! * `ClearLine` clears with the most recent background colour, so callers
//!   set colours first to paint the full row.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{Write, stdout};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    ClearLine,
    Colors { fg: Color, bg: Color },
    Bold(bool),
    Print(String),
    ShowCursor(bool),
}

#[derive(Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }
    pub fn clear_line(&mut self) {
        self.cmds.push(Command::ClearLine);
    }
    pub fn colors(&mut self, fg: Color, bg: Color) {
        self.cmds.push(Command::Colors { fg, bg });
    }
    pub fn bold(&mut self, on: bool) {
        self.cmds.push(Command::Bold(on));
    }
    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }
    pub fn show_cursor(&mut self, show: bool) {
        self.cmds.push(Command::ShowCursor(show));
    }
    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }
    pub fn flush(self) -> Result<()> {
        let mut out = stdout();
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => queue!(out, MoveTo(x, y))?,
                Command::ClearLine => queue!(out, Clear(ClearType::CurrentLine))?,
                Command::Colors { fg, bg } => {
                    queue!(out, SetForegroundColor(fg), SetBackgroundColor(bg))?
                }
                Command::Bold(true) => queue!(out, SetAttribute(Attribute::Bold))?,
                Command::Bold(false) => queue!(out, SetAttribute(Attribute::NormalIntensity))?,
                Command::Print(s) => queue!(out, Print(s))?,
                Command::ShowCursor(true) => queue!(out, Show)?,
                Command::ShowCursor(false) => queue!(out, Hide)?,
            }
        }
        queue!(out, SetAttribute(Attribute::Reset))?;
        out.flush()?;
        Ok(())
    }
}
