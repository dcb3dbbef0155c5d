//! Terminal setup for the editor screen.
//!
//! [`Terminal::enter_guard`] switches to raw mode on the alternate screen with
//! bracketed paste enabled and returns a [`ScreenGuard`]. Dropping the guard
//! restores the shell's screen, including on early return or panic unwind.

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;

pub mod capabilities;
pub use capabilities::TerminalCapabilities;

#[derive(Debug, Default)]
pub struct Terminal {
    on_screen: bool,
}

/// Leaves the editor screen when dropped.
pub struct ScreenGuard<'a> {
    terminal: &'a mut Terminal,
}

impl Terminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on_screen(&self) -> bool {
        self.on_screen
    }

    pub fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(stdout(), SetTitle(title))?;
        Ok(())
    }

    pub fn enter_guard(&mut self) -> Result<ScreenGuard<'_>> {
        if !self.on_screen {
            enable_raw_mode()?;
            // Bracketed paste delivers a paste as one event.
            execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste)?;
            self.on_screen = true;
        }
        Ok(ScreenGuard { terminal: self })
    }

    fn restore(&mut self) -> Result<()> {
        if !self.on_screen {
            return Ok(());
        }
        self.on_screen = false;
        execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen, Show)?;
        disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for ScreenGuard<'_> {
    fn drop(&mut self) {
        let _ = self.terminal.restore();
    }
}
