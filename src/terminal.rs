//! Terminal detection and exclusive-mode plumbing.

use std::io::{self, IsTerminal, Write};

use crossterm::ExecutableCommand;
use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};

/// Get the terminal size (width, height) in cells.
///
/// Returns `None` if the terminal size cannot be determined.
#[must_use]
pub fn get_terminal_size() -> Option<(usize, usize)> {
    crossterm::terminal::size()
        .ok()
        .map(|(w, h)| (w as usize, h as usize))
}

/// Get the terminal width in cells, defaulting to 80.
#[must_use]
pub fn get_terminal_width() -> usize {
    get_terminal_size().map_or(80, |(w, _)| w)
}

/// Get the terminal height in rows, defaulting to 24.
#[must_use]
pub fn get_terminal_height() -> usize {
    get_terminal_size().map_or(24, |(_, h)| h)
}

/// Check if stdout is connected to a terminal.
#[must_use]
pub fn is_terminal() -> bool {
    io::stdout().is_terminal()
}

/// Check if TERM is set to "dumb".
#[must_use]
pub fn is_dumb_terminal() -> bool {
    std::env::var("TERM").ok().is_some_and(|term| {
        let term = term.to_lowercase();
        term == "dumb" || term == "unknown"
    })
}

/// Whether color output should be produced.
///
/// `NO_COLOR` (<https://no-color.org/>), dumb terminals and non-tty
/// stdout all disable colors.
#[must_use]
pub fn colors_enabled() -> bool {
    if std::env::var("NO_COLOR")
        .ok()
        .is_some_and(|value| !value.is_empty())
    {
        return false;
    }
    is_terminal() && !is_dumb_terminal()
}

/// Exclusive hold on the interactive terminal.
///
/// Entering acquires raw input mode, switches to the alternate screen
/// and hides the cursor. `Drop` undoes all three, so every exit path
/// (early return, `?`, panic unwind) hands the terminal back in cooked
/// mode. This is the one invariant the selection engine must never
/// violate.
#[derive(Debug)]
pub struct RawModeGuard(());

impl RawModeGuard {
    /// Enter raw mode and the alternate screen.
    pub fn acquire() -> io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        // Screen setup is cosmetic; raw mode is the part that must pair
        // with the Drop below.
        let _ = out.execute(EnterAlternateScreen);
        let _ = out.execute(Hide);
        Ok(Self(()))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = out.execute(Show);
        let _ = out.execute(LeaveAlternateScreen);
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = out.flush();
    }
}
