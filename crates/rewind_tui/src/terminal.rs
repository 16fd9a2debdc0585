//! Raw-mode and alternate-screen setup with guaranteed teardown.

use crossterm::{
    cursor, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io;
use tracing::{debug, info, warn};

/// Restores the terminal on drop, including during a panic unwind.
pub struct TerminalGuard {
    restore: fn() -> io::Result<()>,
}

impl TerminalGuard {
    /// Switches stdout to raw mode on the alternate screen.
    pub fn enter() -> io::Result<Self> {
        Self::enter_with(enter_terminal, restore_terminal)
    }

    /// Runs `enter` with `restore` already armed, so a setup step that
    /// fails halfway still gets undone.
    pub fn enter_with(
        enter: impl FnOnce() -> io::Result<()>,
        restore: fn() -> io::Result<()>,
    ) -> io::Result<Self> {
        let guard = Self { restore };
        enter()?;
        debug!("Terminal switched to raw mode");
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        info!("Restoring terminal");
        if let Err(err) = (self.restore)() {
            warn!(error = %err, "Failed to restore terminal");
        }
    }
}

fn enter_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)
}

fn restore_terminal() -> io::Result<()> {
    // Attempt every step even if an earlier one fails.
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
    raw.and(screen)
}
