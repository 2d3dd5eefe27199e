//! Alternate-screen terminal owned by the demo, restored on drop and on panic.

use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};

/// Raw-mode terminal painting the component view.
///
/// The shell's terminal comes back exactly once: when the session drops, or
/// from the panic hook if the frame loop panics first.
pub struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: Arc<AtomicBool>,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout
            .execute(EnterAlternateScreen)?
            .execute(Clear(ClearType::All))?
            .execute(Hide)?;

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        let restored = Arc::new(AtomicBool::new(false));
        install_panic_hook(Arc::clone(&restored));
        Ok(Self { terminal, restored })
    }

    /// Paint one frame.
    pub fn draw(&mut self, render: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(render).map(|_| ())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_once(&self.restored);
    }
}

fn install_panic_hook(restored: Arc<AtomicBool>) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_once(&restored);
        previous(info);
    }));
}

fn restore_once(restored: &AtomicBool) {
    if restored.swap(true, Ordering::SeqCst) {
        return;
    }
    if let Err(err) = restore() {
        tracing::warn!(%err, "failed to restore terminal");
    }
}

fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?.execute(Show)?;
    Ok(())
}
