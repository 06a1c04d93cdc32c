use std::{
    io::{stderr, IsTerminal, Stderr, Write},
    ops::{Deref, DerefMut},
    panic,
};

use crossterm::{
    cursor::Show,
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use ratatui::{self, backend::CrosstermBackend};

type TerminalBackend<W> = ratatui::Terminal<CrosstermBackend<W>>;

/// Full-screen terminal on stderr, so stdout stays free for the chosen host.
/// The previous screen is restored when this is dropped.
pub struct Terminal<W: Write> {
    inner: TerminalBackend<W>,
}

impl Terminal<Stderr> {
    pub fn new() -> anyhow::Result<Self> {
        anyhow::ensure!(stderr().is_terminal(), "stderr is not a terminal");

        enable_raw_mode()?;
        match Self::enter() {
            Ok(inner) => Result::Ok(Self { inner }),
            Err(err) => {
                let _ = restore_terminal();
                Err(err)
            }
        }
    }

    fn enter() -> anyhow::Result<TerminalBackend<Stderr>> {
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, Clear(ClearType::All))?;

        let backend = CrosstermBackend::new(stderr);
        let terminal = ratatui::Terminal::new(backend)?;
        Ok(terminal)
    }
}

impl<W: Write> Deref for Terminal<W> {
    type Target = TerminalBackend<W>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<W: Write> DerefMut for Terminal<W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Restores the screen before the panic message is printed, otherwise the
/// report is lost on the alternate screen.
pub fn install_panic_hook() {
    let hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        hook(info);
    }));
}

fn restore_terminal() -> anyhow::Result<()> {
    let mut stderr = stderr();
    execute!(stderr, LeaveAlternateScreen, Show)?;
    disable_raw_mode()?;
    Ok(())
}
