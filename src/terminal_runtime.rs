use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Concrete terminal type used by the front end.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Raw mode plus alternate screen for the lifetime of one session.
///
/// Dropping the session restores the terminal best-effort.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Enters raw mode, switches to the alternate screen and hides the cursor.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(mut terminal) => {
                terminal.clear()?;
                Ok(Self { terminal })
            }
            Err(error) => {
                let _ = restore_terminal();
                Err(error)
            }
        }
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Chains a panic hook that leaves raw mode before the panic message prints.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}

fn restore_terminal() -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)
}
