//! Terminal detection for UI decisions.

use std::io::IsTerminal;

use super::mode::OutputMode;

const FALLBACK_WIDTH: usize = 80;

/// Output-related flags for one command invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UiFlags<'a> {
    pub json: bool,
    pub format: Option<&'a str>,
    pub no_color: bool,
    pub ascii: bool,
}

/// What the process can observe about its terminal.
#[derive(Debug, Clone, Copy)]
pub struct Terminal {
    pub stdout_tty: bool,
    pub dumb: bool,
    pub no_color_env: bool,
    pub width: Option<usize>,
}

impl Terminal {
    pub fn detect() -> Self {
        Self {
            stdout_tty: std::io::stdout().is_terminal(),
            dumb: std::env::var("TERM").is_ok_and(|v| v == "dumb"),
            no_color_env: std::env::var_os("NO_COLOR").is_some(),
            width: columns_env().or_else(ioctl_width),
        }
    }
}

/// Resolved presentation settings shared by every renderer.
#[derive(Debug, Clone)]
pub struct UiContext {
    pub is_tty: bool,
    pub color: bool,
    pub unicode: bool,
    /// Terminal width in columns
    pub width: usize,
    pub mode: OutputMode,
}

impl UiContext {
    pub fn new(flags: UiFlags<'_>, term: Terminal) -> Self {
        let color = term.stdout_tty && !(flags.no_color || term.no_color_env || term.dumb);
        Self {
            is_tty: term.stdout_tty,
            color,
            unicode: !flags.ascii,
            width: term.width.unwrap_or(FALLBACK_WIDTH),
            mode: OutputMode::resolve(flags.json, flags.format, term.stdout_tty, term.dumb),
        }
    }

    pub fn detect(flags: UiFlags<'_>) -> Self {
        Self::new(flags, Terminal::detect())
    }

    /// Confirmation prompts need a terminal on stdin as well.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && std::io::stdin().is_terminal()
    }

    /// Spinners only run in pretty mode on a terminal.
    pub fn allows_animation(&self) -> bool {
        self.is_tty && self.mode.is_pretty()
    }
}

fn columns_env() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.trim().parse::<usize>().ok())
        .filter(|width| *width > 0)
}

#[cfg(unix)]
fn ioctl_width() -> Option<usize> {
    use std::mem::MaybeUninit;

    let mut winsize = MaybeUninit::<libc::winsize>::uninit();
    // SAFETY: TIOCGWINSZ only writes into the provided winsize
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, winsize.as_mut_ptr()) };
    if result != 0 {
        return None;
    }
    let ws = unsafe { winsize.assume_init() };
    (ws.ws_col > 0).then_some(ws.ws_col as usize)
}

#[cfg(not(unix))]
fn ioctl_width() -> Option<usize> {
    None
}
