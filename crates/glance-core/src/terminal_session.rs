#![forbid(unsafe_code)]

//! Terminal ownership for the lifetime of the screen.
//!
//! [`TerminalSession`] switches on the terminal modes the screen needs and
//! keeps them on a stack. Dropping the session pops the stack, so modes are
//! undone in reverse order on normal return, on `?`, and while unwinding.
//! A panic hook and a SIGINT/SIGTERM watcher cover the paths where `Drop`
//! never runs.
//!
//! ```no_run
//! use glance_core::terminal_session::{SessionOptions, TerminalSession};
//!
//! let session = TerminalSession::new(SessionOptions {
//!     alternate_screen: true,
//!     mouse_capture: true,
//! })?;
//! // ... run the screen ...
//! drop(session);
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Duration;

use crossterm::{cursor, event, terminal};
#[cfg(unix)]
use signal_hook::consts::signal::{SIGINT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

use crate::event::Event;

/// Which optional modes to enable. Raw mode and the hidden cursor are
/// always on.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Draw on the alternate screen. Off for inline mode.
    pub alternate_screen: bool,
    /// Report mouse presses.
    pub mouse_capture: bool,
}

/// A terminal mode the session can switch on and must switch off again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Raw,
    AlternateScreen,
    MouseCapture,
    HiddenCursor,
}

impl Mode {
    /// Every mode in enable order.
    const ALL: [Mode; 4] = [
        Mode::Raw,
        Mode::AlternateScreen,
        Mode::MouseCapture,
        Mode::HiddenCursor,
    ];

    fn enable(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Mode::Raw => terminal::enable_raw_mode(),
            Mode::AlternateScreen => crossterm::execute!(out, terminal::EnterAlternateScreen),
            Mode::MouseCapture => crossterm::execute!(out, event::EnableMouseCapture),
            Mode::HiddenCursor => crossterm::execute!(out, cursor::Hide),
        }
    }

    fn disable(self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Mode::Raw => terminal::disable_raw_mode(),
            Mode::AlternateScreen => crossterm::execute!(out, terminal::LeaveAlternateScreen),
            Mode::MouseCapture => crossterm::execute!(out, event::DisableMouseCapture),
            Mode::HiddenCursor => crossterm::execute!(out, cursor::Show),
        }
    }
}

/// Owns raw mode and friends until dropped. Keep one alive at a time.
#[derive(Debug)]
pub struct TerminalSession {
    enabled: Vec<Mode>,
    #[cfg(unix)]
    signals: Option<SignalGuard>,
}

impl TerminalSession {
    /// Take over the terminal.
    ///
    /// # Errors
    ///
    /// Fails if a mode cannot be switched on. Modes already enabled are
    /// switched off again before the error is returned.
    pub fn new(options: SessionOptions) -> io::Result<Self> {
        install_panic_hook();

        let mut session = Self {
            enabled: Vec::with_capacity(Mode::ALL.len()),
            #[cfg(unix)]
            signals: None,
        };

        let mut stdout = io::stdout();
        for mode in Mode::ALL {
            let wanted = match mode {
                Mode::AlternateScreen => options.alternate_screen,
                Mode::MouseCapture => options.mouse_capture,
                Mode::Raw | Mode::HiddenCursor => true,
            };
            if wanted {
                mode.enable(&mut stdout)?;
                tracing::info!(?mode, "terminal mode enabled");
                session.enabled.push(mode);
            }
        }

        #[cfg(unix)]
        {
            session.signals = Some(SignalGuard::new()?);
        }
        Ok(session)
    }

    /// Terminal size as `(columns, rows)`.
    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Wait up to `timeout` for input. `Ok(false)` on timeout.
    pub fn poll_event(&self, timeout: Duration) -> io::Result<bool> {
        event::poll(timeout)
    }

    /// Read one event, blocking. `Ok(None)` for events that are not forwarded.
    pub fn read_event(&self) -> io::Result<Option<Event>> {
        Ok(Event::from_crossterm(event::read()?))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        #[cfg(unix)]
        drop(self.signals.take());

        let mut stdout = io::stdout();
        while let Some(mode) = self.enabled.pop() {
            if let Err(err) = mode.disable(&mut stdout) {
                tracing::warn!(?mode, %err, "failed to restore terminal mode");
            }
        }
        let _ = stdout.flush();
        tracing::info!("terminal restored");
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_all();
            previous(info);
        }));
    });
}

/// Switch every mode off without knowing which ones are on.
fn restore_all() {
    let mut stdout = io::stdout();
    for mode in Mode::ALL.into_iter().rev() {
        let _ = mode.disable(&mut stdout);
    }
    let _ = stdout.flush();
}

/// Restores the terminal and exits when the process is told to stop.
#[cfg(unix)]
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    watcher: Option<std::thread::JoinHandle<()>>,
}

#[cfg(unix)]
impl SignalGuard {
    fn new() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let watcher = std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                tracing::warn!(signal, "termination signal received");
                restore_all();
                std::process::exit(128 + signal);
            }
        });
        Ok(Self {
            handle,
            watcher: Some(watcher),
        })
    }
}

#[cfg(unix)]
impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(watcher) = self.watcher.take() {
            let _ = watcher.join();
        }
    }
}
