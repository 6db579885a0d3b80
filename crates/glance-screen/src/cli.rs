#![forbid(unsafe_code)]

//! Command-line options.
//!
//! Every flag can also come from a `GLANCE_*` environment variable; an
//! explicit flag wins.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use glance_runtime::{ProgramConfig, ScreenMode};

use crate::state::Capabilities;

/// Default rows for inline mode.
pub const DEFAULT_UI_HEIGHT: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScreenModeArg {
    /// Full screen on the alternate buffer.
    Alt,
    /// A fixed-height region at the bottom of the scrollback.
    Inline,
}

/// A greeting with the time, the place and a few calendar facts.
#[derive(Debug, Clone, Parser)]
#[command(name = "glance", version, about)]
pub struct Opts {
    /// Hide the dark-mode switch and keep the light palette.
    #[arg(long, env = "GLANCE_NO_DARK_MODE")]
    pub no_dark_mode: bool,

    /// Load Inter-Regular.ttf and Inter-Bold.ttf from this directory.
    #[arg(long, value_name = "DIR", env = "GLANCE_ASSETS_DIR")]
    pub assets_dir: Option<PathBuf>,

    /// Do not capture the mouse.
    #[arg(long, env = "GLANCE_NO_MOUSE")]
    pub no_mouse: bool,

    #[arg(long, value_enum, default_value_t = ScreenModeArg::Alt, env = "GLANCE_SCREEN_MODE")]
    pub screen_mode: ScreenModeArg,

    /// Rows to use in inline mode.
    #[arg(long, default_value_t = DEFAULT_UI_HEIGHT, env = "GLANCE_UI_HEIGHT")]
    pub ui_height: u16,

    /// Quit automatically after this many milliseconds (0 disables).
    #[arg(long, value_name = "MS", default_value_t = 0, env = "GLANCE_EXIT_AFTER_MS")]
    pub exit_after_ms: u64,

    /// Write logs to this file. Logging is off without it.
    #[arg(long, value_name = "PATH", env = "GLANCE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `glance_screen=trace`.
    #[arg(long, value_name = "FILTER", default_value = "info", env = "GLANCE_LOG")]
    pub log_level: String,
}

impl Opts {
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            supports_dark_mode: !self.no_dark_mode,
        }
    }

    pub fn program_config(&self) -> ProgramConfig {
        let screen_mode = match self.screen_mode {
            ScreenModeArg::Alt => ScreenMode::AltScreen,
            ScreenModeArg::Inline => ScreenMode::Inline {
                ui_height: self.ui_height.max(1),
            },
        };
        ProgramConfig {
            screen_mode,
            mouse: !self.no_mouse,
            exit_after: (self.exit_after_ms > 0).then(|| Duration::from_millis(self.exit_after_ms)),
            ..ProgramConfig::default()
        }
    }
}
