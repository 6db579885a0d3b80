#![forbid(unsafe_code)]

//! Input events as the screen sees them.
//!
//! Crossterm events are narrowed at the boundary to what a model can act
//! on: keys, mouse presses, resizes and the runtime's own ticks. Keys the
//! screen never binds (function keys, arrows, media keys) collapse into
//! [`KeyCode::Other`]; paste and focus reports are dropped.

use bitflags::bitflags;
use crossterm::event as ct;

/// An input event delivered to a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// The terminal now has this many columns and rows.
    Resize { width: u16, height: u16 },
    /// A tick scheduled by the model came due.
    Tick,
}

impl Event {
    /// Narrow a crossterm event. `None` means the event is not forwarded.
    #[must_use]
    pub fn from_crossterm(event: ct::Event) -> Option<Self> {
        match event {
            ct::Event::Key(key) => Some(Event::Key(KeyEvent::from(key))),
            ct::Event::Mouse(mouse) => Some(Event::Mouse(MouseEvent::from(mouse))),
            ct::Event::Resize(width, height) => Some(Event::Resize { width, height }),
            ct::Event::FocusGained | ct::Event::FocusLost | ct::Event::Paste(_) => None,
        }
    }

    /// A plain key press.
    #[must_use]
    pub const fn key(code: KeyCode) -> Self {
        Self::Key(KeyEvent::new(code))
    }

    /// A primary-button press at `(x, y)`.
    #[must_use]
    pub const fn click(x: u16, y: u16) -> Self {
        Self::Mouse(MouseEvent::new(
            MouseEventKind::Down(MouseButton::Left),
            x,
            y,
        ))
    }
}

/// A key with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// An unmodified press of `code`.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        self.code == KeyCode::Char(c)
    }

    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Press or auto-repeat. Terminals with the kitty protocol also report
    /// releases; models should not act on those.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }
}

impl From<ct::KeyEvent> for KeyEvent {
    fn from(key: ct::KeyEvent) -> Self {
        let code = match key.code {
            ct::KeyCode::Char(c) => KeyCode::Char(c),
            ct::KeyCode::Enter => KeyCode::Enter,
            ct::KeyCode::Esc => KeyCode::Escape,
            _ => KeyCode::Other,
        };
        let kind = match key.kind {
            ct::KeyEventKind::Press => KeyEventKind::Press,
            ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
            ct::KeyEventKind::Release => KeyEventKind::Release,
        };
        Self {
            code,
            modifiers: Modifiers::from(key.modifiers),
            kind,
        }
    }
}

/// The keys the screen distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    /// Any key without a binding.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

bitflags! {
    /// Held modifier keys.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1;
        const ALT = 1 << 1;
        const CTRL = 1 << 2;
    }
}

impl From<ct::KeyModifiers> for Modifiers {
    fn from(mods: ct::KeyModifiers) -> Self {
        let mut out = Modifiers::empty();
        out.set(Modifiers::SHIFT, mods.contains(ct::KeyModifiers::SHIFT));
        out.set(Modifiers::ALT, mods.contains(ct::KeyModifiers::ALT));
        out.set(Modifiers::CTRL, mods.contains(ct::KeyModifiers::CONTROL));
        out
    }
}

/// A mouse report in 0-indexed cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: u16,
    pub y: u16,
}

impl MouseEvent {
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self { kind, x, y }
    }

    /// A press of the primary button, the only gesture treated as a tap.
    #[must_use]
    pub const fn is_left_down(&self) -> bool {
        matches!(self.kind, MouseEventKind::Down(MouseButton::Left))
    }
}

impl From<ct::MouseEvent> for MouseEvent {
    fn from(mouse: ct::MouseEvent) -> Self {
        let kind = match mouse.kind {
            ct::MouseEventKind::Down(b) => MouseEventKind::Down(b.into()),
            ct::MouseEventKind::Up(b) => MouseEventKind::Up(b.into()),
            ct::MouseEventKind::Drag(_) | ct::MouseEventKind::Moved => MouseEventKind::Moved,
            ct::MouseEventKind::ScrollUp
            | ct::MouseEventKind::ScrollDown
            | ct::MouseEventKind::ScrollLeft
            | ct::MouseEventKind::ScrollRight => MouseEventKind::Scroll,
        };
        Self::new(kind, mouse.column, mouse.row)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    /// Pointer motion, with or without a held button.
    Moved,
    /// Any wheel direction.
    Scroll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<ct::MouseButton> for MouseButton {
    fn from(button: ct::MouseButton) -> Self {
        match button {
            ct::MouseButton::Left => MouseButton::Left,
            ct::MouseButton::Right => MouseButton::Right,
            ct::MouseButton::Middle => MouseButton::Middle,
        }
    }
}
