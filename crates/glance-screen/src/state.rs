#![forbid(unsafe_code)]

//! View state and host capabilities.

/// The two independent flags that decide what the screen shows.
///
/// Both start `false` when the screen mounts. Only the toggle actions
/// mutate them, and nothing outlives the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ViewState {
    /// Detail panel shown instead of the quote.
    pub expanded: bool,
    /// Dark palette active.
    pub dark_mode: bool,
}

impl ViewState {
    /// Flip `expanded`.
    #[inline]
    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Flip `dark_mode`.
    #[inline]
    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }
}

/// What the hosting screen variant supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Show the dark-mode switch and honor its toggle.
    pub supports_dark_mode: bool,
}

impl Capabilities {
    /// The variant with the dark-mode switch.
    pub const DARK_CAPABLE: Self = Self {
        supports_dark_mode: true,
    };

    /// The plain variant: light palette only.
    pub const PLAIN: Self = Self {
        supports_dark_mode: false,
    };
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::DARK_CAPABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mounts_collapsed_and_light() {
        let state = ViewState::default();
        assert!(!state.expanded);
        assert!(!state.dark_mode);
    }

    #[test]
    fn toggles_are_independent() {
        let mut state = ViewState::default();
        state.toggle_expanded();
        assert_eq!(
            state,
            ViewState {
                expanded: true,
                dark_mode: false
            }
        );
        state.toggle_dark_mode();
        state.toggle_expanded();
        assert_eq!(
            state,
            ViewState {
                expanded: false,
                dark_mode: true
            }
        );
    }
}
