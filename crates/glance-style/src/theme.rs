#![forbid(unsafe_code)]

//! Theme with semantic color slots for the greeting screen.
//!
//! Every slot is an [`AdaptiveColor`]: either fixed, or a light/dark pair
//! resolved against the dark-mode flag at paint time. The screen never
//! keeps per-element style objects; it asks the theme once per frame.
//!
//! # Example
//! ```
//! use glance_style::{palette_for, Theme};
//! use glance_render::cell::PackedRgba;
//!
//! let light = palette_for(false);
//! assert_eq!(light.background, PackedRgba::WHITE);
//! assert_eq!(Theme::glance().chip_text.resolve(true), PackedRgba::WHITE);
//! ```

use glance_render::cell::PackedRgba;

use crate::color::parse_hex;

/// Only called from `const` items, so a bad literal fails the build.
const fn hex(s: &str) -> PackedRgba {
    match parse_hex(s) {
        Ok(color) => color,
        Err(_) => panic!("invalid theme color literal"),
    }
}

const INK: PackedRgba = hex("#303030");
const PAPER: PackedRgba = hex("#ffffff");
const PANEL: PackedRgba = hex("#ffffffcc");
const CHIP: PackedRgba = hex("#00000080");

/// An adaptive color that can change based on light/dark mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdaptiveColor {
    /// A fixed color that doesn't change with mode.
    Fixed(PackedRgba),
    /// A color that adapts to light/dark mode.
    Adaptive {
        /// Color to use in light mode.
        light: PackedRgba,
        /// Color to use in dark mode.
        dark: PackedRgba,
    },
}

impl AdaptiveColor {
    /// Create a fixed color.
    #[inline]
    pub const fn fixed(color: PackedRgba) -> Self {
        Self::Fixed(color)
    }

    /// Create an adaptive color with light/dark variants.
    #[inline]
    pub const fn adaptive(light: PackedRgba, dark: PackedRgba) -> Self {
        Self::Adaptive { light, dark }
    }

    /// Resolve the color for the given mode (`true` = dark).
    #[inline]
    pub const fn resolve(&self, is_dark: bool) -> PackedRgba {
        match self {
            Self::Fixed(c) => *c,
            Self::Adaptive { light, dark } => {
                if is_dark {
                    *dark
                } else {
                    *light
                }
            }
        }
    }
}

/// The screen's semantic color slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Screen background.
    pub background: AdaptiveColor,
    /// Primary text on the background.
    pub text: AdaptiveColor,
    /// Detail panel surface, composited over the background.
    pub panel: AdaptiveColor,
    /// Text on the detail panel.
    pub panel_text: AdaptiveColor,
    /// Dark-mode switch chip, composited over the background.
    pub chip: AdaptiveColor,
    /// Text on the dark-mode switch chip.
    pub chip_text: AdaptiveColor,
}

impl Theme {
    /// The greeting screen theme.
    ///
    /// The page inverts between light and dark; the detail panel and the
    /// mode chip keep the same look in both.
    pub const fn glance() -> Self {
        Self {
            background: AdaptiveColor::adaptive(PAPER, INK),
            text: AdaptiveColor::adaptive(INK, PAPER),
            panel: AdaptiveColor::fixed(PANEL),
            panel_text: AdaptiveColor::fixed(INK),
            chip: AdaptiveColor::fixed(CHIP),
            chip_text: AdaptiveColor::fixed(PAPER),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::glance()
    }
}

/// Page colors for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Screen background.
    pub background: PackedRgba,
    /// Primary text color.
    pub text: PackedRgba,
}

/// Select the page palette for the dark-mode flag.
pub const fn palette_for(dark_mode: bool) -> Palette {
    let theme = Theme::glance();
    Palette {
        background: theme.background.resolve(dark_mode),
        text: theme.text.resolve(dark_mode),
    }
}
