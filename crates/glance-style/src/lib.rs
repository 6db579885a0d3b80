#![forbid(unsafe_code)]

//! Style: hex colors, adaptive light/dark colors, and the screen theme.

pub mod color;
pub mod theme;

pub use color::{ColorParseError, parse_hex};
pub use theme::{AdaptiveColor, Palette, Theme, palette_for};
