#![forbid(unsafe_code)]

//! The render plan: what the screen shows for a given [`ViewState`].
//!
//! [`render`] is pure and total. It only selects blocks and literals; the
//! painter in [`crate::view`] decides where they land on the grid.
//!
//! | expanded | dark_mode | blocks                       | palette |
//! |----------|-----------|------------------------------|---------|
//! | false    | false     | header quote, greeting       | light   |
//! | false    | true      | header quote, greeting       | dark    |
//! | true     | false     | greeting, detail rows        | light   |
//! | true     | true      | greeting, detail rows        | dark    |

use glance_style::{Palette, palette_for};

use crate::assets::ImageAsset;
use crate::state::{Capabilities, ViewState};

pub const QUOTE_TEXT: &str = "The science of operations, as derived from Mathematics more especially, is a science itself, and has its own abstract truth and value";
pub const QUOTE_AUTHOR: &str = " - Ada Lovelace";
pub const GREETING: &str = "GOOD MORNING!";
pub const TIME: &str = "12:12";
pub const ZONE: &str = "BST";
pub const LOCATION: &str = "In London, Uk";
pub const MORE: &str = "MORE";
pub const LESS: &str = "LESS";
pub const DARK_MODE_LABEL: &str = "Dark Mode";
pub const LIGHT_MODE_LABEL: &str = "Light Mode";

/// The four detail rows, in display order.
pub const DETAIL_ROWS: [DetailRow; 4] = [
    DetailRow::new("CURRENT TIMEZONE", "Europe/ London"),
    DetailRow::new("Day of the year", "295"),
    DetailRow::new("Day of the week", "5"),
    DetailRow::new("week number", "12"),
];

/// Block identifiers, used to compare plans by shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    HeaderQuote,
    Greeting,
    DetailRows,
    DarkModeToggle,
}

/// Quote shown at the top while collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteBlock {
    pub text: &'static str,
    pub author: &'static str,
    /// Decorative; it has no action.
    pub icon: ImageAsset,
}

/// The MORE/LESS button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandToggle {
    pub label: &'static str,
    pub arrow: ImageAsset,
}

/// Greeting, time readout, location and the expand button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreetingBlock {
    pub icon: ImageAsset,
    pub label: &'static str,
    pub time: &'static str,
    pub zone: &'static str,
    pub location: &'static str,
    pub toggle: ExpandToggle,
}

/// One label/value line of the detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: &'static str,
}

impl DetailRow {
    const fn new(label: &'static str, value: &'static str) -> Self {
        Self { label, value }
    }
}

/// The dark-mode switch anchored bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeToggle {
    pub label: &'static str,
}

/// Everything the painter needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    /// Tiled under everything else, on top of the palette background.
    pub background: ImageAsset,
    pub quote: Option<QuoteBlock>,
    pub greeting: GreetingBlock,
    pub details: Option<&'static [DetailRow]>,
    pub mode_toggle: Option<ModeToggle>,
    pub palette: Palette,
    /// The flag the palette was selected from.
    pub dark_mode: bool,
}

impl RenderPlan {
    /// The blocks in paint order.
    #[must_use]
    pub fn blocks(&self) -> Vec<Block> {
        let mut blocks = Vec::with_capacity(3);
        if self.quote.is_some() {
            blocks.push(Block::HeaderQuote);
        }
        blocks.push(Block::Greeting);
        if self.details.is_some() {
            blocks.push(Block::DetailRows);
        }
        if self.mode_toggle.is_some() {
            blocks.push(Block::DarkModeToggle);
        }
        blocks
    }
}

/// Map view state to a render plan.
///
/// In the plain variant the dark flag is ignored and the light palette is
/// always used.
#[must_use]
pub fn render(state: ViewState, caps: Capabilities) -> RenderPlan {
    let dark_mode = caps.supports_dark_mode && state.dark_mode;

    let toggle = if state.expanded {
        ExpandToggle {
            label: LESS,
            arrow: ImageAsset::ArrowUp,
        }
    } else {
        ExpandToggle {
            label: MORE,
            arrow: ImageAsset::ArrowDown,
        }
    };

    RenderPlan {
        background: ImageAsset::Background,
        quote: (!state.expanded).then_some(QuoteBlock {
            text: QUOTE_TEXT,
            author: QUOTE_AUTHOR,
            icon: ImageAsset::Refresh,
        }),
        greeting: GreetingBlock {
            icon: ImageAsset::Sun,
            label: GREETING,
            time: TIME,
            zone: ZONE,
            location: LOCATION,
            toggle,
        },
        details: state.expanded.then_some(&DETAIL_ROWS[..]),
        mode_toggle: caps.supports_dark_mode.then_some(ModeToggle {
            label: if dark_mode {
                LIGHT_MODE_LABEL
            } else {
                DARK_MODE_LABEL
            },
        }),
        palette: palette_for(dark_mode),
        dark_mode,
    }
}
