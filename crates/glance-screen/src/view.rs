#![forbid(unsafe_code)]

//! Painting a [`RenderPlan`] onto a frame.
//!
//! Layout, top to bottom:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ quote (collapsed only)             ↻ │
//! │ - author                             │
//! │                                      │
//! │ ☀ GOOD MORNING!                      │
//! │ 12:12 BST                            │
//! │ IN LONDON, UK                        │
//! │ [ MORE ↓ ]                           │
//! │┄┄┄┄┄┄┄┄ detail panel (expanded) ┄┄┄┄┄│
//! │                         [ Dark Mode ]│
//! └──────────────────────────────────────┘
//! ```
//!
//! Clickable regions are registered with [`EXPAND_HIT`] and
//! [`DARK_MODE_HIT`].

use glance_core::geometry::Rect;
use glance_render::cell::{PackedRgba, StyleFlags};
use glance_render::frame::{Frame, HitId, display_width};
use glance_style::Theme;

use crate::assets::{AssetSource, FontAsset, FontFace, FontSet, ImageAsset};
use crate::plan::{DetailRow, GreetingBlock, ModeToggle, QuoteBlock, RenderPlan};

/// Hit region of the MORE/LESS button.
pub const EXPAND_HIT: HitId = HitId::new(1);
/// Hit region of the dark-mode switch.
pub const DARK_MODE_HIT: HitId = HitId::new(2);

/// Braille spinner frames.
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const PADDING_X: u16 = 3;
const PADDING_Y: u16 = 1;
/// Rows between greeting lines: one blank spacer when there is room, none
/// when the terminal is short.
const ROOMY_STEP: u16 = 2;
const TIGHT_STEP: u16 = 1;
const GREETING_LINES: u16 = 4;
const ICON_GUTTER: u16 = 3;
const CHIP_MARGIN: u16 = 2;

/// Style attributes for text set in `face`.
fn face_attrs(face: &FontFace) -> StyleFlags {
    match face.asset {
        FontAsset::InterBold => StyleFlags::BOLD,
        FontAsset::InterRegular => StyleFlags::empty(),
    }
}

struct Painter<'a> {
    frame: &'a mut Frame,
    assets: &'a dyn AssetSource,
    theme: Theme,
    dark: bool,
    regular: StyleFlags,
    bold: StyleFlags,
}

impl Painter<'_> {
    fn text(&self) -> PackedRgba {
        self.theme.text.resolve(self.dark)
    }

    /// Tile the background image's glyph over `area`. The bundled glyph
    /// is a blank, which leaves only the palette fill visible.
    fn backdrop(&mut self, image: ImageAsset, area: Rect) {
        let glyph = self.assets.image(image);
        let tile = display_width(glyph);
        if tile == 0 {
            return;
        }
        let row = glyph.repeat(usize::from(area.width / tile));
        let fg = self.text();
        for y in area.y..area.bottom() {
            self.frame.print(area.x, y, &row, fg, self.regular);
        }
    }

    fn quote(&mut self, quote: &QuoteBlock, area: Rect, limit: u16) {
        let fg = self.text();
        let icon = self.assets.image(quote.icon);
        self.frame.print_right(area.right(), area.y, icon, fg, self.regular);

        let width = usize::from(area.width.saturating_sub(ICON_GUTTER));
        if width == 0 {
            return;
        }
        let mut y = area.y;
        for line in textwrap::wrap(quote.text, width) {
            if y >= limit {
                return;
            }
            self.frame.print(area.x, y, &line, fg, self.regular);
            y += 1;
        }
        if y < limit {
            let author = quote.author.trim_start();
            self.frame.print(area.x, y, author, fg, self.bold);
        }
    }

    /// Paint the greeting lines `step` rows apart starting at `y`. The
    /// button only takes clicks on the part of it inside `visible`.
    fn greeting(&mut self, greeting: &GreetingBlock, x: u16, y: u16, step: u16, visible: Rect) {
        let fg = self.text();

        let sun = self.assets.image(greeting.icon);
        let col = self.frame.print(x, y, sun, fg, self.regular);
        self.frame.print(col + 1, y, greeting.label, fg, self.regular);

        let time_y = y + step;
        let col = self.frame.print(x, time_y, greeting.time, fg, self.bold);
        self.frame.print(col + 1, time_y, greeting.zone, fg, self.regular);

        let location = greeting.location.to_uppercase();
        self.frame.print(x, y + 2 * step, &location, fg, self.regular);

        let arrow = self.assets.image(greeting.toggle.arrow);
        let label = format!(" {} {arrow} ", greeting.toggle.label);
        let button = Rect::new(x, y + 3 * step, display_width(&label), 1);
        self.frame.fill_bg(button, self.theme.panel.resolve(self.dark));
        self.frame.print(
            button.x,
            button.y,
            &label,
            self.theme.panel_text.resolve(self.dark),
            self.bold,
        );
        let clickable = button.intersection(&visible);
        if !clickable.is_empty() {
            self.frame.register_hit(clickable, EXPAND_HIT);
        }
    }

    fn details(&mut self, rows: &[DetailRow], panel: Rect, content: Rect) {
        self.frame.fill_bg(panel, self.theme.panel.resolve(self.dark));
        let fg = self.theme.panel_text.resolve(self.dark);
        for (row, y) in rows.iter().zip(panel.y + PADDING_Y..panel.bottom()) {
            self.frame.print(content.x, y, row.label, fg, self.regular);
            let value = row.value.to_uppercase();
            self.frame.print_right(content.right(), y, &value, fg, self.bold);
        }
    }

    fn mode_toggle(&mut self, toggle: &ModeToggle) {
        let bounds = self.frame.bounds();
        let label = format!(" {} ", toggle.label);
        let width = display_width(&label);
        let chip = Rect::new(
            bounds.right().saturating_sub(width + CHIP_MARGIN),
            bounds.bottom().saturating_sub(1),
            width,
            1,
        );
        self.frame.fill_bg(chip, self.theme.chip.resolve(self.dark));
        self.frame.print(
            chip.x,
            chip.y,
            &label,
            self.theme.chip_text.resolve(self.dark),
            self.regular,
        );
        self.frame.register_hit(chip, DARK_MODE_HIT);
    }
}

/// Paint a ready screen.
pub fn paint(frame: &mut Frame, plan: &RenderPlan, fonts: &FontSet, assets: &dyn AssetSource) {
    let bounds = frame.bounds();
    frame.fill_bg(bounds, plan.palette.background);

    let content = bounds.inset(PADDING_X, PADDING_Y);
    let (above_panel, panel) = match plan.details {
        Some(rows) => {
            let panel_rows = rows.len() as u16 + PADDING_Y * 2;
            let (top, panel) = bounds.split_bottom(panel_rows);
            let height = top.bottom().saturating_sub(content.y);
            (Rect::new(content.x, content.y, content.width, height), Some(panel))
        }
        None => (content, None),
    };
    let step = if above_panel.height >= greeting_rows(ROOMY_STEP) {
        ROOMY_STEP
    } else {
        TIGHT_STEP
    };
    let greeting_y = above_panel
        .bottom()
        .saturating_sub(greeting_rows(step))
        .max(above_panel.y);
    let visible = Rect::new(0, 0, bounds.width, above_panel.bottom());

    let mut painter = Painter {
        frame,
        assets,
        theme: Theme::glance(),
        dark: plan.dark_mode,
        regular: face_attrs(&fonts.regular),
        bold: face_attrs(&fonts.bold),
    };

    painter.backdrop(plan.background, bounds);
    if let Some(quote) = &plan.quote {
        painter.quote(quote, content, greeting_y.saturating_sub(1));
    }
    painter.greeting(&plan.greeting, content.x, greeting_y, step, visible);
    if let (Some(rows), Some(panel)) = (plan.details, panel) {
        painter.details(rows, panel, content);
    }
    if let Some(toggle) = &plan.mode_toggle {
        painter.mode_toggle(toggle);
    }
}

const fn greeting_rows(step: u16) -> u16 {
    (GREETING_LINES - 1) * step + 1
}

/// Paint the loading indicator: one spinner glyph, centered, nothing else.
pub fn paint_loading(frame: &mut Frame, step: usize) {
    let glyph = SPINNER_FRAMES[step % SPINNER_FRAMES.len()];
    let spot = frame.bounds().centered(1, 1);
    let fg = Theme::glance().text.resolve(false);
    frame.print(spot.x, spot.y, glyph, fg, StyleFlags::empty());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{BundledAssets, load_fonts};
    use crate::plan::render;
    use crate::state::{Capabilities, ViewState};
    use glance_style::palette_for;

    fn painted(state: ViewState, caps: Capabilities, w: u16, h: u16) -> Frame {
        let mut frame = Frame::new(w, h);
        let fonts = load_fonts(&BundledAssets).unwrap();
        paint(&mut frame, &render(state, caps), &fonts, &BundledAssets);
        frame
    }

    fn find(frame: &Frame, needle: &str) -> Option<(u16, u16)> {
        (0..frame.height()).find_map(|y| {
            let row = frame.buffer.row_text(y);
            row.find(needle)
                .map(|byte| (display_width(&row[..byte]), y))
        })
    }

    #[test]
    fn collapsed_shows_quote_and_more() {
        let frame = painted(ViewState::default(), Capabilities::PLAIN, 60, 24);
        let text = frame.buffer.to_text();
        assert!(text.contains("The science of operations"));
        assert!(text.contains("- Ada Lovelace"));
        assert!(text.contains("☀ GOOD MORNING!"));
        assert!(text.contains("12:12 BST"));
        assert!(text.contains("IN LONDON, UK"));
        assert!(text.contains("MORE ↓"));
        assert!(!text.contains("CURRENT TIMEZONE"));
        assert!(!text.contains("Dark Mode"));
    }

    #[test]
    fn expanded_shows_rows_right_aligned() {
        let state = ViewState {
            expanded: true,
            dark_mode: false,
        };
        let frame = painted(state, Capabilities::PLAIN, 60, 24);
        let text = frame.buffer.to_text();
        assert!(!text.contains("The science"));
        assert!(text.contains("LESS ↑"));

        let (x, y) = find(&frame, "EUROPE/ LONDON").unwrap();
        assert_eq!(x + display_width("EUROPE/ LONDON"), 60 - PADDING_X);
        assert_eq!(find(&frame, "CURRENT TIMEZONE"), Some((PADDING_X, y)));
        assert!(find(&frame, "week number").is_some());
    }

    #[test]
    fn palette_drives_background() {
        let dark = ViewState {
            expanded: false,
            dark_mode: true,
        };
        let frame = painted(dark, Capabilities::DARK_CAPABLE, 40, 20);
        let corner = frame.buffer.get(0, 0).unwrap();
        assert_eq!(corner.bg, palette_for(true).background);
    }

    #[test]
    fn chip_is_bottom_right_and_clickable() {
        let frame = painted(ViewState::default(), Capabilities::DARK_CAPABLE, 40, 20);
        let (x, y) = find(&frame, "Dark Mode").unwrap();
        assert_eq!(y, 19);
        assert_eq!(x + display_width("Dark Mode") + 1 + CHIP_MARGIN, 40);
        assert_eq!(frame.hit_test(x, y), Some(DARK_MODE_HIT));
    }

    #[test]
    fn button_is_clickable() {
        let frame = painted(ViewState::default(), Capabilities::PLAIN, 40, 20);
        let (x, y) = find(&frame, "MORE").unwrap();
        assert_eq!(frame.hit_test(x, y), Some(EXPAND_HIT));
        assert_eq!(frame.hit_test(0, 0), None);
    }

    #[test]
    fn bold_face_marks_time() {
        let frame = painted(ViewState::default(), Capabilities::PLAIN, 40, 20);
        let (x, y) = find(&frame, "12:12").unwrap();
        let cell = frame.buffer.get(x, y).unwrap();
        assert!(cell.attrs.contains(StyleFlags::BOLD));
    }

    #[test]
    fn short_terminal_keeps_less_above_the_panel() {
        let state = ViewState {
            expanded: true,
            dark_mode: false,
        };
        let frame = painted(state, Capabilities::DARK_CAPABLE, 60, 12);
        let text = frame.buffer.to_text();
        assert!(text.contains("LESS ↑"), "{text}");
        assert!(text.contains("IN LONDON, UK"), "{text}");

        let (bx, by) = find(&frame, "LESS").unwrap();
        assert_eq!(frame.hit_test(bx, by), Some(EXPAND_HIT));

        let (rx, ry) = find(&frame, "CURRENT TIMEZONE").unwrap();
        assert!(ry > by);
        assert_eq!(frame.hit_test(rx, ry), None);
    }

    #[test]
    fn button_under_the_panel_takes_no_clicks() {
        let state = ViewState {
            expanded: true,
            dark_mode: false,
        };
        let frame = painted(state, Capabilities::PLAIN, 40, 8);
        let panel_top = 8 - 6;
        for y in panel_top..8 {
            for x in 0..40 {
                assert_eq!(frame.hit_test(x, y), None, "({x}, {y})");
            }
        }
    }

    struct Dotted;

    impl AssetSource for Dotted {
        fn load_font(&self, font: FontAsset) -> Result<FontFace, crate::assets::AssetError> {
            BundledAssets.load_font(font)
        }

        fn image(&self, image: ImageAsset) -> crate::assets::Glyph {
            match image {
                ImageAsset::Background => "·",
                other => BundledAssets.image(other),
            }
        }
    }

    #[test]
    fn background_image_is_tiled_under_the_content() {
        let mut frame = Frame::new(30, 12);
        let fonts = load_fonts(&Dotted).unwrap();
        let plan = render(ViewState::default(), Capabilities::PLAIN);
        paint(&mut frame, &plan, &fonts, &Dotted);

        let corner = frame.buffer.get(0, 0).unwrap();
        assert_eq!(corner.ch, '·');
        assert_eq!(corner.bg, palette_for(false).background);
        assert!(frame.buffer.to_text().contains("MORE ↓"));
    }

    #[test]
    fn tiny_frames_do_not_panic() {
        for (w, h) in [(1, 1), (3, 2), (8, 4)] {
            let state = ViewState {
                expanded: true,
                dark_mode: true,
            };
            painted(state, Capabilities::DARK_CAPABLE, w, h);
            painted(ViewState::default(), Capabilities::DARK_CAPABLE, w, h);
        }
    }

    #[test]
    fn loading_is_only_a_spinner() {
        let mut frame = Frame::new(21, 9);
        paint_loading(&mut frame, 0);
        assert_eq!(frame.buffer.to_text().trim(), "⠋");
        assert_eq!(frame.buffer.get(10, 4).map(|c| c.ch), Some('⠋'));

        paint_loading(&mut frame, SPINNER_FRAMES.len() + 1);
        assert_eq!(frame.buffer.get(10, 4).map(|c| c.ch), Some('⠙'));
    }
}
