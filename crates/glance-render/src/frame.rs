#![forbid(unsafe_code)]

//! Frame = Buffer + hit grid for a render pass.
//!
//! The `Frame` is the render target that `Model::view()` writes to. It
//! bundles the cell grid ([`Buffer`]) with a hit grid so that clickable
//! regions painted during `view` can be resolved from mouse coordinates
//! afterwards.
//!
//! # Usage
//!
//! ```
//! use glance_core::geometry::Rect;
//! use glance_render::cell::{PackedRgba, StyleFlags};
//! use glance_render::frame::{Frame, HitId};
//!
//! let mut frame = Frame::new(20, 3);
//! let end = frame.print(1, 1, "MORE", PackedRgba::WHITE, StyleFlags::BOLD);
//! frame.register_hit(Rect::new(1, 1, end - 1, 1), HitId::new(7));
//! assert_eq!(frame.hit_test(2, 1), Some(HitId::new(7)));
//! ```

use glance_core::geometry::Rect;
use unicode_width::UnicodeWidthChar;

use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba, StyleFlags};

/// Identifier for a clickable region in the hit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    /// Create a new hit ID from a raw value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Hit testing grid for mouse interaction.
///
/// Maps screen positions to the id of the last region registered there.
#[derive(Debug, Clone)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<Option<HitId>>,
}

impl HitGrid {
    /// Create an empty hit grid with the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Register a region. Later registrations win where regions overlap.
    pub fn register(&mut self, rect: Rect, id: HitId) {
        let clipped = rect.intersection(&Rect::from_size(self.width, self.height));
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.cells[y as usize * self.width as usize + x as usize] = Some(id);
            }
        }
    }

    /// The region at `(x, y)`, if any.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<HitId> {
        if x < self.width && y < self.height {
            self.cells[y as usize * self.width as usize + x as usize]
        } else {
            None
        }
    }
}

/// A render target: cells plus clickable regions.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The cell grid.
    pub buffer: Buffer,
    /// Clickable regions registered during this pass.
    pub hit_grid: HitGrid,
}

impl Frame {
    /// Create a blank frame.
    ///
    /// # Panics
    ///
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: HitGrid::new(width, height),
        }
    }

    /// Frame width in cells.
    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Frame height in cells.
    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// Bounding rect of the entire frame.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Paint the background of `rect`, compositing `bg` over what is there.
    pub fn fill_bg(&mut self, rect: Rect, bg: PackedRgba) {
        let clipped = rect.intersection(&self.bounds());
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                if let Some(cell) = self.buffer.get_mut(x, y) {
                    *cell = Cell {
                        ch: ' ',
                        fg: cell.fg,
                        bg: bg.over(cell.bg),
                        attrs: StyleFlags::empty(),
                    };
                }
            }
        }
    }

    /// Print `text` starting at `(x, y)`, keeping each cell's background.
    ///
    /// Output is clipped at the right edge; a wide character that would
    /// straddle the edge is not drawn. Returns the column after the last
    /// drawn cell.
    pub fn print(&mut self, x: u16, y: u16, text: &str, fg: PackedRgba, attrs: StyleFlags) -> u16 {
        let mut col = x;
        if y >= self.height() {
            return col;
        }
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if col.saturating_add(w) > self.width() {
                break;
            }
            let bg = self.buffer.get(col, y).map_or(PackedRgba::TRANSPARENT, |c| c.bg);
            self.buffer.set(
                col,
                y,
                Cell {
                    ch,
                    fg,
                    bg,
                    attrs,
                },
            );
            if w == 2 {
                self.buffer.set(col + 1, y, Cell { bg, ..Cell::CONTINUATION });
            }
            col += w;
        }
        col
    }

    /// Print `text` so that it ends at column `right` (exclusive).
    ///
    /// Returns the starting column.
    pub fn print_right(
        &mut self,
        right: u16,
        y: u16,
        text: &str,
        fg: PackedRgba,
        attrs: StyleFlags,
    ) -> u16 {
        let start = right.saturating_sub(display_width(text));
        self.print(start, y, text, fg, attrs);
        start
    }

    /// Register a clickable region.
    #[inline]
    pub fn register_hit(&mut self, rect: Rect, id: HitId) {
        self.hit_grid.register(rect, id);
    }

    /// Resolve a position to a registered region.
    #[inline]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<HitId> {
        self.hit_grid.hit_test(x, y)
    }
}

/// Display width of `text` in terminal columns.
pub fn display_width(text: &str) -> u16 {
    text.chars()
        .map(|c| c.width().unwrap_or(0) as u16)
        .fold(0u16, u16::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_keeps_background() {
        let mut frame = Frame::new(6, 1);
        let bg = PackedRgba::rgb(0x30, 0x30, 0x30);
        frame.fill_bg(frame.bounds(), bg);
        let end = frame.print(1, 0, "ab", PackedRgba::WHITE, StyleFlags::empty());
        assert_eq!(end, 3);
        let cell = frame.buffer.get(1, 0).copied().unwrap_or_default();
        assert_eq!(cell.ch, 'a');
        assert_eq!(cell.bg, bg);
    }

    #[test]
    fn print_clips_at_edge() {
        let mut frame = Frame::new(4, 1);
        frame.print(2, 0, "hello", PackedRgba::WHITE, StyleFlags::empty());
        assert_eq!(frame.buffer.row_text(0), "  he");
    }

    #[test]
    fn wide_char_does_not_straddle_edge() {
        let mut frame = Frame::new(3, 1);
        let end = frame.print(2, 0, "日", PackedRgba::WHITE, StyleFlags::empty());
        assert_eq!(end, 2);
        assert_eq!(frame.buffer.row_text(0), "   ");
    }

    #[test]
    fn print_right_aligns() {
        let mut frame = Frame::new(10, 1);
        let start = frame.print_right(10, 0, "295", PackedRgba::WHITE, StyleFlags::BOLD);
        assert_eq!(start, 7);
        assert_eq!(frame.buffer.row_text(0), "       295");
    }

    #[test]
    fn later_hit_regions_win() {
        let mut frame = Frame::new(10, 2);
        frame.register_hit(Rect::new(0, 0, 10, 2), HitId::new(1));
        frame.register_hit(Rect::new(4, 1, 2, 1), HitId::new(2));
        assert_eq!(frame.hit_test(0, 0), Some(HitId::new(1)));
        assert_eq!(frame.hit_test(5, 1), Some(HitId::new(2)));
        assert_eq!(frame.hit_test(10, 1), None);
    }

    #[test]
    fn fill_bg_composites() {
        let mut frame = Frame::new(1, 1);
        frame.fill_bg(frame.bounds(), PackedRgba::BLACK);
        frame.fill_bg(frame.bounds(), PackedRgba::rgba(0xff, 0xff, 0xff, 0xcc));
        let bg = frame.buffer.get(0, 0).map(|c| c.bg).unwrap_or_default();
        assert_eq!(bg.a(), 255);
        assert_eq!(bg.r(), 204);
    }

    #[test]
    fn display_width_counts_wide_chars() {
        assert_eq!(display_width("12:12"), 5);
        assert_eq!(display_width("日 hi"), 5);
    }
}
