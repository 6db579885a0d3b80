#![forbid(unsafe_code)]

//! Geometric primitives.

/// A rectangle for layout bounds and hit testing.
///
/// Uses terminal coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Compute the intersection with another rectangle.
    ///
    /// Returns an empty rectangle if the rectangles don't overlap.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Rect::new(x, y, right - x, bottom - y)
        } else {
            Rect::default()
        }
    }

    /// Shrink by `horizontal` columns on each side and `vertical` rows on each side.
    #[must_use]
    pub fn inset(&self, horizontal: u16, vertical: u16) -> Rect {
        let width = self.width.saturating_sub(horizontal.saturating_mul(2));
        let height = self.height.saturating_sub(vertical.saturating_mul(2));
        Rect::new(
            self.x.saturating_add(horizontal.min(self.width / 2)),
            self.y.saturating_add(vertical.min(self.height / 2)),
            width,
            height,
        )
    }

    /// Split off the bottom `rows` rows, returning `(top, bottom)`.
    ///
    /// `rows` is clamped to the rectangle height.
    #[must_use]
    pub fn split_bottom(&self, rows: u16) -> (Rect, Rect) {
        let rows = rows.min(self.height);
        let top = Rect::new(self.x, self.y, self.width, self.height - rows);
        let bottom = Rect::new(self.x, self.y + top.height, self.width, rows);
        (top, bottom)
    }

    /// A `width` x `height` rectangle centered inside `self`, clamped to fit.
    #[must_use]
    pub fn centered(&self, width: u16, height: u16) -> Rect {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Rect::new(
            self.x + (self.width - width) / 2,
            self.y + (self.height - height) / 2,
            width,
            height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 4));
        assert!(!r.contains(6, 4));
        assert!(!r.contains(5, 5));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn intersection_of_disjoint_is_empty() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(5, 5, 2, 2);
        assert!(a.intersection(&b).is_empty());
        assert_eq!(
            Rect::new(0, 0, 4, 4).intersection(&Rect::new(2, 2, 4, 4)),
            Rect::new(2, 2, 2, 2)
        );
    }

    #[test]
    fn inset_saturates() {
        assert_eq!(Rect::new(0, 0, 10, 6).inset(2, 1), Rect::new(2, 1, 6, 4));
        assert!(Rect::new(0, 0, 3, 3).inset(5, 5).is_empty());
    }

    #[test]
    fn split_bottom_clamps() {
        let (top, bottom) = Rect::new(0, 0, 10, 8).split_bottom(3);
        assert_eq!(top, Rect::new(0, 0, 10, 5));
        assert_eq!(bottom, Rect::new(0, 5, 10, 3));

        let (top, bottom) = Rect::new(0, 0, 10, 2).split_bottom(5);
        assert!(top.is_empty());
        assert_eq!(bottom.height, 2);
    }

    #[test]
    fn centered_fits_inside() {
        let outer = Rect::new(0, 0, 20, 10);
        assert_eq!(outer.centered(4, 2), Rect::new(8, 4, 4, 2));
        assert_eq!(outer.centered(40, 40), outer);
    }

    proptest::proptest! {
        #[test]
        fn centered_is_contained(w in 0u16..200, h in 0u16..100, cw in 0u16..300, ch in 0u16..300) {
            let outer = Rect::from_size(w, h);
            let inner = outer.centered(cw, ch);
            proptest::prop_assert_eq!(outer.intersection(&inner), if inner.is_empty() { Rect::default() } else { inner });
            proptest::prop_assert!(inner.right() <= outer.right());
            proptest::prop_assert!(inner.bottom() <= outer.bottom());
        }
    }
}
