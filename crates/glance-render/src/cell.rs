#![forbid(unsafe_code)]

//! Cell types: the atomic unit of the render buffer.
//!
//! A [`Cell`] holds one character plus its foreground/background color and
//! style flags. Wide characters occupy two cells: the head cell carries the
//! character, the tail cell is a [`Cell::CONTINUATION`] placeholder that the
//! presenter skips.

/// A 32-bit RGBA color, `0xRRGGBBAA`.
///
/// This is **straight alpha** storage (RGB channels are not pre-multiplied).
/// Compositing uses Porter-Duff **SourceOver** (`src over dst`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[repr(transparent)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent (alpha = 0).
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque RGB color (alpha = 255).
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Create an RGBA color with explicit alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | (a as u32))
    }

    /// Red channel.
    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Green channel.
    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Blue channel.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Alpha channel.
    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    const fn div_round_u8(numer: u64, denom: u64) -> u8 {
        let v = (numer + (denom / 2)) / denom;
        if v > 255 { 255 } else { v as u8 }
    }

    /// Porter-Duff SourceOver: `src over dst`.
    #[inline]
    pub fn over(self, dst: Self) -> Self {
        let s_a = self.a() as u64;
        if s_a == 255 {
            return self;
        }
        if s_a == 0 {
            return dst;
        }

        let d_a = dst.a() as u64;
        let inv_s_a = 255 - s_a;

        let numer_a = 255 * s_a + d_a * inv_s_a;
        if numer_a == 0 {
            return Self::TRANSPARENT;
        }

        let out_a = Self::div_round_u8(numer_a, 255);
        let channel = |s: u8, d: u8| {
            Self::div_round_u8(
                (s as u64) * s_a * 255 + (d as u64) * d_a * inv_s_a,
                numer_a,
            )
        };

        Self::rgba(
            channel(self.r(), dst.r()),
            channel(self.g(), dst.g()),
            channel(self.b(), dst.b()),
            out_a,
        )
    }
}

bitflags::bitflags! {
    /// Cell style flags. Bold is the only weight the screen paints with.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StyleFlags: u8 {
        const BOLD = 1;
    }
}

impl Default for StyleFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Displayed character. `'\0'` marks the tail of a wide character.
    pub ch: char,
    /// Foreground color.
    pub fg: PackedRgba,
    /// Background color.
    pub bg: PackedRgba,
    /// Style flags.
    pub attrs: StyleFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: PackedRgba::WHITE,
            bg: PackedRgba::TRANSPARENT,
            attrs: StyleFlags::empty(),
        }
    }
}

impl Cell {
    /// Tail half of a wide character.
    pub const CONTINUATION: Self = Self {
        ch: '\0',
        fg: PackedRgba::TRANSPARENT,
        bg: PackedRgba::TRANSPARENT,
        attrs: StyleFlags::empty(),
    };

    /// Create a cell with the given character and default styling.
    #[inline]
    pub fn from_char(ch: char) -> Self {
        Self {
            ch,
            ..Self::default()
        }
    }

    /// Whether this cell is the tail half of a wide character.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.ch == '\0'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_round_trip() {
        let c = PackedRgba::rgba(0x30, 0x31, 0x32, 0x80);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (0x30, 0x31, 0x32, 0x80));
    }

    #[test]
    fn over_opaque_src_wins() {
        assert_eq!(
            PackedRgba::WHITE.over(PackedRgba::BLACK),
            PackedRgba::WHITE
        );
    }

    #[test]
    fn over_transparent_src_keeps_dst() {
        assert_eq!(
            PackedRgba::TRANSPARENT.over(PackedRgba::BLACK),
            PackedRgba::BLACK
        );
    }

    #[test]
    fn over_half_black_on_white_is_mid_gray() {
        let out = PackedRgba::rgba(0, 0, 0, 128).over(PackedRgba::WHITE);
        assert_eq!(out.a(), 255);
        assert_eq!(out.r(), 127);
        assert_eq!(out.r(), out.g());
        assert_eq!(out.g(), out.b());
    }

    #[test]
    fn continuation_is_flagged() {
        assert!(Cell::CONTINUATION.is_continuation());
        assert!(!Cell::from_char('x').is_continuation());
    }
}
