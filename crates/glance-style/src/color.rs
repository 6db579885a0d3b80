//! Hex color parsing.
//!
//! Accepts the `#rgb`, `#rrggbb`, and `#rrggbbaa` forms used in style
//! sheets. The leading `#` is required. Parsing is `const`, so theme
//! colors written as hex literals are checked at compile time.

use std::fmt;

use glance_render::cell::PackedRgba;

/// Why a hex color string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string does not start with `#`.
    MissingHash,
    /// The digit count is not 3, 6, or 8.
    BadLength(usize),
    /// A non-hex byte sits at this offset after the `#`.
    BadDigit { offset: usize },
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHash => write!(f, "hex color must start with '#'"),
            Self::BadLength(n) => write!(f, "hex color must have 3, 6 or 8 digits, got {n}"),
            Self::BadDigit { offset } => write!(f, "invalid hex digit at offset {offset}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

/// Parse a `#`-prefixed hex color.
///
/// ```
/// use glance_style::parse_hex;
///
/// let c = parse_hex("#00000080").unwrap();
/// assert_eq!((c.r(), c.a()), (0, 0x80));
/// ```
pub const fn parse_hex(s: &str) -> Result<PackedRgba, ColorParseError> {
    let bytes = s.as_bytes();
    if bytes.is_empty() || bytes[0] != b'#' {
        return Err(ColorParseError::MissingHash);
    }

    let len = bytes.len() - 1;
    let mut n = [0u8; 8];
    let mut i = 0;
    while i < len {
        match hex_value(bytes[i + 1]) {
            Some(v) if i < n.len() => n[i] = v,
            Some(_) => {}
            None => return Err(ColorParseError::BadDigit { offset: i }),
        }
        i += 1;
    }

    match len {
        3 => Ok(PackedRgba::rgb(n[0] * 0x11, n[1] * 0x11, n[2] * 0x11)),
        6 => Ok(PackedRgba::rgb(
            (n[0] << 4) | n[1],
            (n[2] << 4) | n[3],
            (n[4] << 4) | n[5],
        )),
        8 => Ok(PackedRgba::rgba(
            (n[0] << 4) | n[1],
            (n[2] << 4) | n[3],
            (n[4] << 4) | n[5],
            (n[6] << 4) | n[7],
        )),
        other => Err(ColorParseError::BadLength(other)),
    }
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
