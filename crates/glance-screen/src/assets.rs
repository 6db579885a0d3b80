#![forbid(unsafe_code)]

//! Image and font resources.
//!
//! Images are drawn as single stand-in glyphs; the terminal cannot show
//! bitmaps. Fonts gate the first paint: the screen stays on its loading
//! indicator until both faces resolve.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Fixed image resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageAsset {
    Background,
    Refresh,
    Sun,
    ArrowUp,
    ArrowDown,
}

impl ImageAsset {
    pub const ALL: [Self; 5] = [
        Self::Background,
        Self::Refresh,
        Self::Sun,
        Self::ArrowUp,
        Self::ArrowDown,
    ];

    /// Resource name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Refresh => "refresh",
            Self::Sun => "sun",
            Self::ArrowUp => "arrow-up",
            Self::ArrowDown => "arrow-down",
        }
    }
}

/// Fixed font resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontAsset {
    InterRegular,
    InterBold,
}

impl FontAsset {
    /// Resource name; also the file stem under an assets directory.
    pub const fn name(self) -> &'static str {
        match self {
            Self::InterRegular => "Inter-Regular",
            Self::InterBold => "Inter-Bold",
        }
    }
}

/// Terminal stand-in for an image.
pub type Glyph = &'static str;

/// A resolved font face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFace {
    pub asset: FontAsset,
    /// Size of the font data in bytes; zero for host-provided faces.
    pub len: usize,
}

/// Both faces the screen paints with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSet {
    pub regular: FontFace,
    pub bold: FontFace,
}

/// Why an asset could not be resolved.
#[derive(Debug)]
pub enum AssetError {
    /// No file for the resource.
    Missing { name: &'static str, path: PathBuf },
    /// The file exists but could not be read.
    Io {
        name: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { name, path } => {
                write!(f, "font {name} not found at {}", path.display())
            }
            Self::Io { name, source } => write!(f, "failed to read font {name}: {source}"),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Missing { .. } => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Where fonts and image glyphs come from.
pub trait AssetSource: Send + Sync {
    /// Resolve one font face. May block.
    fn load_font(&self, font: FontAsset) -> Result<FontFace, AssetError>;

    /// The glyph drawn in place of an image.
    fn image(&self, image: ImageAsset) -> Glyph {
        match image {
            ImageAsset::Background => " ",
            ImageAsset::Refresh => "↻",
            ImageAsset::Sun => "☀",
            ImageAsset::ArrowUp => "↑",
            ImageAsset::ArrowDown => "↓",
        }
    }
}

/// Resolve both faces, failing on the first one that does not load.
pub fn load_fonts(source: &dyn AssetSource) -> Result<FontSet, AssetError> {
    Ok(FontSet {
        regular: source.load_font(FontAsset::InterRegular)?,
        bold: source.load_font(FontAsset::InterBold)?,
    })
}

/// Host terminal fonts. Always resolves.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledAssets;

impl AssetSource for BundledAssets {
    fn load_font(&self, font: FontAsset) -> Result<FontFace, AssetError> {
        Ok(FontFace {
            asset: font,
            len: 0,
        })
    }
}

/// Fonts read from `<root>/<name>.ttf`.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The file a font resolves to.
    pub fn font_path(&self, font: FontAsset) -> PathBuf {
        self.root.join(format!("{}.ttf", font.name()))
    }
}

impl AssetSource for DirAssets {
    fn load_font(&self, font: FontAsset) -> Result<FontFace, AssetError> {
        let path = self.font_path(font);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(FontFace {
                asset: font,
                len: bytes.len(),
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(AssetError::Missing {
                name: font.name(),
                path,
            }),
            Err(source) => Err(AssetError::Io {
                name: font.name(),
                source,
            }),
        }
    }
}
