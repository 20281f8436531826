//! The font contract
//!
//! The layout code never looks at glyph outlines or pixels when deciding sizes; it only asks a
//! [`Font`] for the bounding box of a string. The same handle then draws the string.
//! [`truetype`] provides the implementation backed by font files.

pub mod truetype;

use crate::raster::Bitmap;

/// Width and height of the box a string occupies, in pixels
///
/// Both are measured from the drawing origin (the top-left corner passed to [`Font::draw`]) to
/// the right-most and bottom-most ink, so any bearing above or to the left of the ink is
/// included.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Extent {
    /// Distance from the origin to the right edge of the ink
    pub width: u32,
    /// Distance from the origin to the bottom edge of the ink
    pub height: u32,
}

impl Extent {
    /// The extent of empty text.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };
}

/// A font at one fixed size
pub trait Font {
    /// Measures `text`. Must return [`Extent::ZERO`] for an empty string.
    fn measure(&self, text: &str) -> Extent;

    /// Draws `text` in ink with the origin of its box at `(x, y)`. Anything falling outside the
    /// canvas is clipped.
    fn draw(&self, canvas: &mut Bitmap, x: i32, y: i32, text: &str);
}
