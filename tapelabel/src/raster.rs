//! Two-tone rasters
//!
//! A [`Bitmap`] holds one bit per pixel: *ink* (printed, black) or background (white). Nothing
//! in this crate produces grey levels.

use std::fmt::{self, Display};
use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};

const INK_LUMA: u8 = 0;
const BACKGROUND_LUMA: u8 = 255;

/// A 1-bit raster, stored row-major
///
/// The [`Display`] implementation draws ink as `#` and background as `.`, one text line per row,
/// which is what the tests compare against.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    ink: Vec<bool>,
}

impl Bitmap {
    /// A background-only raster.
    #[must_use]
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ink: vec![false; width as usize * height as usize],
        }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns true if the pixel carries ink. Pixels outside the raster are background.
    #[must_use]
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.ink[self.index(x, y)]
    }

    /// Inks a pixel. Coordinates outside the raster are clipped silently, so text may be drawn
    /// partially off-canvas.
    pub fn set_ink(&mut self, x: i64, y: i64) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x < self.width && y < self.height {
            let index = self.index(x, y);
            self.ink[index] = true;
        }
    }

    /// Copies every pixel of `other` (background included) into this raster with its top-left
    /// corner on row `y`, clipping whatever falls outside.
    pub fn paste(&mut self, other: &Self, y: u32) {
        let columns = self.width.min(other.width) as usize;
        for (source_y, target_y) in (0..other.height).zip(y..self.height) {
            let source = other.row(source_y);
            let start = self.index(0, target_y);
            self.ink[start..start + columns].copy_from_slice(&source[..columns]);
        }
    }

    /// A row of pixels, `true` for ink.
    ///
    /// # Panics
    /// If `y` is not less than [`height`](Bitmap::height).
    #[must_use]
    pub fn row(&self, y: u32) -> &[bool] {
        assert!(y < self.height, "row {y} out of range 0..{}", self.height);
        let start = self.index(0, y);
        &self.ink[start..start + self.width as usize]
    }

    /// Returns true if the row holds no ink at all.
    #[must_use]
    pub fn row_is_blank(&self, y: u32) -> bool {
        !self.row(y).contains(&true)
    }

    /// The number of blank rows above the first inked row and below the last one, each counted
    /// independently. For a raster without ink both counts equal the height.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "both counts are at most the height")]
    pub fn blank_margins(&self) -> (u32, u32) {
        let top = (0..self.height)
            .take_while(|&y| self.row_is_blank(y))
            .count();
        let bottom = (0..self.height)
            .rev()
            .take_while(|&y| self.row_is_blank(y))
            .count();
        (top as u32, bottom as u32)
    }

    /// Crops blank rows from the top and bottom.
    ///
    /// A raster without ink trims to zero rows. Trimming is idempotent.
    ///
    /// ```
    /// # use tapelabel::raster::Bitmap;
    /// let mut bitmap = Bitmap::blank(3, 5);
    /// bitmap.set_ink(1, 2);
    /// let trimmed = bitmap.trimmed();
    /// assert_eq!(trimmed.to_string(), ".#.");
    /// assert_eq!(trimmed.trimmed(), trimmed);
    /// assert_eq!(Bitmap::blank(3, 5).trimmed().height(), 0);
    /// ```
    #[must_use]
    pub fn trimmed(&self) -> Self {
        let (top, bottom) = self.blank_margins();
        if top + bottom == 0 {
            return self.clone();
        }
        let end = self.height.saturating_sub(bottom);
        let start = top.min(end);
        let ink = self.ink[self.index(0, start)..self.index(0, end)].to_vec();
        Self {
            width: self.width,
            height: end - start,
            ink,
        }
    }

    /// Converts to an 8-bit greyscale image that only uses pure black and pure white.
    #[must_use]
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            Luma([if self.is_ink(x, y) {
                INK_LUMA
            } else {
                BACKGROUND_LUMA
            }])
        })
    }

    /// Writes the raster as a PNG file.
    ///
    /// # Errors
    /// Returns `Err` if the file cannot be written, or if the raster is empty (PNG has no
    /// zero-sized images).
    pub fn save_png(&self, path: &Path) -> Result<(), image::ImageError> {
        self.to_image().save_with_format(path, ImageFormat::Png)
    }

    const fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }
            for &ink in self.row(y) {
                f.write_str(if ink { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitmap {}x{}", self.width, self.height)?;
        Display::fmt(self, f)
    }
}
