//! Fonts backed by TrueType/OpenType files
//!
//! Glyphs are rasterized with `fontdue` and thresholded to two tones; coverage of at least half
//! counts as ink.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::debug;

use super::{Extent, Font};
use crate::config::{RenderConfig, Settings, check_scale};
use crate::label::LabelError;
use crate::raster::Bitmap;

const INK_THRESHOLD: u8 = 128;

/// A parsed font file together with the glyphs rasterized from it so far
///
/// The glyph cache is keyed by character and pixel size, filled on first use and never
/// invalidated, so a face should live as long as the process renders labels.
pub struct Face {
    font: fontdue::Font,
    glyphs: RefCell<HashMap<(char, u32), Rc<Glyph>>>,
}

struct Glyph {
    metrics: fontdue::Metrics,
    coverage: Vec<u8>,
}

impl Glyph {
    fn is_ink(&self, column: usize, row: usize) -> bool {
        self.coverage[row * self.metrics.width + column] >= INK_THRESHOLD
    }
}

impl Face {
    /// Parses the contents of a font file.
    ///
    /// # Errors
    /// [`LabelError::FontParse`] if `fontdue` rejects the data; `origin` only names the source in
    /// the error.
    pub fn from_bytes(bytes: &[u8], origin: &Path) -> Result<Self, LabelError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default()).map_err(
            |reason| LabelError::FontParse {
                path: origin.to_owned(),
                reason,
            },
        )?;
        Ok(Self {
            font,
            glyphs: RefCell::new(HashMap::new()),
        })
    }

    /// Reads and parses a font file.
    ///
    /// # Errors
    /// [`LabelError::FontRead`] or [`LabelError::FontParse`].
    pub fn load(path: &Path) -> Result<Self, LabelError> {
        let bytes = fs::read(path).map_err(|source| LabelError::FontRead {
            path: path.to_owned(),
            source,
        })?;
        let face = Self::from_bytes(&bytes, path)?;
        debug!("loaded font {} ({} glyphs)", path.display(), face.font.glyph_count());
        Ok(face)
    }

    fn glyph(&self, c: char, px: f32) -> Rc<Glyph> {
        let mut glyphs = self.glyphs.borrow_mut();
        let glyph = glyphs.entry((c, px.to_bits())).or_insert_with(|| {
            let (metrics, coverage) = self.font.rasterize(c, px);
            Rc::new(Glyph { metrics, coverage })
        });
        Rc::clone(glyph)
    }
}

/// A [`Face`] at one pixel size
#[derive(Clone)]
pub struct ScaledFace {
    face: Rc<Face>,
    px: f32,
}

impl ScaledFace {
    /// Uses `face` at `px` pixels per em.
    #[must_use]
    pub const fn new(face: Rc<Face>, px: f32) -> Self {
        Self { face, px }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "font metrics are a few hundred pixels at most"
    )]
    fn baseline(&self) -> i32 {
        self.face
            .font
            .horizontal_line_metrics(self.px)
            .map_or(self.px, |metrics| metrics.ascent)
            .round() as i32
    }

    /// Each glyph of `text` with the x coordinate of its origin.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "pen positions stay within a label width"
    )]
    fn placed(&self, text: &str) -> Vec<(i32, Rc<Glyph>)> {
        let mut pen = 0.0_f32;
        let mut previous = None;
        let mut placed = Vec::new();
        for c in text.chars() {
            if let Some(kern) =
                previous.and_then(|left| self.face.font.horizontal_kern(left, c, self.px))
            {
                pen += kern;
            }
            let glyph = self.face.glyph(c, self.px);
            pen += glyph.metrics.advance_width;
            placed.push(((pen - glyph.metrics.advance_width).round() as i32, glyph));
            previous = Some(c);
        }
        placed
    }
}

impl Font for ScaledFace {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        reason = "glyph bitmaps are small"
    )]
    fn measure(&self, text: &str) -> Extent {
        let baseline = self.baseline();
        let mut right = 0;
        let mut bottom = 0;
        for (x, glyph) in self.placed(text) {
            let metrics = &glyph.metrics;
            if metrics.width == 0 || metrics.height == 0 {
                continue;
            }
            right = right.max(x + metrics.xmin + metrics.width as i32);
            bottom = bottom.max(baseline - metrics.ymin);
        }
        Extent {
            width: right.max(0) as u32,
            height: bottom.max(0) as u32,
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "glyph bitmaps are small"
    )]
    fn draw(&self, canvas: &mut Bitmap, x: i32, y: i32, text: &str) {
        let baseline = self.baseline();
        for (pen, glyph) in self.placed(text) {
            let metrics = &glyph.metrics;
            let left = i64::from(x + pen + metrics.xmin);
            let top = i64::from(y + baseline - metrics.ymin - metrics.height as i32);
            for row in 0..metrics.height {
                for column in 0..metrics.width {
                    if glyph.is_ink(column, row) {
                        canvas.set_ink(left + column as i64, top + row as i64);
                    }
                }
            }
        }
    }
}

/// A [`RenderConfig`] built from [`Settings`] by loading the three font files
pub struct TrueTypeConfig {
    settings: Settings,
    value: Rc<Face>,
    prefix: ScaledFace,
    annotation: ScaledFace,
}

impl TrueTypeConfig {
    /// Loads the fonts named in `settings`.
    ///
    /// # Errors
    /// [`LabelError::ZeroWidth`] for a zero tape width, [`LabelError::DegenerateScale`] for a font
    /// size that is not positive, or an error loading one of the font files.
    pub fn load(settings: Settings) -> Result<Self, LabelError> {
        if settings.width_px == 0 {
            return Err(LabelError::ZeroWidth);
        }
        for font in [
            &settings.value_font,
            &settings.prefix_font,
            &settings.annotation_font,
        ] {
            check_scale(font.size)?;
        }
        let mut faces: HashMap<PathBuf, Rc<Face>> = HashMap::new();
        let mut face = |path: &Path| -> Result<Rc<Face>, LabelError> {
            if let Some(face) = faces.get(path) {
                return Ok(Rc::clone(face));
            }
            let face = Rc::new(Face::load(path)?);
            faces.insert(path.to_owned(), Rc::clone(&face));
            Ok(face)
        };
        let value = face(&settings.value_font.path)?;
        let prefix = ScaledFace::new(face(&settings.prefix_font.path)?, settings.prefix_font.size);
        let annotation = ScaledFace::new(
            face(&settings.annotation_font.path)?,
            settings.annotation_font.size,
        );
        Ok(Self {
            settings,
            value,
            prefix,
            annotation,
        })
    }

    /// The settings these fonts were loaded from.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }
}

impl RenderConfig for TrueTypeConfig {
    fn width_px(&self) -> u32 {
        self.settings.width_px
    }

    fn gap_text_px(&self) -> u32 {
        self.settings.gap_text_px
    }

    fn gap_block_px(&self) -> u32 {
        self.settings.gap_block_px
    }

    fn value_font(&self, scale: f32) -> Result<Box<dyn Font + '_>, LabelError> {
        let px = self.settings.value_font.size * check_scale(scale)?;
        Ok(Box::new(ScaledFace::new(Rc::clone(&self.value), px)))
    }

    fn plain_annotation_font(&self) -> &dyn Font {
        &self.prefix
    }

    fn plain_annotation_offset_px(&self) -> u32 {
        self.settings.prefix_font.offset_px
    }

    fn bracket_annotation_font(&self) -> &dyn Font {
        &self.annotation
    }

    fn destination(&self) -> &Path {
        &self.settings.output
    }
}
