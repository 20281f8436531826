//! Blocks and the things that render into them
//!
//! A [`Renderable`] turns itself into one [`Block`]: a raster exactly as wide as the tape. Two
//! renderers cover every kind of content:
//! - [`TextBlock`]: free text, every line scaled to the tape width (see [`fit`]);
//! - [`ValueBlock`]: one value enlarged to the tape width, with small subtext lines below it that
//!   may mix fonts (see [`markup`] and [`line`]).
pub mod fit;
pub mod line;
pub mod markup;

use std::borrow::Cow;

use log::debug;

use crate::config::RenderConfig;
use crate::label::LabelError;
use crate::raster::Bitmap;

use fit::FittedLines;
use line::{ComposedLine, FontPair, centered};

/// Content that knows how to render itself
pub trait Renderable {
    /// Renders one block, as wide as [`RenderConfig::width_px`].
    ///
    /// # Errors
    /// Any error from the fonts of `config`.
    fn produce(&self, config: &dyn RenderConfig) -> Result<Block, LabelError>;
}

/// A rendered piece of a label
///
/// Blocks are never modified once produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    raster: Bitmap,
}

impl Block {
    pub(crate) const fn new(raster: Bitmap) -> Self {
        Self { raster }
    }

    /// The pixels.
    #[must_use]
    pub const fn raster(&self) -> &Bitmap {
        &self.raster
    }

    /// Equal to the tape width it was rendered for.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.raster.width()
    }

    /// Height in pixels, possibly 0.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.raster.height()
    }
}

/// Named horizontal alignments, as weights for [`TextBlock::align`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Flush left
    Start,
    /// Centered. This is the default.
    #[default]
    Center,
    /// Flush right
    End,
}

impl Alignment {
    /// The equivalent weight: 0, 0.5 or 1.
    #[must_use]
    pub const fn weight(self) -> f32 {
        match self {
            Self::Start => 0.0,
            Self::Center => 0.5,
            Self::End => 1.0,
        }
    }
}

/// Free text, each line scaled to the tape width
///
/// ```
/// # use tapelabel::render::{Alignment, TextBlock};
/// let block = TextBlock::new(["PARTS", "bin 7"])
///     .normalize(1.0)
///     .alignment(Alignment::Start);
/// assert_eq!(block.lines(), ["PARTS", "bin 7"]);
/// ```
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    lines: Vec<String>,
    normalize: f32,
    align: f32,
}

impl TextBlock {
    /// Creates a block of `lines`, not normalized and centered.
    pub fn new<I>(lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            normalize: 0.0,
            align: Alignment::Center.weight(),
        }
    }

    /// Sets how far line sizes are unified: 0 makes every line fill the width, 1 gives every line
    /// the font size of the longest. Clamped to `0..=1`; NaN is ignored.
    pub fn normalize(mut self, normalize: f32) -> Self {
        if !normalize.is_nan() {
            self.normalize = normalize.clamp(0.0, 1.0);
        }
        self
    }

    /// Sets the horizontal position of lines narrower than the tape: 0 is flush left, 1 flush
    /// right. Clamped to `0..=1`; NaN is ignored.
    pub fn align(mut self, align: f32) -> Self {
        if !align.is_nan() {
            self.align = align.clamp(0.0, 1.0);
        }
        self
    }

    /// Sets a named alignment.
    pub fn alignment(self, alignment: Alignment) -> Self {
        self.align(alignment.weight())
    }

    /// The lines of text.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Renderable for TextBlock {
    fn produce(&self, config: &dyn RenderConfig) -> Result<Block, LabelError> {
        let fitted = FittedLines::fit(self.lines.as_slice(), config, self.normalize, self.align)?;
        let mut canvas = Bitmap::blank(config.width_px(), fitted.height());
        fitted.draw(&mut canvas);
        Ok(Block::new(canvas))
    }
}

/// A value such as `"100kΩ"` with subtext lines below it
///
/// ```
/// # use tapelabel::render::ValueBlock;
/// let block = ValueBlock::new("4.7k").unit("Ω").subtext("I:{0603}");
/// assert_eq!(block.display_value(), "4.7kΩ");
/// assert_eq!(ValueBlock::new("22Ω").unit("Ω").display_value(), "22Ω");
/// ```
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueBlock<'a> {
    value: Cow<'a, str>,
    unit: Option<&'a str>,
    subtexts: Vec<Cow<'a, str>>,
}

impl<'a> ValueBlock<'a> {
    /// Creates a block showing `value`, without unit or subtexts.
    pub fn new(value: impl Into<Cow<'a, str>>) -> Self {
        Self {
            value: value.into(),
            unit: None,
            subtexts: Vec::new(),
        }
    }

    /// Sets the unit, appended to the value unless it already ends with it.
    pub const fn unit(mut self, unit: &'a str) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Adds one subtext line, which may contain `{...}` annotations.
    pub fn subtext(mut self, subtext: impl Into<Cow<'a, str>>) -> Self {
        self.subtexts.push(subtext.into());
        self
    }

    /// Adds several subtext lines.
    pub fn subtexts<I>(mut self, subtexts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Cow<'a, str>>,
    {
        self.subtexts.extend(subtexts.into_iter().map(Into::into));
        self
    }

    /// The value with its unit.
    #[must_use]
    pub fn display_value(&self) -> Cow<'_, str> {
        match self.unit {
            Some(unit) if !self.value.ends_with(unit) => {
                Cow::Owned(format!("{}{unit}", self.value))
            }
            _ => Cow::Borrowed(self.value.as_ref()),
        }
    }
}

/// The scale for a value of `natural` width on a tape `target` wide: enlarged to fill the width,
/// never shrunk.
#[must_use]
pub fn value_scale(natural: u32, target: u32) -> f32 {
    fit::width_fit_scale(natural, target).map_or(1.0, |scale| scale.max(1.0))
}

impl Renderable for ValueBlock<'_> {
    #[expect(clippy::cast_possible_wrap, reason = "block heights are far below i32::MAX")]
    fn produce(&self, config: &dyn RenderConfig) -> Result<Block, LabelError> {
        let width = config.width_px();
        let gap = config.gap_text_px();
        let value = self.display_value();

        let mut font = config.value_font(1.0)?;
        let mut extent = font.measure(&value);
        let scale = value_scale(extent.width, width);
        if scale > 1.0 {
            font = config.value_font(scale)?;
            extent = font.measure(&value);
        }
        debug!("value {value:?} at scale {scale:.3}: {extent:?}");

        let fonts = FontPair {
            plain: config.plain_annotation_font(),
            annotation: config.bracket_annotation_font(),
            plain_offset: config.plain_annotation_offset_px(),
        };
        let lines: Vec<ComposedLine<'_>> = self
            .subtexts
            .iter()
            .map(|subtext| ComposedLine::compose(markup::segments(subtext), &fonts, width))
            .collect();

        let height = extent.height + lines.iter().map(|line| line.height() + gap).sum::<u32>();
        let mut canvas = Bitmap::blank(width, height);
        font.draw(&mut canvas, centered(width, extent.width), 0, &value);
        let mut y = extent.height;
        for line in &lines {
            y += gap;
            line.draw(&mut canvas, &fonts, y as i32);
            y += line.height();
        }
        Ok(Block::new(canvas))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{Alignment, Renderable, TextBlock, ValueBlock, value_scale};
    use crate::config::test::TestConfig;

    #[test]
    fn value_is_never_shrunk() {
        assert_relative_eq!(value_scale(0, 64), 1.0);
        assert_relative_eq!(value_scale(64, 64), 1.0);
        assert_relative_eq!(value_scale(100, 64), 1.0);
        assert_relative_eq!(value_scale(16, 64), 4.0);
        for natural in 1..200 {
            assert!(value_scale(natural, 64) >= 1.0);
        }
    }

    #[test]
    fn unit_suffix() {
        let block = ValueBlock::new("10μ").unit("F");
        assert_eq!(block.display_value(), "10μF");
        let block = ValueBlock::new("10μF").unit("F");
        assert_eq!(block.display_value(), "10μF");
        assert_eq!(ValueBlock::new("1N4148").display_value(), "1N4148");
    }

    #[test]
    fn value_fills_width() {
        // "1k" is 10 pixels wide at scale 1, so it is drawn at scale 4
        let config = TestConfig::default();
        let block = ValueBlock::new("1k").produce(&config).unwrap();
        assert_eq!(block.width(), 40);
        assert_eq!(block.height(), 28);
        assert!(!block.raster().row_is_blank(0));
        assert!(block.raster().row(0)[0]);
        assert!(block.raster().row(0)[38]);
    }

    #[test]
    fn wide_value_keeps_natural_size() {
        let config = TestConfig::default();
        let block = ValueBlock::new("123456789").produce(&config).unwrap();
        assert_eq!((block.width(), block.height()), (40, 7));
        assert!(!block.raster().row_is_blank(0));
    }

    #[test]
    fn subtexts_stack_below_value() {
        let config = TestConfig::default();
        let block = ValueBlock::new("1k")
            .subtext("I:{0603}")
            .subtext("THT")
            .produce(&config)
            .unwrap();
        // value 28, then gap 2 + max(3 + 1, 5), then gap 2 + (3 + 1)
        assert_eq!(block.height(), 28 + 2 + 5 + 2 + 4);
        assert!(block.raster().row_is_blank(28));
        assert!(!block.raster().row_is_blank(30));
        assert!(!block.raster().row_is_blank(block.height() - 1));
    }

    #[test]
    fn text_block_geometry() {
        let config = TestConfig::default();
        let block = TextBlock::new(["ab", "abcd"])
            .normalize(1.0)
            .alignment(Alignment::Start)
            .produce(&config)
            .unwrap();
        // shared scale 2: both lines 14 high, 2 apart
        assert_eq!((block.width(), block.height()), (40, 30));
        let (top, bottom) = block.raster().blank_margins();
        assert_eq!((top, bottom), (0, 0));
        assert!(block.raster().row(0)[0]);
        assert!(!block.raster().row(0)[25]);
        assert!(block.raster().row(16)[35]);
    }

    #[test]
    fn empty_text_block() {
        let config = TestConfig::default();
        let block = TextBlock::new(Vec::<String>::new()).produce(&config).unwrap();
        assert_eq!((block.width(), block.height()), (40, 0));
    }

    #[test]
    fn weights_are_clamped() {
        let block = TextBlock::new(["x"]).normalize(3.0).align(f32::NAN);
        assert_eq!(block, TextBlock::new(["x"]).normalize(1.0));
    }
}
