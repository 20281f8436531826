//! Lines that mix the plain and annotation fonts

use crate::font::{Extent, Font};
use crate::raster::Bitmap;

use super::markup::{Segment, SegmentKind};

/// The two fonts of a mixed line and the offset that lines up their baselines
#[derive(Clone, Copy)]
pub struct FontPair<'f> {
    /// Font for [`SegmentKind::Plain`]
    pub plain: &'f dyn Font,
    /// Font for [`SegmentKind::Annotation`]
    pub annotation: &'f dyn Font,
    /// How far plain segments are moved down
    pub plain_offset: u32,
}

impl FontPair<'_> {
    fn font(&self, kind: SegmentKind) -> &dyn Font {
        match kind {
            SegmentKind::Plain => self.plain,
            SegmentKind::Annotation => self.annotation,
        }
    }

    const fn offset(&self, kind: SegmentKind) -> u32 {
        match kind {
            SegmentKind::Plain => self.plain_offset,
            SegmentKind::Annotation => 0,
        }
    }
}

/// A measured line, horizontally centered in its container
#[derive(Clone, Debug)]
pub struct ComposedLine<'t> {
    segments: Vec<(Segment<'t>, Extent)>,
    width: u32,
    height: u32,
    x: i32,
}

impl<'t> ComposedLine<'t> {
    /// Measures each segment in its font. Empty segments take no space. The height includes the
    /// plain offset wherever a non-empty plain segment occurs.
    pub fn compose(
        segments: impl IntoIterator<Item = Segment<'t>>,
        fonts: &FontPair<'_>,
        container: u32,
    ) -> Self {
        let segments: Vec<_> = segments
            .into_iter()
            .map(|segment| {
                let extent = if segment.text.is_empty() {
                    Extent::ZERO
                } else {
                    fonts.font(segment.kind).measure(segment.text)
                };
                (segment, extent)
            })
            .collect();
        let width = segments.iter().map(|(_, extent)| extent.width).sum();
        let height = segments
            .iter()
            .filter(|(segment, _)| !segment.text.is_empty())
            .map(|(segment, extent)| extent.height + fonts.offset(segment.kind))
            .max()
            .unwrap_or(0);
        Self {
            segments,
            width,
            height,
            x: centered(container, width),
        }
    }

    /// Sum of the segment widths.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Tallest segment, offsets included.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Left edge inside the container; negative if the line is wider than the container.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Draws the line with its top at row `y`. `fonts` must be the pair it was composed with.
    #[expect(clippy::cast_possible_wrap, reason = "segment sizes are far below i32::MAX")]
    pub fn draw(&self, canvas: &mut Bitmap, fonts: &FontPair<'_>, y: i32) {
        let mut x = self.x;
        for (segment, extent) in &self.segments {
            if !segment.text.is_empty() {
                let top = y + fonts.offset(segment.kind) as i32;
                fonts.font(segment.kind).draw(canvas, x, top, segment.text);
            }
            x += extent.width as i32;
        }
    }
}

/// Left edge that centers `width` within `container`, rounding toward the left.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the halved difference of two u32 fits in i32"
)]
pub(crate) fn centered(container: u32, width: u32) -> i32 {
    (i64::from(container) - i64::from(width)).div_euclid(2) as i32
}

#[cfg(test)]
mod tests {
    use super::{ComposedLine, FontPair, centered};
    use crate::font::test::BlockFont;
    use crate::raster::Bitmap;
    use crate::render::markup::segments;

    const PLAIN: BlockFont = BlockFont::new(3.0, 3.0);
    const ANNOTATION: BlockFont = BlockFont::new(2.0, 5.0);

    fn pair() -> FontPair<'static> {
        FontPair {
            plain: &PLAIN,
            annotation: &ANNOTATION,
            plain_offset: 1,
        }
    }

    #[test]
    fn centering() {
        assert_eq!(centered(10, 4), 3);
        assert_eq!(centered(10, 5), 2);
        assert_eq!(centered(4, 7), -2);
    }

    #[test]
    fn geometry() {
        let fonts = pair();
        let line = ComposedLine::compose(segments("I:{0603}"), &fonts, 20);
        assert_eq!(line.width(), 6 + 8);
        assert_eq!(line.height(), 5);
        assert_eq!(line.x(), 3);

        let plain = ComposedLine::compose(segments("THT"), &fonts, 20);
        assert_eq!(plain.height(), 3 + 1);
    }

    #[test]
    fn empty_segments_take_no_space() {
        let fonts = pair();
        let line = ComposedLine::compose(segments("{ab}"), &fonts, 10);
        assert_eq!((line.width(), line.height(), line.x()), (4, 5, 3));
        let nothing = ComposedLine::compose(segments(""), &fonts, 10);
        assert_eq!((nothing.width(), nothing.height()), (0, 0));
    }

    #[test]
    fn drawing_applies_plain_offset() {
        let fonts = pair();
        let line = ComposedLine::compose(segments("a{b}"), &fonts, 7);
        let mut canvas = Bitmap::blank(7, line.height());
        line.draw(&mut canvas, &fonts, 0);
        let expected = concat!(
            "....#..\n",
            ".##.#..\n",
            ".##.#..\n",
            ".##.#..\n",
            "....#..",
        );
        assert_eq!(canvas.to_string(), expected);
    }
}
